//! Work discovery for directory runs.

mod discovery;

pub use discovery::VideoDiscovery;
