//! VMR Core - Backend logic for Video Music Remover
//!
//! This crate contains all business logic with zero CLI dependencies:
//! discovering videos, splitting out their audio streams, running each
//! stream through a vocal separation model and writing the video back with
//! the music-free audio.

pub mod config;
pub mod events;
pub mod extraction;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod mux;
pub mod orchestrator;
pub mod separation;
pub mod tools;
pub mod validation;

#[cfg(test)]
mod testing;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
