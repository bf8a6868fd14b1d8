//! Progress notification.
//!
//! The pipeline reports every milestone to an [`EventDispatcher`] built for
//! the run. Observers turn events into console output, log lines or
//! tracing events; none of them affect processing.

mod dispatcher;
mod observers;
mod types;

pub use dispatcher::{EventDispatcher, MusicRemoverObserver};
pub use observers::{ConsoleObserver, LogObserver, TracingObserver};
pub use types::RemoverEvent;
