//! Stock observers: console, run log file and tracing.

use std::sync::Arc;

use crate::logging::{LogLevel, RunLogger};

use super::dispatcher::MusicRemoverObserver;
use super::types::RemoverEvent;

/// Prints progress lines to stdout. Scan events are skipped.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl MusicRemoverObserver for ConsoleObserver {
    fn on_event(&self, event: &RemoverEvent) {
        if event.level() >= LogLevel::Info {
            println!("{}", event.message());
        }
    }
}

/// Writes every event to the run log file.
pub struct LogObserver {
    logger: Arc<RunLogger>,
}

impl LogObserver {
    pub fn new(logger: Arc<RunLogger>) -> Self {
        Self { logger }
    }
}

impl MusicRemoverObserver for LogObserver {
    fn on_event(&self, event: &RemoverEvent) {
        self.logger.log(event.level(), &event.message());
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl MusicRemoverObserver for TracingObserver {
    fn on_event(&self, event: &RemoverEvent) {
        let message = event.message();
        match event.level() {
            LogLevel::Trace => tracing::trace!("{}", message),
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
    }
}
