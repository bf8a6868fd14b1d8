//! Video Music Remover - command line entry point
//!
//! Thin layer over `vmr_core`: parses arguments, loads settings, wires the
//! observers and hands the paths to the processor.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use vmr_core::config::{ConfigManager, Settings};
use vmr_core::events::{ConsoleObserver, EventDispatcher, LogObserver, TracingObserver};
use vmr_core::logging::{init_tracing, LogLevel, RunLogger};
use vmr_core::orchestrator::{CancelHandle, PipelineError, Processor};
use vmr_core::tools::{check_tools, probe_command, SystemRunner, Toolchain};
use vmr_core::validation::validate_log_file;

mod args;

/// Exit code of a run stopped by SIGINT or SIGTERM.
const INTERRUPTED: u8 = 130;

use args::{Cli, Command, RemoveMusicArgs};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::RemoveMusic(args) => remove_music(args),
        Command::HealthCheck { debug, config } => health_check(debug, config.as_deref()),
        Command::Version => {
            println!("{}", vmr_core::version());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn remove_music(args: RemoveMusicArgs) -> Result<ExitCode> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(model) = args.model {
        settings.separation.model = model.into();
    }
    if args.delete_original {
        settings.processing.delete_original = true;
    }

    init_tracing(settings.logging.level);
    tracing::debug!(
        "Model: {}, delete original: {}",
        settings.separation.model,
        settings.processing.delete_original
    );

    let level = settings.logging.level;
    let mut events = EventDispatcher::new().with_observer(ConsoleObserver);
    // Info events already reach the console; tracing gets them only when verbose.
    if level <= LogLevel::Debug {
        events.attach(Box::new(TracingObserver));
    }

    let logger = match &args.log {
        Some(path) => {
            let path = validate_log_file(path)?;
            let logger = Arc::new(
                RunLogger::open(&path, level)
                    .with_context(|| format!("Failed to open log file {}", path.display()))?,
            );
            events.attach(Box::new(LogObserver::new(Arc::clone(&logger))));
            Some(logger)
        }
        None => None,
    };

    // Unwinding on an interrupt is what removes the scratch directory.
    let cancel = CancelHandle::new();
    let on_signal = cancel.clone();
    ctrlc::set_handler(move || on_signal.cancel())
        .context("Failed to install the interrupt handler")?;

    let runner = Arc::new(SystemRunner::new().with_cancel(cancel.clone()));
    let processor = Processor::new(&settings, runner, events).with_cancel_handle(cancel);
    let result = processor.process(&args.input_path, &args.output_path);

    if let Some(logger) = &logger {
        if let Err(e) = &result {
            logger.error(&e.to_string());
        }
        logger.close();
    }

    if let Err(e @ PipelineError::Cancelled { .. }) = &result {
        eprintln!("Interrupted: {e}");
        return Ok(ExitCode::from(INTERRUPTED));
    }
    let summary = result.context("Failed to remove music")?;
    if !summary.is_clean() {
        eprintln!("{} video(s) could not be processed:", summary.skipped.len());
        for skipped in &summary.skipped {
            eprintln!("  {}: {}", skipped.video.display(), skipped.error);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Settings from `path`, or defaults when no file was given.
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let mut config = ConfigManager::new(path);
    config
        .load_or_create()
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    Ok(config.into_settings())
}

fn health_check(debug: bool, config: Option<&Path>) -> Result<ExitCode> {
    let settings = load_settings(config)?;
    init_tracing(if debug { LogLevel::Debug } else { LogLevel::Warn });

    let tools = Toolchain::from_settings(&settings.tools);
    if debug {
        for tool in vmr_core::models::Tool::ALL {
            println!(
                "[DEBUG] running command \"{}\"",
                probe_command(&tools, tool).display()
            );
        }
    }

    let report = check_tools(&SystemRunner::new(), &tools);
    for check in &report.checks {
        if check.available {
            println!("[INFO] {} installed", check.tool);
        } else {
            println!("[ERROR] {} not installed", check.tool);
        }
        if debug {
            println!("[DEBUG] {}: {}", check.tool, check.detail);
        }
    }

    if report.is_healthy() {
        println!("Everything is ok");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("There are some issues");
        Ok(ExitCode::FAILURE)
    }
}
