//! Stopwatch CLI Application
//!
//! Terminal front end for the stopwatch-core library. It supplies:
//! - An input source reading commands from stdin
//! - A thread-backed repeating timer
//! - A terminal display sink
//! - Session summary and JSON export on quit

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use stopwatch_core::{Controller, IdleMarkPolicy, Scheduler, TimerHandle};

mod config;
mod display;
mod events;
mod report;
mod timer;

use config::AppConfig;
use display::TerminalDisplay;
use events::{AppEvent, Command, UnknownCommand};
use report::SessionReport;
use timer::ThreadScheduler;

/// Stopwatch - start, pause, mark and reset from the terminal
#[derive(Parser, Debug)]
#[command(name = "stopwatch")]
#[command(about = "A terminal stopwatch with marks (laps)", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// What `mark` does before the stopwatch is started (ignore, allow, reject)
    #[arg(long, value_name = "POLICY")]
    idle_marks: Option<IdleMarkPolicy>,

    /// Label printed in front of each mark
    #[arg(long, value_name = "TEXT")]
    mark_label: Option<String>,

    /// Write a JSON session report to this file on quit
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Don't print the summary on quit
    #[arg(long)]
    no_summary: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Stopwatch CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using stopwatch-core v{}", stopwatch_core::VERSION);

    let config = resolve_config(&args)?;
    run(config)
}

/// Load the config file (if any) and apply command-line overrides
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(policy) = args.idle_marks {
        config.stopwatch.idle_marks = policy;
    }
    if let Some(label) = &args.mark_label {
        config.stopwatch.mark_label = label.clone();
    }
    if let Some(path) = &args.export {
        config.output.export = Some(path.clone());
    }
    if args.no_summary {
        config.output.show_summary = false;
    }

    config
        .stopwatch
        .validate()
        .context("Invalid command-line options")?;
    log::debug!(
        "Effective configuration: idle marks {}, {:?}",
        config.stopwatch.idle_marks,
        config
    );
    Ok(config)
}

/// Main event loop: feed input commands and ticks to the controller until quit
fn run(config: AppConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone())?;

    let mut stopwatch = Controller::with_config(
        config.stopwatch.clone(),
        ThreadScheduler::new(tx),
        TerminalDisplay::stdout(),
    );

    println!("{}", events::HELP);
    stopwatch.refresh();

    for event in rx.iter() {
        match event {
            AppEvent::Tick(handle) => {
                stopwatch.on_tick(handle);
            }
            AppEvent::TimerFailed { handle, reason } => {
                handle_timer_failure(&mut stopwatch, handle, &reason);
            }
            AppEvent::Command(Command::Stopwatch(action)) => {
                if let Err(e) = stopwatch.apply(action) {
                    stopwatch.display_mut().message(&e.to_string());
                }
            }
            AppEvent::Command(Command::Help) => {
                stopwatch.display_mut().message(events::HELP);
            }
            AppEvent::Unrecognized(text) => {
                stopwatch
                    .display_mut()
                    .message(&UnknownCommand(text).to_string());
            }
            AppEvent::Command(Command::Quit) => break,
            AppEvent::InputClosed => {
                log::debug!("Input closed");
                break;
            }
        }
    }

    let report = SessionReport::new(stopwatch.run_state(), stopwatch.elapsed(), stopwatch.marks());
    let label = stopwatch.config().mark_label.clone();
    // Cancels the running timer before printing the summary.
    drop(stopwatch.into_parts());
    println!();

    if config.output.show_summary {
        print!("{}", report.summary(&label));
    }
    if let Some(path) = &config.output.export {
        report.export(path)?;
    }

    Ok(())
}

/// Leave `Running` when its timer never started, so the display doesn't lie
fn handle_timer_failure<S: Scheduler, W: Write>(
    stopwatch: &mut Controller<S, TerminalDisplay<W>>,
    handle: TimerHandle,
    reason: &str,
) {
    if stopwatch.active_timer() == Some(handle) {
        stopwatch.pause();
    }
    stopwatch
        .display_mut()
        .message(&format!("Timer could not be started ({}); stopwatch paused", reason));
}

/// Forward stdin lines to the event loop from a background thread
fn spawn_input_reader(events: Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name("stopwatch-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("Failed to read input: {}", e);
                        break;
                    }
                };
                if events.send(AppEvent::from_line(&line)).is_err() {
                    return;
                }
            }
            let _ = events.send(AppEvent::InputClosed);
        })
        .context("Failed to spawn input thread")?;
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
