//! Demo handler plugin: prints a one-line summary for every event that
//! survives filtering. Doubles as the end-to-end test target.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use es_common::{ExitCode, Result};
use es_config::Settings;
use es_core::event::Event;
use es_core::runner::{self, Handler, RunnerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "demo-handler",
    about = "Print a summary line for each event that survives filtering"
)]
struct Opts {
    /// Path to a JSON settings document.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Hand every event to the handler without filtering.
    #[arg(long)]
    no_filter: bool,
}

struct SummaryHandler;

impl Handler for SummaryHandler {
    fn handle(&mut self, event: &Event) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "event: {}", runner::event_summary(event, 100))
            .map_err(|err| es_common::Error::Plugin(format!("failed to emit summary: {err}")))?;
        Ok(())
    }
}

fn run(opts: &Opts) -> Result<ExitCode> {
    let settings = match &opts.settings {
        Some(path) => Settings::from_path(path).map_err(|err| {
            es_common::Error::Config(format!("failed to load settings {}: {err}", path.display()))
        })?,
        None => Settings::default(),
    };
    let config = RunnerConfig {
        filter: !opts.no_filter,
        ..Default::default()
    };
    runner::run_handler(&mut SummaryHandler, &settings, &config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let code = run(&opts).unwrap_or_else(|err| {
        eprintln!("demo-handler: {err}");
        err.exit_code()
    });
    process::exit(code.as_i32());
}
