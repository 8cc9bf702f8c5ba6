//! Demo mutator plugin: stamps `"mutated": true` onto the event and
//! writes it back out. Doubles as the end-to-end test target.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::json;

use es_common::{ExitCode, Result};
use es_config::Settings;
use es_core::event::Event;
use es_core::runner::{self, Mutator, RunnerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "demo-mutator",
    about = "Stamp a mutated marker onto each event and re-emit it"
)]
struct Opts {
    /// Path to a JSON settings document.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Mutate every event without filtering.
    #[arg(long)]
    no_filter: bool,
}

struct StampMutator;

impl Mutator for StampMutator {
    fn mutate(&mut self, mut event: Event) -> Result<Event> {
        event.extra.insert("mutated".into(), json!(true));
        Ok(event)
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
    runner::run_mutator(&mut StampMutator, &settings, &config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let code = run(&opts).unwrap_or_else(|err| {
        eprintln!("demo-mutator: {err}");
        err.exit_code()
    });
    process::exit(code.as_i32());
}
