//! Plugin lifecycle driver.
//!
//! A plugin is a type implementing [`Handler`] or [`Mutator`], passed
//! explicitly to [`run_handler`] / [`run_mutator`]. The driver reads one
//! JSON event from stdin, runs the filter pipeline, and dispatches. One
//! plugin action runs per process invocation; a plugin reused as a
//! library opts out with `RunnerConfig { autorun: false, .. }` instead
//! of relying on load-order side effects.
//!
//! Suppression is a success: the driver prints
//! `"{reason}: {client}/{check}"` and the process exits 0.

use std::io::{self, Read, Write};

use es_common::{ExitCode, Result};
use es_config::{ApiSettings, Settings, SuppressionDefaults};

use crate::api::ApiClient;
use crate::event::Event;
use crate::filter::{FilterOutcome, FilterPipeline};

/// A plugin that performs an arbitrary side effect. No output contract.
pub trait Handler {
    fn handle(&mut self, event: &Event) -> Result<()> {
        let _ = event;
        println!("ignoring event -- no handler defined");
        Ok(())
    }
}

/// A plugin that transforms the event; the driver serializes the result
/// as one JSON document on stdout. The default is the identity.
pub trait Mutator {
    fn mutate(&mut self, event: Event) -> Result<Event> {
        Ok(event)
    }
}

/// Driver configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Run the filter pipeline before dispatching. Handlers that want
    /// every event verbatim turn this off.
    pub filter: bool,

    /// Explicit opt-out: with `autorun: false` the run functions return
    /// immediately without touching stdin.
    pub autorun: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            filter: true,
            autorun: true,
        }
    }
}

/// What one process invocation did with its event.
#[derive(Debug)]
pub enum RunOutcome {
    /// The handler's side effect ran.
    Handled,

    /// The mutator produced this transformed event.
    Mutated(Event),

    /// A filter stage dropped the event for this reason.
    Suppressed(String),
}

/// Read the entire input stream and parse exactly one JSON event.
/// A parse failure is fatal; no event is ever fabricated from bad input.
pub fn read_event<R: Read>(mut reader: R) -> Result<Event> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Filter one event, with thresholds and API settings resolved from the
/// settings document. `Ok(Some(reason))` means suppressed.
fn run_filters(event: &Event, settings: &Settings) -> Result<Option<String>> {
    let defaults = SuppressionDefaults::default().merged(settings.plugin.as_ref());
    let api = ApiClient::new(ApiSettings::resolve(settings)?);
    match FilterPipeline::new(event, &defaults, &api).run()? {
        FilterOutcome::Continue => Ok(None),
        FilterOutcome::Suppressed { reason } => Ok(Some(reason)),
    }
}

/// Filter (unless disabled) then dispatch to a handler.
pub fn process_handler<H: Handler>(
    handler: &mut H,
    event: &Event,
    settings: &Settings,
    config: &RunnerConfig,
) -> Result<RunOutcome> {
    if config.filter {
        if let Some(reason) = run_filters(event, settings)? {
            return Ok(RunOutcome::Suppressed(reason));
        }
    }
    handler.handle(event)?;
    Ok(RunOutcome::Handled)
}

/// Filter (unless disabled) then dispatch to a mutator.
pub fn process_mutator<M: Mutator>(
    mutator: &mut M,
    event: Event,
    settings: &Settings,
    config: &RunnerConfig,
) -> Result<RunOutcome> {
    if config.filter {
        if let Some(reason) = run_filters(&event, settings)? {
            return Ok(RunOutcome::Suppressed(reason));
        }
    }
    Ok(RunOutcome::Mutated(mutator.mutate(event)?))
}

/// Run a handler plugin against the event on stdin.
pub fn run_handler<H: Handler>(
    handler: &mut H,
    settings: &Settings,
    config: &RunnerConfig,
) -> Result<ExitCode> {
    if !config.autorun {
        return Ok(ExitCode::Ok);
    }
    let event = read_event(io::stdin().lock())?;
    if let RunOutcome::Suppressed(reason) = process_handler(handler, &event, settings, config)? {
        report_suppression(&reason, &event);
    }
    Ok(ExitCode::Ok)
}

/// Run a mutator plugin against the event on stdin, writing the
/// transformed event to stdout.
pub fn run_mutator<M: Mutator>(
    mutator: &mut M,
    settings: &Settings,
    config: &RunnerConfig,
) -> Result<ExitCode> {
    if !config.autorun {
        return Ok(ExitCode::Ok);
    }
    let event = read_event(io::stdin().lock())?;
    match process_mutator(mutator, event.clone(), settings, config)? {
        RunOutcome::Suppressed(reason) => report_suppression(&reason, &event),
        RunOutcome::Mutated(mutated) => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer(&mut stdout, &mutated)?;
            writeln!(stdout)?;
        }
        RunOutcome::Handled => {}
    }
    Ok(ExitCode::Ok)
}

fn report_suppression(reason: &str, event: &Event) {
    println!("{reason}: {}/{}", event.client_name(), event.check_name());
}

/// One-line human summary of an event: the check's own notification or
/// description when present, otherwise `source/check : output` with the
/// output trimmed to `trim_at` characters.
pub fn event_summary(event: &Event, trim_at: usize) -> String {
    if let Some(notification) = &event.check.notification {
        return notification.clone();
    }
    if let Some(description) = &event.check.description {
        return description.clone();
    }
    let source = event
        .check
        .source
        .as_deref()
        .unwrap_or_else(|| event.client_name());
    let output = event.check.output.as_deref().unwrap_or("").trim_end();
    let output = if output.chars().count() > trim_at {
        let head: String = output.chars().take(trim_at).collect();
        format!("{head}...")
    } else {
        output.to_string()
    };
    format!("{source}/{} : {output}", event.check_name())
}
