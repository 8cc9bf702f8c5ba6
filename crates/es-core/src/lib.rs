//! Eventsift core: event model, filter pipeline, and plugin runner.
//!
//! A plugin process receives one JSON event on stdin, runs it through a
//! fixed sequence of suppression filters (which may query the monitoring
//! API), and — if no filter drops it — hands it to the plugin's own
//! handle or mutate action.
//!
//! A minimal handler:
//!
//! ```no_run
//! use es_config::Settings;
//! use es_core::event::Event;
//! use es_core::runner::{run_handler, Handler, RunnerConfig};
//!
//! struct Notify;
//!
//! impl Handler for Notify {
//!     fn handle(&mut self, event: &Event) -> es_common::Result<()> {
//!         println!("event: {}", es_core::runner::event_summary(event, 100));
//!         Ok(())
//!     }
//! }
//!
//! let code = run_handler(&mut Notify, &Settings::default(), &RunnerConfig::default())
//!     .unwrap_or_else(|e| {
//!         eprintln!("{e}");
//!         e.exit_code()
//!     });
//! std::process::exit(code.as_i32());
//! ```

pub mod api;
pub mod event;
pub mod filter;
pub mod runner;

pub use api::{ApiClient, ApiError};
pub use event::Event;
pub use filter::{FilterOutcome, FilterPipeline};
pub use runner::{run_handler, run_mutator, Handler, Mutator, RunnerConfig};
