//! Eventsift configuration loading and resolution.
//!
//! This crate provides:
//! - Typed suppression defaults with per-document overrides
//! - Monitoring API settings, resolved from the environment or a
//!   settings document
//! - Settings-document loading from a JSON file or value
//!
//! Configuration is resolved once per process and passed explicitly into
//! the pipeline and API client; there is no ambient global state.

pub mod api;
pub mod defaults;
pub mod settings;

pub use api::{ApiSettings, API_URL_ENV};
pub use defaults::{DefaultsOverride, SuppressionDefaults};
pub use settings::Settings;
