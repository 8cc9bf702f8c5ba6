//! Eventsift shared types and errors.
//!
//! This crate provides foundational types shared across the eventsift crates:
//! - Unified error type with stable numeric codes
//! - Process exit-code vocabulary

pub mod error;
pub mod exit_codes;

pub use error::{Error, Result};
pub use exit_codes::ExitCode;
