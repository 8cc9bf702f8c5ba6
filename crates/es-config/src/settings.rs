//! Settings-document loading.
//!
//! A settings document is one JSON object. The framework reads two keys:
//! `api` (monitoring API connection) and `eventsift` (suppression
//! threshold overrides). Everything else is preserved for plugin-specific
//! use.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use es_common::Result;

use crate::api::ApiSettings;
use crate::defaults::DefaultsOverride;

/// A parsed settings document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: Option<ApiSettings>,

    /// Plugin-wide suppression threshold overrides.
    #[serde(rename = "eventsift", default)]
    pub plugin: Option<DefaultsOverride>,

    /// Keys the framework does not model, kept for plugin use.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Load a settings document from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Build settings from an in-memory JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
