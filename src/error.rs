//! Error Module

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configurations, handling plans or building
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration root in {path} must be an object")]
    InvalidRoot { path: PathBuf },

    #[error("Entity '{entity}' must be an object")]
    InvalidEntity { entity: String },

    #[error("Missing key '{key}' in entity '{entity}'")]
    MissingKey { entity: String, key: String },

    #[error("Key '{key}' in entity '{entity}' must be {expected}")]
    InvalidField {
        entity: String,
        key: String,
        expected: &'static str,
    },

    #[error("Unknown type '{typ}' for entity '{entity}'")]
    UnknownType { entity: String, typ: String },

    #[error("Could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build failed for: {}", .failed.join(", "))]
    BuildFailed { failed: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
