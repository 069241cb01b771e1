use std::io;

use figment::Error as ConfigError;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {source:#?}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("IO Error: {source:#?}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Unable to deserialize JSON: {source:#?}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid mapping definitions filename '{name}': {reason}")]
    InvalidMappingFilename { name: String, reason: String },

    #[error("Unable to build endpoint for '{path}': {reason}")]
    InvalidEndpoint { path: String, reason: String },

    #[error("No CFBundleDisplayName in localized or unlocalized bundle metadata")]
    MissingAppName,
}
