//! Error types for option handling. Extraction itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The shot pattern (or a recognizer regex built from it) does not compile
    #[error("invalid shot pattern `{pattern}`: {source}")]
    InvalidShotPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse options: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),
}
