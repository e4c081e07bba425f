//! Errors raised while loading `recon.toml`.

use std::path::PathBuf;

/// A configuration that could not be read, parsed or accepted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    IoError {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The text is not valid TOML or does not match the expected schema.
    #[error("invalid configuration in {origin}: {message}")]
    ParseError {
        /// File path, or `<string>` for in-memory input.
        origin: String,
        /// Parser message, including the offending line.
        message: String,
    },

    /// A value parsed but is unusable.
    #[error("invalid value for `{key}`: {reason}")]
    ValidationError {
        /// Dotted key of the rejected value.
        key: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}
