//! Parsing and validation of `recon.toml` configuration files.
//!
//! Every section is optional; a missing file or section falls back to the
//! conventional Truffle project layout (`build/contracts`, `contracts`).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE};
pub use types::*;
