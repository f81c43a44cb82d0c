//! Parsing and validation of `gatesmith.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a strongly-typed
//! [`Config`] with simulation limits, loader strictness and the packaging-time
//! feedback-loop policy. Every table and field has a default, so an empty file
//! (or no file at all) yields [`Config::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
