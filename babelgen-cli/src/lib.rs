//! # babelgen-cli
//!
//! CLI library for generating Java and Go sources from Babel IDL models.
//!
//! The IDL text is parsed by an external front end into a JSON model; this
//! crate loads that model, renders it through [`babelgen`] and writes one
//! file per construct.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`generator`] - Model loading and rendering per language
//! - [`writer`] - Syncing generated files to disk, with dry-run and staleness checks
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{load_model, GeneratedFile, GeneratedOutput, ModelGenerator};
pub use writer::{FileStatus, OutputSync, SyncOutcome};
