//! # fabryk-fieldmap-cli
//!
//! The `fieldmap` command-line tool.
//!
//! This crate wraps the field mapping crates for interactive use:
//! - Build an index document from an XML record and a terminology file
//! - Resolve a single field name for a base name, data type and index type
//! - Resolve the full field map for one value
//! - Show the effective mapping configuration
//!
//! Settings come from an optional TOML file (see [`config`]); command-line
//! flags override them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Args, Command};
pub use config::Settings;
