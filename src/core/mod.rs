//! Core application functionality
//!
//! This module contains the application shell:
//! - CLI parsing and validation
//! - The user settings file
//! - Typed errors shared by the library modules
//! - Running subcommands and reporting failures

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{BuildError, DecodeError, LookupError, ShapeError};
pub use runner::run_app;
