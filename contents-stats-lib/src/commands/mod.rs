//! Command-line interface and orchestration for contents-stats
//!
//! This module parses the command line, loads the configuration and drives the
//! pipeline in [`crate::contents`] from download to report.
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! `process_stats`, which:
//!
//! 1. Sets up logging and loads configuration
//! 2. Refreshes the cached Contents index from the mirror, falling back to the
//!    existing cache when that fails
//! 3. Counts and ranks the packages in the cached index
//! 4. Writes the console report, plus the JSON report when requested
//!
//! All user-facing output goes through [`Host`] so tests can capture it.

mod common;
mod config;
mod host;
mod run;
mod stage_reporter;
mod stats;

pub use common::{ColorMode, LogLevel};
pub use config::{CONFIG_FILE_NAME, Config};
pub use host::Host;
pub use run::run;
pub use stage_reporter::StageReporter;
pub use stats::{StatsArgs, process_stats};
