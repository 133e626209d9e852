#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for contents-stats
//!
//! This library holds all functionality for the contents-stats tool, which downloads
//! a Debian "Contents" index for one architecture and reports the packages that own
//! the most files.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`contents`]: Fetching, decompressing, counting and ranking the index
//! - [`reports`]: Rendering the ranked packages

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod contents;
pub mod reports;

pub use crate::commands::{Host, run};
