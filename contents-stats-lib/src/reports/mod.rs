//! Report generation for the ranked packages
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: aligned, numbered list with optional ANSI colors
//! - **JSON**: machine-readable structured data
//!
//! Both write into a `core::fmt::Write` so callers decide where the text ends up.

mod console;
mod json;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
