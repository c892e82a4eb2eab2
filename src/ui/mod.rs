//! User interface module - console output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Printing, with colour where the terminal supports it

use console::style;

pub mod formatter;

pub use formatter::{
    format_banner, format_groups, format_ignored, format_listing, format_non_version, RULE,
};

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}
