//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing happens in the parent module.

use crate::domain::{ListingLine, VersionListing};
use crate::multi::OutputGroup;

/// Horizontal rule framing `git-multi` output.
pub const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Banner announcing the command `git-multi` is about to run.
pub fn format_banner(command: &[String], grep: Option<&str>) -> String {
    let command = command.join(" ");
    let line = match grep {
        Some(pattern) => format!("Executing: {} | grep {}", command, pattern),
        None => format!("Executing {}", command),
    };
    format!("{}\n{}\n{}", RULE, line, RULE)
}

/// `Ignoring: a, b, c`
pub fn format_ignored<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    format!("Ignoring: {}", names.into_iter().collect::<Vec<_>>().join(", "))
}

/// Grouped output: each group header, its output, then a blank line.
pub fn format_groups(groups: &[OutputGroup]) -> String {
    let mut text = String::new();
    for group in groups {
        text.push_str(&group.header);
        text.push('\n');
        text.push_str(&group.output);
        text.push_str("\n\n");
    }
    text
}

/// `Not a version: <tag>`
pub fn format_non_version(tag: &str) -> String {
    format!("Not a version: {}", tag)
}

/// Version listing with major/minor boundary markers and the last version.
pub fn format_listing(listing: &VersionListing) -> String {
    let mut text = String::new();
    for line in listing.lines() {
        match line {
            ListingLine::NewMajor(major) => text.push_str(&format!("New major: {}\n", major)),
            ListingLine::NewMinor(major, minor) => {
                text.push_str(&format!("New minor: {}.{}\n", major, minor))
            }
            ListingLine::Version(version) => text.push_str(&format!(" * {}\n", version.tag)),
        }
    }
    if let Some(last) = listing.max() {
        text.push_str(&format!("\nLast version: {}\n", last.tag));
    }
    text
}
