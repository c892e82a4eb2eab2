//! `git-semver`: list semantic-version tags or create the next one.

use std::io::Write;

use tracing::info;

use crate::domain::{collect_versions, next_version, VersionIncrement};
use crate::error::Result;
use crate::git::Repository;
use crate::ui;

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "git-semver", version, about = "List / update semver tags")]
pub struct SemverArgs {
    #[arg(long, help = "Increase major version")]
    pub major: bool,

    #[arg(long, help = "Increase minor version")]
    pub minor: bool,

    #[arg(long, help = "Increase patch version")]
    pub patch: bool,

    #[arg(long, default_value = "", help = "Suffix (for example v1.2.3-suffix)")]
    pub suffix: String,

    #[arg(long, help = "Print debug logs to stderr")]
    pub verbose: bool,
}

impl SemverArgs {
    pub fn increment(&self) -> VersionIncrement {
        VersionIncrement::new(self.major, self.minor, self.patch)
    }
}

/// What a `git-semver` invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemverOutcome {
    /// The repository has no version tags; nothing was created
    NoTags,
    /// Versions were listed; holds the last one
    Listed { last: String },
    /// A new tag was created
    Created { tag: String },
}

/// List versions, or create the next tag when `increment` is non-empty.
///
/// Non-version tags are reported in `out` and otherwise ignored. A version
/// that cannot be incremented or a failed tag creation is returned as `Err`.
pub fn run_semver<R, W>(
    repo: &R,
    increment: &VersionIncrement,
    suffix: &str,
    out: &mut W,
) -> Result<SemverOutcome>
where
    R: Repository,
    W: Write,
{
    let tags = repo.list_tags()?;
    let listing = collect_versions(&tags);

    for tag in &listing.non_versions {
        writeln!(out, "{}", ui::format_non_version(tag))?;
    }

    let Some(max) = listing.max() else {
        writeln!(out, "No tags")?;
        return Ok(SemverOutcome::NoTags);
    };

    if increment.is_empty() {
        write!(out, "{}", ui::format_listing(&listing))?;
        writeln!(out)?;
        return Ok(SemverOutcome::Listed {
            last: max.tag.clone(),
        });
    }

    let next = next_version(max, increment, suffix)?;
    writeln!(out, "Creating new version/tag: {}", next.tag)?;

    repo.create_tag(&next.tag)?;
    info!(from = %max.tag, to = %next.tag, "version tag created");

    writeln!(out, "Tag {} created, you can push it now", next.tag)?;
    Ok(SemverOutcome::Created { tag: next.tag })
}
