use crate::domain::version::{parse_tag, ParsedTag, Version};
use tracing::debug;

/// Tags of a repository split into ordered versions and everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionListing {
    /// Ascending by numeric triple; ties keep input order
    pub versions: Vec<Version>,
    /// Tags that are not versions, in input order
    pub non_versions: Vec<String>,
}

/// One line of the human-readable version listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingLine<'a> {
    NewMajor(u64),
    NewMinor(u64, u64),
    Version(&'a Version),
}

/// Parse every tag and order the versions numerically.
pub fn collect_versions<S: AsRef<str>>(tags: &[S]) -> VersionListing {
    let mut listing = VersionListing::default();

    for tag in tags {
        match parse_tag(tag.as_ref()) {
            ParsedTag::Parsed(version) => listing.versions.push(version),
            ParsedTag::Unparsed(raw) => {
                debug!(tag = %raw, "tag is not a version");
                listing.non_versions.push(raw);
            }
        }
    }

    // sort_by is stable
    listing.versions.sort_by(|a, b| a.cmp_numeric(b));
    listing
}

impl VersionListing {
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// The highest version, if any
    pub fn max(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// The highest version, or `default` when there are no versions.
    pub fn max_or(&self, default: Version) -> Version {
        self.max().cloned().unwrap_or(default)
    }

    /// Versions interleaved with markers where major or minor changes.
    pub fn lines(&self) -> Vec<ListingLine<'_>> {
        let mut lines = Vec::with_capacity(self.versions.len());

        for (n, version) in self.versions.iter().enumerate() {
            if n > 0 {
                let previous = &self.versions[n - 1];
                if previous.major != version.major {
                    lines.push(ListingLine::NewMajor(version.major));
                }
                if previous.minor != version.minor {
                    lines.push(ListingLine::NewMinor(version.major, version.minor));
                }
            }
            lines.push(ListingLine::Version(version));
        }

        lines
    }
}
