use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Optional non-numeric prefix, `major.minor.patch`, then an optional `-suffix`.
///
/// Not anchored at the end: trailing text that does not start with `-` is
/// tolerated and ignored.
const TAG_PATTERN: &str = r"^(?P<prefix>\D*)(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:-(?P<suffix>.*))?";

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TAG_PATTERN).expect("tag pattern is a valid regex"))
}

/// A semantic version parsed from a repository tag.
///
/// `prefix` and `suffix` are carried along for display and for building new
/// tags, but ordering only ever looks at `(major, minor, patch)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// The tag exactly as it appears in the repository
    pub tag: String,
    pub prefix: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: String,
}

/// Outcome of parsing one tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTag {
    Parsed(Version),
    Unparsed(String),
}

impl Version {
    /// Create a version whose `tag` is generated from its parts
    pub fn new(
        prefix: impl Into<String>,
        major: u64,
        minor: u64,
        patch: u64,
        suffix: impl Into<String>,
    ) -> Self {
        let mut version = Version {
            tag: String::new(),
            prefix: prefix.into(),
            major,
            minor,
            patch,
            suffix: suffix.into(),
        };
        version.tag = version.to_tag();
        version
    }

    /// `v0.0.0`, the version assumed when a repository has no tags yet.
    pub fn initial() -> Self {
        Version::new("v", 0, 0, 0, "")
    }

    /// Parse a version, returning `None` when the tag is not a version.
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = tag_regex().captures(tag)?;

        let major = caps["major"].parse::<u64>().ok()?;
        let minor = caps["minor"].parse::<u64>().ok()?;
        let patch = caps["patch"].parse::<u64>().ok()?;
        let suffix = caps
            .name("suffix")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(Version {
            tag: tag.to_string(),
            prefix: caps["prefix"].to_string(),
            major,
            minor,
            patch,
            suffix,
        })
    }

    /// The numeric ordering key
    pub fn key(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Compare two versions by their numeric triple only
    pub fn cmp_numeric(&self, other: &Version) -> Ordering {
        self.key().cmp(&other.key())
    }

    /// Build a tag string from the current fields.
    ///
    /// Format: `prefix + major.minor.patch`, plus `-suffix` when the suffix is non-empty.
    pub fn to_tag(&self) -> String {
        let mut tag = format!("{}{}.{}.{}", self.prefix, self.major, self.minor, self.patch);
        if !self.suffix.is_empty() {
            tag.push('-');
            tag.push_str(&self.suffix);
        }
        tag
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Parse a tag into a [`ParsedTag`]. Non-matching tags are not errors.
pub fn parse_tag(tag: &str) -> ParsedTag {
    match Version::parse(tag) {
        Some(version) => ParsedTag::Parsed(version),
        None => ParsedTag::Unparsed(tag.to_string()),
    }
}
