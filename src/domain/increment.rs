use crate::domain::version::Version;
use crate::error::{GitPlusError, Result};

/// Which version components to increment.
///
/// The flags are independent. Several flags give the result of applying them
/// in the fixed order patch, minor, major, where each higher increment zeroes
/// the components below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionIncrement {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
}

impl VersionIncrement {
    pub fn new(major: bool, minor: bool, patch: bool) -> Self {
        VersionIncrement {
            major,
            minor,
            patch,
        }
    }

    /// True when no component was requested
    pub fn is_empty(&self) -> bool {
        !(self.major || self.minor || self.patch)
    }

    /// Apply the increment to `version` in place.
    ///
    /// Fails, leaving `version` untouched, when a component would overflow.
    /// A component that a higher increment zeroes is never bumped.
    pub fn apply(&self, version: &mut Version) -> Result<()> {
        if self.major {
            version.major = bump(version.major, "major", version)?;
            version.minor = 0;
            version.patch = 0;
        } else if self.minor {
            version.minor = bump(version.minor, "minor", version)?;
            version.patch = 0;
        } else if self.patch {
            version.patch = bump(version.patch, "patch", version)?;
        }
        Ok(())
    }
}

fn bump(value: u64, component: &str, version: &Version) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        GitPlusError::version(format!("{} of {} cannot be incremented", component, version.tag))
    })
}

/// Compute the next version after `current`.
///
/// The prefix of `current` is kept. The suffix is replaced by `suffix`: an
/// empty string yields a tag without `-suffix`.
pub fn next_version(current: &Version, increment: &VersionIncrement, suffix: &str) -> Result<Version> {
    let mut next = current.clone();
    increment.apply(&mut next)?;
    next.suffix = suffix.to_string();
    next.tag = next.to_tag();
    Ok(next)
}
