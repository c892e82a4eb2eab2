use crate::error::{GitPlusError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Git configuration key that turns on output grouping for `git-multi`.
///
/// Set with `git config --global multi.groupbyoutput 1`.
pub const GROUP_BY_OUTPUT_KEY: &str = "multi.groupbyoutput";

/// Name of the per-directory ignore file read by `git-multi`.
pub const IGNORE_FILE_NAME: &str = ".multigit_ignore";

/// Whether `git-multi` groups repositories by identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupByOutput {
    #[default]
    Disabled,
    Enabled,
}

impl GroupByOutput {
    /// Interpret a raw config value. Only `true` and `1` (any case) enable grouping.
    pub fn from_config_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "true" || v == "1" => GroupByOutput::Enabled,
            _ => GroupByOutput::Disabled,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == GroupByOutput::Enabled
    }
}

/// Repository names that `git-multi` skips.
///
/// Names coming from several sources collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated `--except` list
    pub fn from_csv(csv: &str) -> Self {
        let mut set = IgnoreSet::new();
        set.extend(csv.split(','));
        set
    }

    /// Add names, trimming whitespace and dropping empty entries
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.names.insert(name.to_string());
            }
        }
    }

    /// Add every line of the ignore file in `dir`, if the file exists.
    ///
    /// # Returns
    /// * `Ok(true)` - The file existed and was read
    /// * `Ok(false)` - There is no ignore file
    /// * `Err` - The file exists but cannot be read
    pub fn load_ignore_file(&mut self, dir: &Path) -> Result<bool> {
        let path = dir.join(IGNORE_FILE_NAME);
        if !path.is_file() {
            return Ok(false);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            GitPlusError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        self.extend(content.lines());

        debug!(path = %path.display(), "loaded ignore file");
        Ok(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
