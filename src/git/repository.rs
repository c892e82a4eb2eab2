use crate::error::{GitPlusError, Result};
use git2::{Repository as Git2Repo, StatusOptions};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path)
            .map_err(|e| GitPlusError::NotARepository(format!("{}: {}", path.display(), e)))?;

        debug!(path = %repo.path().display(), "opened repository");
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| GitPlusError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| GitPlusError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        debug!(tag = name, commit = %head.id(), "created tag");
        Ok(())
    }

    fn is_changed(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?;
        lookup(&config, key)
    }
}

/// Read a configuration value from the global/system/XDG configuration.
///
/// Used when no repository is at hand, e.g. from a directory holding many
/// repositories.
pub fn read_global_config_value(key: &str) -> Result<Option<String>> {
    let config = git2::Config::open_default()?;
    lookup(&config, key)
}

fn lookup(config: &git2::Config, key: &str) -> Result<Option<String>> {
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
