use crate::error::{GitPlusError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
#[derive(Default)]
pub struct MockRepository {
    tags: RefCell<Vec<String>>,
    changed: bool,
    config: HashMap<String, String>,
    create_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository holding the given tags
    pub fn with_tags<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        MockRepository {
            tags: RefCell::new(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Mark the working tree as having uncommitted changes
    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Set a configuration value
    pub fn set_config(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Make every subsequent `create_tag` fail with `message`
    pub fn fail_create_tag(&mut self, message: impl Into<String>) {
        self.create_error = Some(message.into());
    }

    /// Snapshot of the current tags, including created ones
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if let Some(message) = &self.create_error {
            return Err(GitPlusError::tag(message.clone()));
        }
        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t == name) {
            return Err(GitPlusError::tag(format!("tag '{}' already exists", name)));
        }
        tags.push(name.to_string());
        Ok(())
    }

    fn is_changed(&self) -> Result<bool> {
        Ok(self.changed)
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(key).cloned())
    }
}
