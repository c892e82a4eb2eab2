//! Git operations abstraction layer
//!
//! The [Repository] trait covers the handful of repository queries the tools
//! need: listing and creating tags, checking for uncommitted changes and
//! reading a configuration value.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for tests
//!
//! ```rust
//! # use git_plus::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_plus::Result<()> {
//! for tag in repo.list_tags()? {
//!     println!("{}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::{read_global_config_value, Git2Repository};

use crate::error::Result;

/// Common git operation trait for abstraction
pub trait Repository {
    /// Get all tag names in the repository
    ///
    /// Order is unspecified; callers sort as needed.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create a lightweight tag on the current HEAD commit
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err` - If the tag already exists, HEAD is unborn, or another git error occurs
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Whether the working tree has uncommitted changes (untracked files included)
    fn is_changed(&self) -> Result<bool>;

    /// Read a single configuration value, `None` when the key is not set
    fn config_value(&self, key: &str) -> Result<Option<String>>;
}
