use thiserror::Error;

/// Unified error type for git-plus operations
#[derive(Error, Debug)]
pub enum GitPlusError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Not in a git repository: {0}")]
    NotARepository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-plus
pub type Result<T> = std::result::Result<T, GitPlusError>;

impl GitPlusError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitPlusError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitPlusError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitPlusError::Tag(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        GitPlusError::Command(msg.into())
    }
}
