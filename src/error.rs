use thiserror::Error;

/// Unified error type for mvn-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Missing dependency: {0}")]
    Dependency(String),

    #[error("Working tree check failed: {0}")]
    WorkingTree(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("Build tool invocation failed: {0}")]
    BuildTool(String),

    #[error("Release step failed: {0}")]
    Step(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in mvn-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a missing-dependency error with context
    pub fn dependency(msg: impl Into<String>) -> Self {
        ReleaseError::Dependency(msg.into())
    }

    /// Create a working-tree error with context
    pub fn worktree(msg: impl Into<String>) -> Self {
        ReleaseError::WorkingTree(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a git error with context
    pub fn git(msg: impl Into<String>) -> Self {
        ReleaseError::Git(msg.into())
    }

    /// Create a build-tool error with context
    pub fn build_tool(msg: impl Into<String>) -> Self {
        ReleaseError::BuildTool(msg.into())
    }

    /// Create a release-step error with context
    pub fn step(msg: impl Into<String>) -> Self {
        ReleaseError::Step(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}
