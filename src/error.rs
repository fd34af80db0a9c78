use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("{context}: {message}")]
    Remote { context: String, message: String },

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Invalid release: {0}")]
    Validation(String),

    #[error("no previous release")]
    NoPreviousRelease,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a remote error, `context` naming the failed operation
    pub fn remote(context: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::Remote {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an editor error with context
    pub fn editor(msg: impl Into<String>) -> Self {
        ReleaseError::Editor(msg.into())
    }

    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseError::Validation(msg.into())
    }
}
