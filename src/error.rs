use thiserror::Error;

/// Unified error type for smartcommit operations
#[derive(Error, Debug)]
pub enum SmartCommitError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in smartcommit
pub type Result<T> = std::result::Result<T, SmartCommitError>;

impl SmartCommitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SmartCommitError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SmartCommitError::Version(msg.into())
    }

    /// Create a changelog error with context
    pub fn changelog(msg: impl Into<String>) -> Self {
        SmartCommitError::Changelog(msg.into())
    }

    /// Create a precondition error with context
    pub fn precondition(msg: impl Into<String>) -> Self {
        SmartCommitError::Precondition(msg.into())
    }

    /// Create an environment error with context
    pub fn environment(msg: impl Into<String>) -> Self {
        SmartCommitError::Environment(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SmartCommitError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SmartCommitError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (SmartCommitError::config("x"), "Configuration error"),
            (SmartCommitError::version("x"), "Version parsing error"),
            (SmartCommitError::changelog("x"), "Changelog error"),
            (SmartCommitError::precondition("x"), "Precondition failed"),
            (SmartCommitError::environment("x"), "Environment error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_from_git2() {
        let git_err = git2::Error::from_str("not a repository");
        let err: SmartCommitError = git_err.into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.to_string().contains("not a repository"));
    }

    #[test]
    fn test_precondition_keeps_message() {
        let err = SmartCommitError::precondition("No staged changes found");
        assert!(err.to_string().contains("No staged changes found"));
    }
}
