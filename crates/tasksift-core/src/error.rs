//! Error types for Tasksift

use thiserror::Error;

/// Result type alias using Tasksift's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Tasksift error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown search attribute '{0}'. Run `tasksift attributes` to see all attributes.")]
    UnknownAttribute(String),

    // Generic errors
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatabaseError(_) => "E400",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::UnknownAttribute(_) => "E801",
            Self::Other(_) | Self::Io(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DatabaseError(_) => Some("tasksift doctor".to_string()),
            Self::ConfigError(_) => Some("tasksift config list".to_string()),
            Self::UnknownAttribute(_) => Some("tasksift attributes".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let error = Error::InvalidInput("'#abc' is not a task id".to_string());
        assert_eq!(error.code(), "E800");
        assert_eq!(error.suggestion(), None);
        assert!(error.to_string().contains("#abc"));
    }

    #[test]
    fn test_unknown_attribute_error() {
        let error = Error::UnknownAttribute("colour".to_string());
        assert_eq!(error.code(), "E801");
        assert_eq!(error.suggestion(), Some("tasksift attributes".to_string()));
        assert!(error.to_string().contains("colour"));
    }

    #[test]
    fn test_database_error_from_sqlx() {
        let error: Error = sqlx::Error::RowNotFound.into();
        assert_eq!(error.code(), "E400");
        assert_eq!(error.suggestion(), Some("tasksift doctor".to_string()));
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing config");
        let error: Error = io.into();
        assert_eq!(error.code(), "E9999");
        assert_eq!(error.to_string(), "missing config");
    }
}
