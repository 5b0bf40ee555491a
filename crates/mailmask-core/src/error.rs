//! Error types for Mailmask Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Date recognizer failed: {0}")]
    Recognizer(String),

    #[error("Classifier failed: {0}")]
    Classifier(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unknown classification: {0}")]
    UnknownClassification(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::EmptyInput.to_string(), "Input text is empty");
        assert_eq!(
            Error::Recognizer("model not loaded".to_string()).to_string(),
            "Date recognizer failed: model not loaded"
        );
        assert_eq!(
            Error::UnknownClassification("ssn".to_string()).to_string(),
            "Unknown classification: ssn"
        );
    }

    #[test]
    fn test_invalid_pattern_from_regex() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
        assert!(err.to_string().starts_with("Invalid pattern"));
    }
}
