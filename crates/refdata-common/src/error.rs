//! Error types shared across refdata crates

use thiserror::Error;

/// Result type alias for refdata setup operations
pub type Result<T> = std::result::Result<T, RefdataError>;

/// Errors raised while configuring or bootstrapping an ingestion run
#[derive(Error, Debug)]
pub enum RefdataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl RefdataError {
    /// Build an [`RefdataError::InvalidSetting`] for a named key
    pub fn invalid_setting(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let err = RefdataError::invalid_setting("LOG_LEVEL", "loud", "unknown level");
        assert_eq!(
            err.to_string(),
            "Invalid value for LOG_LEVEL: \"loud\" (unknown level)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RefdataError = io.into();
        assert!(matches!(err, RefdataError::Io(_)));
    }
}
