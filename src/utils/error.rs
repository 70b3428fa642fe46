use thiserror::Error;

#[derive(Error, Debug)]
pub enum DinnerError {
    #[error("User {user_id} attempt limit exceeded")]
    QuotaExceeded { user_id: i64 },

    #[error("Food is empty")]
    EmptyCatalog,

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid dish: {message}")]
    InvalidDish { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// The three failure kinds a caller of the engine distinguishes, plus
/// configuration problems raised before the engine exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    QuotaExceeded,
    EmptyCatalog,
    Storage,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DinnerError {
    pub fn storage(message: impl Into<String>) -> Self {
        DinnerError::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DinnerError::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            DinnerError::EmptyCatalog => ErrorKind::EmptyCatalog,
            DinnerError::Storage { .. }
            | DinnerError::IoError(_)
            | DinnerError::CsvError(_)
            | DinnerError::SerializationError(_)
            | DinnerError::InvalidDish { .. } => ErrorKind::Storage,
            DinnerError::ConfigError { .. }
            | DinnerError::InvalidConfigValueError { .. }
            | DinnerError::MissingConfigError { .. } => ErrorKind::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.kind() {
            ErrorKind::QuotaExceeded => ErrorSeverity::Low,
            ErrorKind::EmptyCatalog => ErrorSeverity::High,
            ErrorKind::Storage => ErrorSeverity::Medium,
            ErrorKind::Config => ErrorSeverity::Critical,
        }
    }

    /// Quota exhaustion is expected user behaviour, not an operator problem.
    pub fn is_user_recoverable(&self) -> bool {
        self.kind() == ErrorKind::QuotaExceeded
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::QuotaExceeded => "Request limit reached, try again tomorrow".to_string(),
            ErrorKind::EmptyCatalog | ErrorKind::Storage => {
                "Could not pick a dinner right now".to_string()
            }
            ErrorKind::Config => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::QuotaExceeded => "Wait until older requests leave the 24h window",
            ErrorKind::EmptyCatalog => "Add dishes with known categories to the food catalog",
            ErrorKind::Storage => "Check that the catalog and history files are readable and writable",
            ErrorKind::Config => "Fix the configuration file and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, DinnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_and_csv_errors_are_storage_kind() {
        let io = DinnerError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.kind(), ErrorKind::Storage);
        assert_eq!(DinnerError::storage("disk full").kind(), ErrorKind::Storage);
        assert_eq!(
            DinnerError::InvalidDish {
                message: "bad".to_string()
            }
            .kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_quota_is_low_severity_and_recoverable() {
        let err = DinnerError::QuotaExceeded { user_id: 7 };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.is_user_recoverable());
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_user_messages_hide_internal_details() {
        let err = DinnerError::storage("sqlite: database is locked");
        assert_eq!(err.user_friendly_message(), "Could not pick a dinner right now");
        assert_eq!(
            DinnerError::EmptyCatalog.user_friendly_message(),
            "Could not pick a dinner right now"
        );
    }
}
