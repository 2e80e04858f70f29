use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize contacts: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The durable slot holds something that is not a contact collection.
    #[error("Stored contacts under '{key}' are unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A controller operation failed; carries only its category message.
    #[error("{0}")]
    Operation(String),

    #[error("Invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl AppError {
    /// Durable read/write failures, as opposed to caller mistakes.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Serialize(_) | AppError::Corrupt { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_corrupt_error_message() {
        let source = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err = AppError::Corrupt {
            key: "contacts".to_string(),
            source,
        };

        assert!(format!("{}", err).starts_with("Stored contacts under 'contacts' are unreadable: "));
        assert!(err.is_persistence());
    }

    #[test]
    fn confirm_validation_error() {
        let err = AppError::Validation("First name is required".to_string());

        assert_eq!(
            format!("{}", err),
            "Validation failed: First name is required".to_string()
        );
        assert!(!err.is_persistence());
    }

    #[test]
    fn io_errors_convert() {
        let err: AppError = std::io::Error::other("disk full").into();

        assert!(matches!(err, AppError::Io(_)));
        assert!(format!("{}", err).contains("disk full"));
    }
}
