use thiserror::Error;

use super::RatingKey;

/// eventease-admin error types
#[derive(Error, Debug)]
pub enum AdminError {
    /// A rating record has no usable numeric score
    #[error("malformed rating #{index} for {key}: score is missing or not a number")]
    MalformedRecord { key: RatingKey, index: usize },

    /// Operation requires a logged-in session
    #[error("not logged in (run `eventease-admin login` first)")]
    NotAuthenticated,

    /// Username or password did not match
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Document does not exist in the collection
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// Record store request failed
    #[error("store error: {0}")]
    Store(String),

    /// Store payload could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for eventease-admin
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdminError::Store("timeout".into());
        assert_eq!(err.to_string(), "store error: timeout");
    }

    #[test]
    fn test_malformed_record_names_triple_and_index() {
        let err = AdminError::MalformedRecord {
            key: RatingKey::new("X", "Y", "Z"),
            index: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("X / Y / Z"));
    }

    #[test]
    fn test_not_found_display() {
        let err = AdminError::NotFound {
            collection: "Supplier".into(),
            id: "abc".into(),
        };
        assert_eq!(err.to_string(), "Supplier/abc not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdminError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
