//! Error types for the property layer.

use thiserror::Error;

/// Main error type for property operations.
#[derive(Error, Debug)]
pub enum Error {
    /// `read` called on a property declared without a read operation
    #[error("Property is not readable: {0}")]
    NotReadable(String),

    /// `write` called on a property declared without a write operation
    #[error("Property is not writable: {0}")]
    NotWritable(String),

    /// Carrier holds a different type than the one requested
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Mutable access or move requested from a shared borrow
    #[error("Carrier only holds a shared borrow of {0}")]
    SharedBorrow(String),

    /// Value refused by a custom write operation
    #[error("Value rejected: {0}")]
    Rejected(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a rejection, for use inside custom write operations.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Type mismatch between the requested `T` and what a carrier holds.
    pub(crate) fn mismatch<T: ?Sized>(actual: &str) -> Self {
        Self::TypeMismatch {
            expected: std::any::type_name::<T>().to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for property operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::NotReadable("speed".into());
        assert!(e.to_string().contains("speed"));

        let e = Error::mismatch::<i32>("f32");
        assert!(e.to_string().contains("i32"));
        assert!(e.to_string().contains("f32"));
    }

    #[test]
    fn test_rejected() {
        let e = Error::rejected("out of range");
        assert!(matches!(e, Error::Rejected(ref r) if r == "out of range"));
    }
}
