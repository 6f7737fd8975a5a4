//! Error types for cell and polygon operations.

use thiserror::Error;

/// Result type for spatial operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors raised by cell hierarchy and polygon operations.
///
/// Most malformed inputs degrade to sentinel values rather than errors
/// (see the [`crate::functions`] surface); the typed layer keeps the
/// distinct variants so callers can tell the degradation paths apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpatialError {
    /// A level argument outside [0, 30], or a parent/child request
    /// outside the id's valid range.
    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    /// Malformed hexadecimal cell token text.
    #[error("Invalid cell token: {0}")]
    InvalidToken(String),

    /// Text that does not match the supported POLYGON((...)) grammar.
    #[error("Geometry parse error: {0}")]
    GeometryParse(String),

    /// Grammatically valid polygon text whose ring is geometrically
    /// unusable. This is the one fatal condition: covering an invalid
    /// ring would be silently wrong.
    #[error("Geometry validation error: {0}")]
    GeometryValidation(String),

    /// A malformed element inside a caller-supplied list argument.
    #[error("Argument cast error: {0}")]
    ArgumentCast(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_detail() {
        let err = SpatialError::InvalidLevel("level 31 out of range [0, 30]".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid level: level 31 out of range [0, 30]"
        );

        let err = SpatialError::GeometryValidation("ring has 2 vertices".to_string());
        assert!(err.to_string().starts_with("Geometry validation error:"));
    }

    #[test]
    fn test_errors_are_comparable() {
        let a = SpatialError::InvalidToken("xyz".to_string());
        let b = SpatialError::InvalidToken("xyz".to_string());
        assert_eq!(a, b);
        assert_ne!(a, SpatialError::InvalidToken("abc".to_string()));
    }
}
