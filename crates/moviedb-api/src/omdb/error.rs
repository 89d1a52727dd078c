//! OMDb error types.

use thiserror::Error;

/// Errors returned by OMDb API operations.
///
/// The `Display` output is the message shown to the user when a request
/// fails, so service messages are passed through verbatim.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// The request could not be sent or the response could not be read.
    ///
    /// The wrapped error never carries the request URL, which contains the
    /// API key.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered but reported a failure (bad key, too many
    /// results, malformed payload, non-2xx status).
    #[error("{0}")]
    Service(String),

    /// No title exists for the requested identifier.
    #[error("movie not found: {0}")]
    NotFound(String),
}

impl OmdbError {
    /// Wraps a transport error, stripping the URL so the key is not leaked.
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

/// Result alias for OMDb operations.
pub type Result<T> = std::result::Result<T, OmdbError>;

/// Returned when a category filter name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category filter: {0} (expected all, movie, or series)")]
pub struct ParseFilterError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_displays_message_verbatim() {
        // Arrange
        let err = OmdbError::Service(String::from("Invalid API key!"));

        // Act
        let message = err.to_string();

        // Assert
        assert_eq!(message, "Invalid API key!");
    }

    #[test]
    fn test_not_found_names_identifier() {
        // Arrange
        let err = OmdbError::NotFound(String::from("tt0000000"));

        // Act & Assert
        assert_eq!(err.to_string(), "movie not found: tt0000000");
    }

    #[test]
    fn test_parse_filter_error_message() {
        // Arrange
        let err = ParseFilterError(String::from("episode"));

        // Act & Assert
        assert!(err.to_string().contains("episode"));
        assert!(err.to_string().contains("expected all, movie, or series"));
    }
}
