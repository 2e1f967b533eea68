//! Error types and result aliases for the visionlab library.
//!
//! This module defines the core error type [`VisionLabError`] and the [`Result`] type alias
//! used throughout the library. All public APIs that can fail return `Result<T>` for
//! consistent error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionLabError {
    /// The selected file's media type does not start with `image/`.
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// A submission was attempted with no prompt text and no image.
    #[error("Nothing to analyze: provide a prompt or an image")]
    EmptyRequest,

    /// The remote service rejected the request and supplied its own message.
    /// The inner string is surfaced to the user verbatim.
    #[error("API error: {0}")]
    ApiError(String),

    /// The remote exchange failed without a usable remote message.
    #[error("Analysis gateway error: {0}")]
    GatewayError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, VisionLabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_type_display() {
        let err = VisionLabError::InvalidFileType("text/plain".to_string());
        assert_eq!(err.to_string(), "Invalid file type: text/plain");
    }

    #[test]
    fn test_empty_request_display() {
        let err = VisionLabError::EmptyRequest;
        assert_eq!(err.to_string(), "Nothing to analyze: provide a prompt or an image");
    }

    #[test]
    fn test_api_error_display() {
        let err = VisionLabError::ApiError("rate limit exceeded".to_string());
        assert_eq!(err.to_string(), "API error: rate limit exceeded");
    }

    #[test]
    fn test_gateway_error_display() {
        let err = VisionLabError::GatewayError("connection refused".to_string());
        assert_eq!(err.to_string(), "Analysis gateway error: connection refused");
    }

    #[test]
    fn test_config_error_display() {
        let err = VisionLabError::ConfigError("missing API key".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: missing API key");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: VisionLabError = json_err.into();

        match err {
            VisionLabError::SerializationError(_) => {}
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VisionLabError = io_err.into();

        match err {
            VisionLabError::IoError(_) => {}
            _ => panic!("Expected IoError"),
        }
    }

    #[test]
    fn test_error_debug() {
        let err = VisionLabError::EmptyRequest;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("EmptyRequest"));
    }
}
