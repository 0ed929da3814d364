//! Error types for moodtune-client
//!
//! Every failure is caught at the session boundary and turned into one
//! user-facing message via `user_message()`. `Display` keeps the detail for
//! logs.

use moodtune_common::api::GENERIC_FAILURE_MESSAGE;
use thiserror::Error;

/// Selection-time errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Declared content type is not `image/*`
    #[error("Invalid file type: {content_type:?}")]
    InvalidFileType { content_type: String },

    /// Preview encoding task did not complete
    #[error("Preview decode failed: {0}")]
    PreviewFailed(String),
}

impl SelectionError {
    pub fn user_message(&self) -> String {
        match self {
            SelectionError::InvalidFileType { .. } => "Please select a valid image file.".to_string(),
            SelectionError::PreviewFailed(_) => "Could not read the selected image.".to_string(),
        }
    }
}

/// Submission errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Network/connection failure, or the body could not be read
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// Non-2xx status or `success != true`
    #[error("Server failure ({status}): {message}")]
    ServerFailure { status: u16, message: String },
}

impl UploadError {
    /// Message shown in the error slot
    pub fn user_message(&self) -> String {
        match self {
            UploadError::TransportFailure(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            UploadError::ServerFailure { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_uses_generic_message() {
        let err = UploadError::TransportFailure("connection refused".to_string());
        assert_eq!(err.user_message(), "Failed to get recommendations");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_server_failure_carries_message() {
        let err = UploadError::ServerFailure {
            status: 400,
            message: "no face detected".to_string(),
        };
        assert_eq!(err.user_message(), "no face detected");
    }
}
