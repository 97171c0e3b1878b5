//! How `EditorError` reaches the browser.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use super::page;
use crate::types::EditorError;

impl EditorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoWaypoints | Self::MissingUpload(_) | Self::Upload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Yaml(_)
            | Self::Image(_)
            | Self::Csv(_)
            | Self::InvalidMetadata(_)
            | Self::InvalidWaypoint { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the browser.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoWaypoints => "No waypoints to export".to_string(),
            Self::MissingUpload(_) => "Please upload all three files.".to_string(),
            Self::Io(_) => "Internal error while handling the upload.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for EditorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, self.user_message()).into_response()
    }
}

/// Error shown on the upload page rather than as a bare body.
pub struct PageError(pub EditorError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            error!("Upload failed: {}", self.0);
        }
        let html = page::render(Some(&self.0.user_message()), None);
        (status, Html(html)).into_response()
    }
}

impl From<EditorError> for PageError {
    fn from(err: EditorError) -> Self {
        Self(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_content_errors_are_not_server_errors() {
        assert_eq!(EditorError::NoWaypoints.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            EditorError::MissingUpload("csv_file").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EditorError::InvalidMetadata("resolution".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            EditorError::InvalidWaypoint {
                line: 3,
                message: "x".to_string()
            }
            .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            EditorError::Io(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn io_details_stay_on_the_server() {
        let err = EditorError::Io(std::io::Error::other("/tmp/secret/path"));
        assert!(!err.user_message().contains("/tmp/secret"));
        assert_eq!(
            EditorError::MissingUpload("pgm_file").user_message(),
            "Please upload all three files."
        );
    }
}
