use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to read request body: {0}")]
    BodyRejected(#[from] BytesRejection),

    #[error("TTS synthesis failed")]
    SynthesisFailed,

    #[error("Failed to read generated audio: {0}")]
    FileRead(#[source] std::io::Error),

    #[error("Unexpected error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid request", msg.clone())
            }
            AppError::BodyRejected(rejection) => {
                (rejection.status(), "Invalid request", rejection.body_text())
            }
            AppError::SynthesisFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TTS synthesis failed",
                "Failed to generate audio file".to_string(),
            ),
            AppError::FileRead(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "File read error",
                "Failed to read generated audio file".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "An unexpected error occurred".to_string(),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "The requested endpoint does not exist".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed",
                "The HTTP method is not allowed for this endpoint".to_string(),
            ),
        };

        // Details stay in the log; the client only sees the generic message.
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_request_keeps_message() {
        let (status, body) = render(AppError::InvalidRequest("Text is empty".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request");
        assert_eq!(body["message"], "Text is empty");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) = render(AppError::Internal("task panicked at foo.rs".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(!body.to_string().contains("foo.rs"));
    }

    #[tokio::test]
    async fn test_file_read_is_distinct_from_synthesis_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let (read_status, read_body) = render(AppError::FileRead(io)).await;
        let (synth_status, synth_body) = render(AppError::SynthesisFailed).await;

        assert_eq!(read_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(synth_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_body["error"], "File read error");
        assert_eq!(synth_body["error"], "TTS synthesis failed");
    }
}
