use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dinho_shared::Error;
use serde_json::json;

/// Handler error rendered as `{"error": kind, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Validation(_) | Error::Fields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::TransientIo(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self(Error::Validation(value.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self(Error::Validation(value.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = ?self.0, "request failed");
            match &self.0 {
                Error::Unknown(_) => "internal server error".to_owned(),
                other => other.to_string(),
            }
        } else {
            self.0.to_string()
        };

        let body = json!({
            "error": self.0.kind(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
