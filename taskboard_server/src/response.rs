use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// A [`taskboard::Error`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub taskboard::Error);

impl From<taskboard::Error> for ApiError {
    fn from(err: taskboard::Error) -> Self {
        Self(err)
    }
}

#[must_use]
pub fn error_status(err: &taskboard::Error) -> StatusCode {
    match err {
        taskboard::Error::Unauthenticated => StatusCode::UNAUTHORIZED,
        taskboard::Error::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        taskboard::Error::NotFound { .. } => StatusCode::NOT_FOUND,
        taskboard::Error::ConstraintViolation(_) => StatusCode::CONFLICT,
        taskboard::Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_status(&self.0);
        let body = match &self.0 {
            taskboard::Error::ValidationFailed { field, message } => json!({
                "error": { "kind": self.0.kind(), "field": field, "message": message }
            }),
            // don't leak driver details to clients
            taskboard::Error::Database(err) => {
                log::error!("database failure: {err}");
                json!({ "error": { "kind": self.0.kind(), "message": "internal error" } })
            }
            other => json!({ "error": { "kind": other.kind(), "message": other.to_string() } }),
        };
        (status, Json(body)).into_response()
    }
}
