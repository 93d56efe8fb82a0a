use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resource not found")]
    NotFound,

    #[error("Unprocessable entity")]
    Unprocessable,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Collapses any failure into a 422, logging what was swallowed.
    pub fn unprocessable(self) -> Self {
        match self {
            AppError::Unprocessable => AppError::Unprocessable,
            other => {
                tracing::warn!("Request could not be processed: {other}");
                AppError::Unprocessable
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound => "Resource not found",
            AppError::Unprocessable => "Unprocessable entity",
            AppError::BadRequest(e) => {
                tracing::info!("Bad request: {e}");
                "Bad request"
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "Internal server error"
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                "Internal server error"
            }
        };
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 404, "message": "Resource not found"})
        );
    }

    #[tokio::test]
    async fn database_error_is_500_without_details() {
        let (status, body) = body_of(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], 500);
    }

    #[tokio::test]
    async fn bad_request_is_400() {
        let (status, body) = body_of(AppError::BadRequest("not json".to_owned())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 400, "message": "Bad request"})
        );
    }

    #[tokio::test]
    async fn everything_collapses_to_unprocessable() {
        for err in [
            AppError::NotFound,
            AppError::BadRequest("missing field `previous_questions`".to_owned()),
            AppError::Database(sqlx::Error::RowNotFound),
            AppError::Internal("boom".to_owned()),
        ] {
            let (status, body) = body_of(err.unprocessable()).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["message"], "Unprocessable entity");
        }
    }
}
