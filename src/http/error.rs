use axum::extract::multipart::MultipartError;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::utils::error::ConvertError;

/// Structured JSON error response: `{"error": "..."}`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match &err {
            ConvertError::NotFoundError { message } => Self::not_found(message.clone()),
            e if e.is_client_error() => Self::bad_request(e.to_string()),
            e => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                Self::internal(e.to_string())
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

// 抽取器的拒絕也輸出 JSON 格式
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let parse = AppError::from(ConvertError::ParseError {
            line: 1,
            message: "unterminated quoted field".to_string(),
        });
        assert_eq!(parse.status(), StatusCode::BAD_REQUEST);

        let missing = AppError::from(ConvertError::NotFoundError {
            message: "nothing yet".to_string(),
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let io = AppError::from(ConvertError::IoError(std::io::Error::other("disk full")));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
