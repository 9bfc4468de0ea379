use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;
use strum_macros::AsRefStr;

use crate::model::attendance::Conflict;

/// Machine-readable error kind carried in every error body.
#[derive(Debug, Copy, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    InvalidInput,
    NotFound,
    SchedulingConflict,
    Unauthorized,
    StorageError,
}

#[derive(Debug, Display, Error)]
pub enum AppError {
    #[display(fmt = "{}", message)]
    Validation { message: String },

    #[display(fmt = "{}", message)]
    InvalidInput { message: String },

    #[display(fmt = "{}", message)]
    NotFound { message: String },

    #[display(fmt = "Employees already present at another site on this date")]
    SchedulingConflict { conflicts: Vec<Conflict> },

    #[display(fmt = "Invalid PIN")]
    Unauthorized,

    #[display(fmt = "{}", message)]
    Storage { message: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { message: message.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput { message: message.into() }
    }

    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::NotFound {
            message: format!("{} {} not found", resource, id),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::ValidationError,
            AppError::InvalidInput { .. } => ErrorKind::InvalidInput,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::SchedulingConflict { .. } => ErrorKind::SchedulingConflict,
            AppError::Unauthorized => ErrorKind::Unauthorized,
            AppError::Storage { .. } => ErrorKind::StorageError,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Storage { message: e.to_string() }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage { message: e.to_string() }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::SchedulingConflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let kind = self.kind();
        let body = match self {
            AppError::SchedulingConflict { conflicts } => json!({
                "error": kind.as_ref(),
                "message": "Hay empleados ya registrados como presentes en otra obra en esta fecha",
                "conflictos": conflicts,
            }),
            AppError::Storage { message } => {
                tracing::error!(error = %message, "Storage failure");
                json!({
                    "error": kind.as_ref(),
                    "message": "Internal Server Error",
                })
            }
            other => json!({
                "error": kind.as_ref(),
                "message": other.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_render_as_screaming_snake_case() {
        assert_eq!(ErrorKind::SchedulingConflict.as_ref(), "SCHEDULING_CONFLICT");
        assert_eq!(ErrorKind::ValidationError.as_ref(), "VALIDATION_ERROR");
        assert_eq!(AppError::Unauthorized.kind().as_ref(), "UNAUTHORIZED");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("Obra", 3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::SchedulingConflict { conflicts: vec![] }.status_code(),
            StatusCode::CONFLICT
        );
    }
}
