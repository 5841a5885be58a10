use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Invalid or expired OTP")]
    InvalidOrExpiredCode,

    #[error("Voter not found")]
    IdentityNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Delivery error: {0}")]
    DeliveryError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Stable machine-readable code carried in every error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) | AppError::JwtError(_) => "AUTH_ERROR",
            AppError::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            AppError::IdentityNotFound => "VOTER_NOT_FOUND",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RateLimited(_) => "RATE_LIMITED",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::DeliveryError(_) => "DELIVERY_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Database and internal details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::RateLimited(msg)
            | AppError::ConfigError(msg)
            | AppError::DeliveryError(msg) => msg.clone(),
            AppError::InvalidOrExpiredCode => "Invalid or expired OTP".to_string(),
            AppError::IdentityNotFound => "Voter not found".to_string(),
            AppError::JwtError(_) => "Invalid or expired token".to_string(),
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidOrExpiredCode => {
                StatusCode::BAD_REQUEST
            }
            AppError::AuthError(_) | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::IdentityNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ConfigError(_)
            | AppError::DeliveryError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(msg) => log::warn!("Validation error: {msg}"),
            AppError::AuthError(msg) => log::warn!("Authentication error: {msg}"),
            AppError::RateLimited(msg) => log::warn!("Rate limited: {msg}"),
            AppError::JwtError(err) => log::warn!("JWT error: {err}"),
            AppError::ConfigError(msg) => log::error!("Config error: {msg}"),
            AppError::DeliveryError(msg) => log::error!("Delivery error: {msg}"),
            AppError::DatabaseError(err) => log::error!("Database error: {err}"),
            AppError::InternalError(msg) => log::error!("Internal error: {msg}"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::ValidationError("email is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidOrExpiredCode.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AuthError("missing bearer token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::IdentityNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RateLimited("retry later".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::ConfigError("RESEND_API_KEY is not set".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::DeliveryError("provider rejected request".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = AppError::DatabaseError(sea_orm::DbErr::Custom(
            "connection refused on 10.0.0.3".into(),
        ));
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.message(), "Database error");
    }
}
