//! 애플리케이션 전역 에러 타입
//!
//! 저장소, 캐시, 외부 OAuth 프로바이더, 토큰 처리에서 발생하는 모든 실패를
//! 하나의 [`AppError`]로 모읍니다. 핸들러에서 그대로 반환하면
//! `actix_web::ResponseError` 구현을 통해 JSON 에러 응답으로 변환됩니다.
//!
//! 로그인 거부(이메일 중복, 잘못된 자격 증명)는 에러가 아닙니다.
//! 그런 경우는 [`Resolution::Rejected`](crate::domain::models::auth::resolution::Resolution)
//! 로 전달되고, 이 타입은 복구할 수 없는 실패만 표현합니다.
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let user = store.find_by_local_email(email).await?;
//! let user = user.ok_or_else(|| AppError::NotFound("user".to_string()))?;
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 조회/쓰기 실패 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 실패 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 요청 형식 오류 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 저장소 고유 제약 위반 (409)
    ///
    /// `local.email` 또는 `<provider>.id` 고유 인덱스에 걸린 경우입니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// OAuth 프로바이더 호출 실패 (502)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// JSON 응답의 `error` 필드에 들어가는 기계 판독용 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::RedisError(_) => "cache_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "authentication_failed",
            AppError::AuthorizationError(_) => "forbidden",
            AppError::ExternalServiceError(_) => "provider_error",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // 내부 저장소 메시지는 로그에만 남기고 클라이언트에는 노출하지 않음
        let message = match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                log::error!("❌ {}", self);
                "서버 내부 오류가 발생했습니다".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.error_code(),
            "message": message,
        }))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::ExternalServiceError(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("password hashing failed: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러에 문맥을 붙여 `InternalError`로 변환하는 확장 trait
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
