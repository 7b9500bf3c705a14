//! Authentication HTTP Handlers
//!
//! 로컬 가입/로그인과 페더레이션 로그인 엔드포인트입니다.
//! 성공하면 세션 토큰과 사용자 정보를 함께 돌려줍니다.
//!
//! # Endpoints
//!
//! | 메서드 | 경로                              | 성공 | 거부 |
//! |--------|-----------------------------------|------|------|
//! | `POST` | `/auth/register`                  | 201  | 409  |
//! | `POST` | `/auth/login`                     | 200  | 401  |
//! | `GET`  | `/auth/{provider}/login`          | 200  | -    |
//! | `GET`  | `/auth/{provider}/callback`       | 200  | 401  |
//!
//! 거부 응답 본문은 `{"error", "message", "flash"}` 형태이며 `message`는 사용자에게
//! 그대로 보여줄 문구입니다.
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::AuthProvider;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::users::request::{LocalCredentialsRequest, OAuthCallbackQuery};
use crate::domain::dto::users::response::{AuthResponse, UserResponse};
use crate::domain::entities::users::user::User;
use crate::domain::models::auth::resolution::{Rejection, Resolution};
use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::AppError;
use crate::services::auth::{IdentityResolver, OAuthService, SessionCodec, TokenService};

/// 거부 사유를 HTTP 응답으로 변환
pub fn rejection_response(rejection: Rejection) -> HttpResponse {
    let mut builder = match rejection {
        Rejection::EmailTaken => HttpResponse::Conflict(),
        Rejection::InvalidCredentials => HttpResponse::Unauthorized(),
    };

    builder.json(json!({
        "error": rejection.code(),
        "message": rejection.message(),
        "flash": rejection.flash_key(),
    }))
}

/// 사용자에게 세션 토큰을 발급하고 응답 본문을 만듭니다.
fn issue_session(user: &User, auth_provider: AuthProvider) -> Result<AuthResponse, AppError> {
    let session_id = ServiceLocator::get::<SessionCodec>().serialize(user);
    let session = TokenService::instance().issue(&session_id, auth_provider)?;

    Ok(AuthResponse {
        user: UserResponse::from(user),
        session,
    })
}

/// 로컬 가입
///
/// # Endpoint
/// `POST /auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<LocalCredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let resolver = ServiceLocator::get::<IdentityResolver>();

    match resolver.register_local(&payload.email, &payload.password).await? {
        Resolution::Authenticated(user) => {
            let body = issue_session(&user, AuthProvider::Local)?;
            Ok(HttpResponse::Created().json(body))
        }
        Resolution::Rejected(reason) => Ok(rejection_response(reason)),
    }
}

/// 로컬 로그인
///
/// # Endpoint
/// `POST /auth/login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LocalCredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let resolver = ServiceLocator::get::<IdentityResolver>();

    match resolver.login_local(&payload.email, &payload.password).await? {
        Resolution::Authenticated(user) => {
            let body = issue_session(&user, AuthProvider::Local)?;
            Ok(HttpResponse::Ok().json(body))
        }
        Resolution::Rejected(reason) => Ok(rejection_response(reason)),
    }
}

/// 프로바이더 로그인 URL 발급
///
/// # Endpoint
/// `GET /auth/{provider}/login`
#[get("/{provider}/login")]
pub async fn provider_login_url(
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = OAuthProvider::from_str(&path)?;
    let response = OAuthService::instance().login_url(provider).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 프로바이더 콜백
///
/// 인가 코드를 교환해 프로필을 받고, 프로바이더 id로 사용자를 찾거나 만듭니다.
///
/// # Endpoint
/// `GET /auth/{provider}/callback?code=...&state=...`
#[get("/{provider}/callback")]
pub async fn provider_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = OAuthProvider::from_str(&path)?;

    // 사용자가 동의를 거부했거나 프로바이더가 에러를 돌려준 경우
    if let Some(error) = &query.error {
        let error_msg = query.error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("{} OAuth 에러: {} - {}", provider, error, error_msg);
        return Err(AppError::AuthenticationError(error_msg.to_string()));
    }

    let code = query.code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::ValidationError("인증 코드가 필요합니다".to_string()))?;

    let (credentials, profile) = OAuthService::instance()
        .authenticate(provider, code, query.state.as_deref())
        .await?;

    let user = ServiceLocator::get::<IdentityResolver>()
        .resolve_federated(provider, &credentials, &profile)
        .await?;

    let body = issue_session(&user, AuthProvider::from(provider))?;
    Ok(HttpResponse::Ok().json(body))
}
