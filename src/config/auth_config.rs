//! # Authentication Configuration Module
//!
//! 세션 JWT, OAuth 클라이언트 자격 증명, 로그인 방식 구분에 필요한 설정을 관리합니다.
//!
//! ## 프로바이더 환경 변수
//!
//! 프로바이더마다 같은 이름 규칙을 씁니다 (`{PREFIX}` = `FACEBOOK`, `TWITTER`, `GOOGLE`).
//!
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_CALLBACK_URL="http://localhost:8080/api/v1/auth/google/callback"
//!
//! # 선택: 엔드포인트 덮어쓰기
//! export GOOGLE_AUTH_URI="..."
//! export GOOGLE_TOKEN_URI="..."
//! export GOOGLE_USERINFO_URI="..."
//!
//! # Facebook 전용: 요청할 Graph API 프로필 필드
//! export FACEBOOK_PROFILE_FIELDS="id,name,first_name,last_name,email"
//! ```
//!
//! ## 세션 토큰
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::AppError;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(24)
    }
}

pub struct OAuthConfig;

impl OAuthConfig {
    /// 로그인 URL 발급부터 콜백까지 허용하는 시간 (PKCE verifier 보관 기간)
    pub fn session_timeout_minutes() -> i64 {
        env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(10)
    }
}

/// Facebook Graph API `/me`에 요청하는 기본 필드
pub const DEFAULT_FACEBOOK_PROFILE_FIELDS: &str = "id,name,first_name,last_name,email";

/// 한 프로바이더의 OAuth 클라이언트 설정
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub provider: OAuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
    pub authorization_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    /// Facebook만 사용
    pub profile_fields: Option<String>,
}

impl OAuthClientConfig {
    pub fn for_provider(provider: OAuthProvider) -> Result<Self, AppError> {
        Self::from_lookup(provider, |key| env::var(key).ok())
    }

    /// 값 조회 함수를 받아 설정을 구성합니다. 필수 값이 없으면 `InternalError`.
    pub fn from_lookup<F>(provider: OAuthProvider, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = provider.env_prefix();
        let defaults = provider.endpoints();

        let required = |suffix: &str| {
            let key = format!("{}_{}", prefix, suffix);
            lookup(&key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
        };
        let optional = |suffix: &str, default: &str| {
            lookup(&format!("{}_{}", prefix, suffix)).unwrap_or_else(|| default.to_string())
        };

        let profile_fields = match provider {
            OAuthProvider::Facebook => Some(optional("PROFILE_FIELDS", DEFAULT_FACEBOOK_PROFILE_FIELDS)),
            _ => None,
        };

        Ok(Self {
            provider,
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            callback_url: required("CALLBACK_URL")?,
            authorization_uri: optional("AUTH_URI", defaults.authorization_uri),
            token_uri: optional("TOKEN_URI", defaults.token_uri),
            userinfo_uri: optional("USERINFO_URI", defaults.userinfo_uri),
            profile_fields,
        })
    }
}

/// 세션이 어떤 방식의 로그인으로 만들어졌는지 (JWT `auth_provider` 클레임)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Facebook,
    Twitter,
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "facebook" => Ok(AuthProvider::Facebook),
            "twitter" => Ok(AuthProvider::Twitter),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Facebook => "facebook",
            AuthProvider::Twitter => "twitter",
            AuthProvider::Google => "google",
        }
    }
}

impl From<OAuthProvider> for AuthProvider {
    fn from(provider: OAuthProvider) -> Self {
        match provider {
            OAuthProvider::Facebook => AuthProvider::Facebook,
            OAuthProvider::Twitter => AuthProvider::Twitter,
            OAuthProvider::Google => AuthProvider::Google,
        }
    }
}
