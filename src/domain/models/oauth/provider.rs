//! 페더레이션 로그인 프로바이더 정의
//!
//! 프로바이더마다 달라지는 값(엔드포인트, 스코프, 클라이언트 인증 방식,
//! 사용자 문서의 필드 경로)을 한 곳에 모아 둡니다. 나머지 로그인 흐름은
//! 모두 [`OAuthProvider`]를 매개변수로 받는 하나의 구현을 공유합니다.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Facebook,
    Twitter,
    Google,
}

/// 토큰 엔드포인트에 클라이언트 자격 증명을 보내는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// `client_id`, `client_secret`을 폼 본문에 포함
    Form,
    /// HTTP Basic 인증 헤더 사용
    Basic,
}

/// 프로바이더 기본 엔드포인트. 환경 변수로 덮어쓸 수 있습니다.
#[derive(Debug)]
pub struct ProviderEndpoints {
    pub authorization_uri: &'static str,
    pub token_uri: &'static str,
    pub userinfo_uri: &'static str,
    pub scopes: &'static [&'static str],
    pub scope_separator: &'static str,
    pub client_auth: ClientAuthMethod,
    pub uses_pkce: bool,
}

static FACEBOOK: ProviderEndpoints = ProviderEndpoints {
    authorization_uri: "https://www.facebook.com/v24.0/dialog/oauth",
    token_uri: "https://graph.facebook.com/v24.0/oauth/access_token",
    userinfo_uri: "https://graph.facebook.com/me",
    scopes: &["email", "public_profile"],
    scope_separator: ",",
    client_auth: ClientAuthMethod::Form,
    uses_pkce: false,
};

static TWITTER: ProviderEndpoints = ProviderEndpoints {
    authorization_uri: "https://x.com/i/oauth2/authorize",
    token_uri: "https://api.x.com/2/oauth2/token",
    userinfo_uri: "https://api.x.com/2/users/me",
    scopes: &["users.read", "tweet.read"],
    scope_separator: " ",
    client_auth: ClientAuthMethod::Basic,
    uses_pkce: true,
};

static GOOGLE: ProviderEndpoints = ProviderEndpoints {
    authorization_uri: "https://accounts.google.com/o/oauth2/auth",
    token_uri: "https://oauth2.googleapis.com/token",
    userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo",
    scopes: &["openid", "email", "profile"],
    scope_separator: " ",
    client_auth: ClientAuthMethod::Form,
    uses_pkce: false,
};

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 3] = [
        OAuthProvider::Facebook,
        OAuthProvider::Twitter,
        OAuthProvider::Google,
    ];

    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(OAuthProvider::Facebook),
            "twitter" => Ok(OAuthProvider::Twitter),
            "google" => Ok(OAuthProvider::Google),
            _ => Err(AppError::ValidationError(format!("Unsupported login provider: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Facebook => "facebook",
            OAuthProvider::Twitter => "twitter",
            OAuthProvider::Google => "google",
        }
    }

    /// 사용자 문서에서 이 프로바이더 id가 저장되는 필드 경로 (`google.id`)
    pub fn id_field(&self) -> &'static str {
        match self {
            OAuthProvider::Facebook => "facebook.id",
            OAuthProvider::Twitter => "twitter.id",
            OAuthProvider::Google => "google.id",
        }
    }

    /// 설정 환경 변수 접두사 (`GOOGLE_CLIENT_ID`의 `GOOGLE`)
    pub fn env_prefix(&self) -> &'static str {
        match self {
            OAuthProvider::Facebook => "FACEBOOK",
            OAuthProvider::Twitter => "TWITTER",
            OAuthProvider::Google => "GOOGLE",
        }
    }

    pub fn endpoints(&self) -> &'static ProviderEndpoints {
        match self {
            OAuthProvider::Facebook => &FACEBOOK,
            OAuthProvider::Twitter => &TWITTER,
            OAuthProvider::Google => &GOOGLE,
        }
    }
}

impl std::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
