//! OAuth 응답 DTO
//!
//! 프로바이더 토큰 엔드포인트 응답과, 클라이언트에 돌려주는 로그인 URL 응답입니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::oauth::provider::OAuthProvider;

/// 토큰 엔드포인트 응답 (RFC 6749 5.1)
///
/// 프로바이더마다 포함하는 필드가 달라 `access_token` 외에는 모두 선택입니다.
#[derive(Debug, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OAuthLoginUrlResponse {
    pub provider: OAuthProvider,
    pub login_url: String,
    /// PKCE를 쓰는 프로바이더에서만 발급되며 콜백에 그대로 돌아옵니다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}
