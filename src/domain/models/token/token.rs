//! 세션 JWT 클레임과 클라이언트에 전달되는 세션 토큰

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 세션 토큰의 클레임
///
/// - `sub`: 세션 식별자 (`SessionCodec::serialize` 결과)
/// - `auth_provider`: 세션을 만든 로그인 방식
/// - `iat` / `exp`: 발급/만료 시각 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub auth_provider: AuthProvider,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct SessionToken {
    pub access_token: String,
    pub token_type: &'static str,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}
