//! 세션 토큰 서비스
//!
//! 세션 식별자를 HS256 JWT로 감싸 클라이언트에 전달합니다.
//! 토큰에는 사용자 id만 담기고, 사용자 복원은 `SessionCodec`이 담당합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::{AuthProvider, JwtConfig};
use crate::domain::models::token::token::{SessionClaims, SessionToken};
use crate::errors::{AppError, AppResult, ErrorContext};

pub const TOKEN_TYPE: &str = "Bearer";

/// 세션 JWT 발급/검증 서비스
#[service(name = "token")]
pub struct TokenService {}

impl TokenService {
    /// 세션 식별자로 토큰을 발급합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let session_id = codec.serialize(&user);
    /// let token = TokenService::instance().issue(&session_id, AuthProvider::Local)?;
    /// ```
    pub fn issue(&self, session_id: &str, auth_provider: AuthProvider) -> Result<SessionToken, AppError> {
        let hours = JwtConfig::expiration_hours();
        let claims = new_claims(session_id, auth_provider, hours);
        let access_token = encode_claims(&claims, &JwtConfig::secret())?;

        Ok(SessionToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: hours * 3600,
        })
    }

    /// 토큰 서명과 만료를 검증하고 클레임을 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 잘못된 형식 또는 서명
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode_claims(token, &JwtConfig::secret())
    }
}

/// `Authorization` 헤더 값에서 `Bearer ` 뒤의 토큰만 꺼냅니다.
pub fn bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn new_claims(session_id: &str, auth_provider: AuthProvider, hours: i64) -> SessionClaims {
    let now = Utc::now();
    SessionClaims {
        sub: session_id.to_string(),
        auth_provider,
        iat: now.timestamp(),
        exp: (now + Duration::hours(hours)).timestamp(),
    }
}

fn encode_claims(claims: &SessionClaims, secret: &str) -> AppResult<String> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes()))
        .context("JWT 토큰 생성 실패")
}

fn decode_claims(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::AuthenticationError("토큰이 만료되었습니다".to_string()),
            _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
        })
}
