//! 인증 요청 DTO
//!
//! 요청 본문 형식만 검사합니다. 이메일 중복이나 비밀번호 일치 여부는
//! `IdentityResolver`가 판단합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 가입/로그인 요청 본문
#[derive(Debug, Deserialize, Validate)]
pub struct LocalCredentialsRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터
///
/// 사용자가 동의를 거부하면 프로바이더는 `code` 없이 `error`만 보냅니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
