//! 신원 확인 결과
//!
//! 로컬 가입/로그인은 세 가지 결과 중 하나로 끝납니다.
//!
//! - `Ok(Resolution::Authenticated(user))` - 성공
//! - `Ok(Resolution::Rejected(reason))` - 사용자에게 보여줄 사유가 있는 거부
//! - `Err(AppError)` - 저장소 장애 등 복구 불가능한 실패

use crate::domain::entities::users::user::User;

#[derive(Debug)]
pub enum Resolution {
    Authenticated(User),
    Rejected(Rejection),
}

/// 사용자에게 그대로 노출되는 거부 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// 이미 로컬 계정으로 가입된 이메일
    EmailTaken,
    /// 없는 이메일이거나 비밀번호 불일치. 두 경우를 구분하지 않습니다.
    InvalidCredentials,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::EmailTaken => "That email is already taken.",
            Rejection::InvalidCredentials => "Invalid credentials.",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rejection::EmailTaken => "email_taken",
            Rejection::InvalidCredentials => "invalid_credentials",
        }
    }

    /// 메시지를 표시할 화면 구분 (가입 폼 / 로그인 폼)
    pub fn flash_key(&self) -> &'static str {
        match self {
            Rejection::EmailTaken => "registerMessage",
            Rejection::InvalidCredentials => "loginMessage",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Resolution {
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Resolution::Authenticated(_) => None,
            Resolution::Rejected(reason) => Some(*reason),
        }
    }
}
