use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// 세션 토큰으로 복원된 현재 사용자
///
/// `AuthMiddleware`가 요청 extension에 넣어 두고, 핸들러는 인자로 받아 사용합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 세션 식별자 (사용자 id hex)
    pub user_id: String,

    /// 세션을 만든 로그인 방식
    pub auth_provider: AuthProvider,

    pub user: User,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized("인증되지 않은 요청입니다"))),
        }
    }
}
