//! 세션 인증 미들웨어
//!
//! 보호된 스코프에 적용합니다. 인증된 요청만 다음 서비스로 전달됩니다.
//!
//! | 상황                                 | 응답 |
//! |--------------------------------------|------|
//! | 헤더 없음, 잘못된/만료된 토큰        | 401  |
//! | 토큰은 유효하지만 사용자가 없음      | 401  |
//! | 사용자 조회 중 저장소 장애           | 500  |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 인증 필수 미들웨어
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
