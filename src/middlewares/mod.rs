//! 미들웨어 모듈
//!
//! # 인증 미들웨어 (AuthMiddleware)
//!
//! - `Authorization: Bearer <token>` 헤더에서 세션 토큰 추출 및 검증
//! - `SessionCodec`으로 사용자 복원
//! - `AuthenticatedUser`를 request extension에 저장
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/api/v1/me")
//!     .wrap(AuthMiddleware::required())
//!     .service(get_current_user);
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
