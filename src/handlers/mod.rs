//! # HTTP Request Handlers Module
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - IdentityResolver, OAuthService     ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - UserStore 구현                 ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - **`auth`**: 로컬 가입/로그인, 프로바이더 로그인 URL과 콜백
//! - **`users`**: 현재 세션 사용자 조회
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, 거부 사유가 있는
//! 결과(`Resolution::Rejected`)는 에러가 아니라 일반 응답으로 변환합니다.

pub mod users;
pub mod auth;
