//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! - `IdentityResolver`, `SessionCodec`: 저장소 트레이트 위에서 동작하는 일반 구조체.
//!   `main`에서 생성해 `ServiceLocator::set`으로 등록합니다.
//! - `TokenService`, `OAuthService`: `#[service]` 매크로로 관리되는 싱글톤
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//! use crate::services::auth::{IdentityResolver, TokenService};
//!
//! let resolver = ServiceLocator::get::<IdentityResolver>();
//! let token_service = TokenService::instance();
//! ```

pub mod auth;
