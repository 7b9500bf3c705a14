//! 인증 서비스 모듈
//!
//! # Features
//!
//! - 로컬 가입/로그인과 페더레이션 로그인의 사용자 해석 (`IdentityResolver`)
//! - 세션 식별자 직렬화/복원 (`SessionCodec`)
//! - 세션 JWT 발급/검증 (`TokenService`)
//! - Facebook, Twitter, Google OAuth 2.0 흐름 (`OAuthService`, Twitter는 PKCE)
//!
//! # Examples
//!
//! ```rust,ignore
//! let resolver = ServiceLocator::get::<IdentityResolver>();
//! match resolver.login_local(&email, &password).await? {
//!     Resolution::Authenticated(user) => { /* 세션 발급 */ }
//!     Resolution::Rejected(reason) => { /* reason.message() 표시 */ }
//! }
//! ```

pub mod identity_resolver;
pub mod session_codec;
pub mod token_service;
pub mod oauth_service;
pub mod pkce;

pub use identity_resolver::IdentityResolver;
pub use session_codec::SessionCodec;
pub use token_service::TokenService;
pub use oauth_service::OAuthService;
