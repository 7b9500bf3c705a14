//! 신원 인증 서비스 백엔드
//!
//! 로컬(이메일/비밀번호) 가입과 로그인, Facebook/Twitter/Google 페더레이션 로그인을
//! 하나의 사용자 저장소 위에서 처리합니다. 싱글톤 매크로 기반 의존성 주입을 사용합니다.
//!
//! # Features
//!
//! - **로컬 계정**: bcrypt 해시, 이메일 중복 거부, 실패 사유를 구분하지 않는 로그인
//! - **페더레이션 로그인**: 프로바이더 id로 조회 후 없으면 생성
//! - **세션**: 사용자 id만 담은 HS256 JWT, 요청마다 저장소에서 사용자 복원
//! - **MongoDB**: 희소 고유 인덱스로 동시 가입 경쟁 차단
//! - **Redis**: 세션 사용자 캐시, Twitter PKCE verifier 보관
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← Resolution → HTTP 응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← IdentityResolver, SessionCodec, OAuthService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserStore     │ ← MongoDB 리포지토리 / 인메모리 구현
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use identity_auth_service::repositories::users::MemoryUserStore;
//! use identity_auth_service::services::auth::IdentityResolver;
//!
//! let resolver = IdentityResolver::new(Arc::new(MemoryUserStore::new()), 10);
//! let resolution = resolver.register_local("user@example.com", "secret").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
