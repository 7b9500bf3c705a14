//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한 곳에서 제공합니다. 설정 구조체는 상태가 없는
//! 유닛 구조체이고, 각 함수가 호출 시점의 환경 변수를 읽습니다.
//!
//! - [`data_config`] - 실행 환경, bcrypt cost, 서버 바인딩, CORS
//! - [`auth_config`] - 세션 JWT, OAuth 클라이언트, 로그인 방식
//!
//! `.env`, `.env.dev`, `.env.prod` 파일은 `main`에서 `PROFILE` 값에 따라 로드됩니다.
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, OAuthClientConfig};
//! use crate::domain::models::oauth::provider::OAuthProvider;
//!
//! let bind = ServerConfig::bind_address();
//! let google = OAuthClientConfig::for_provider(OAuthProvider::Google)?;
//! ```
//!
//! ### 데이터 스토어
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="identity_auth_dev"
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
