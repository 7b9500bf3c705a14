//! OAuth 도메인 모델
//!
//! - [`provider`] - 지원 프로바이더와 엔드포인트 표
//! - [`federated_profile`] - 프로바이더 응답 정규화와 계정 필드 추출

pub mod provider;
pub mod federated_profile;

pub use provider::{ClientAuthMethod, OAuthProvider, ProviderEndpoints};
pub use federated_profile::{FederatedCredentials, FederatedProfile};
