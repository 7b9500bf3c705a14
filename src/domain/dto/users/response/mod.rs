//! 응답 DTO

pub mod user_response;
pub mod oauth_response;

pub use user_response::{AuthResponse, LinkedAccountResponse, UserResponse};
pub use oauth_response::{OAuthLoginUrlResponse, ProviderTokenResponse};
