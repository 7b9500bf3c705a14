//! 인증 도메인 모델

pub mod authenticated_user;
pub mod resolution;

pub use authenticated_user::AuthenticatedUser;
pub use resolution::{Rejection, Resolution};
