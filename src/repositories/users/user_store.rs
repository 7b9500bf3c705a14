//! 사용자 저장소 추상화
//!
//! 신원 확인 로직은 이 트레이트에만 의존합니다. 운영 환경에서는 MongoDB 기반
//! [`UserRepository`](super::user_repo::UserRepository), 테스트에서는
//! [`MemoryUserStore`](super::memory_store::MemoryUserStore)를 사용합니다.
//!
//! ## 고유성 계약
//!
//! 구현체는 `local.email`과 프로바이더별 `<provider>.id`의 고유성을 저장 계층에서
//! 보장해야 합니다. 조회 후 삽입 사이에 다른 요청이 같은 값을 먼저 저장했다면
//! `insert`는 반드시 [`AppError::ConflictError`]를 반환합니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::AppError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_provider_id(
        &self,
        provider: OAuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, AppError>;

    /// 새 사용자를 저장합니다. 고유 제약 위반이면 `ConflictError`.
    async fn insert(&self, user: User) -> Result<User, AppError>;
}
