//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션에 대한 [`UserStore`] 구현입니다.
//!
//! ## 고유 인덱스
//!
//! | 인덱스 이름             | 키            | 옵션            |
//! |-------------------------|---------------|-----------------|
//! | `local_email_unique`    | `local.email` | unique, sparse  |
//! | `facebook_id_unique`    | `facebook.id` | unique, sparse  |
//! | `twitter_id_unique`     | `twitter.id`  | unique, sparse  |
//! | `google_id_unique`      | `google.id`   | unique, sparse  |
//!
//! 동시 가입 경쟁은 이 인덱스가 막습니다. 삽입이 중복 키 오류(11000)로 실패하면
//! `AppError::ConflictError`로 변환해 호출자가 거부/재조회를 결정하게 합니다.
//!
//! ## 캐싱
//!
//! 사용자 문서는 캐시하지 않습니다. 세션 복원(`find_by_id`)은 매 요청 MongoDB를
//! 조회하므로 삭제된 사용자는 바로 "찾을 수 없음"이 되고, 비밀번호 해시와
//! 프로바이더 토큰이 Redis에 복제되지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::{
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
    domain::models::oauth::provider::OAuthProvider,
    errors::AppError,
    repositories::users::user_store::UserStore,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
}

/// 고유 인덱스 위반 여부
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

fn unique_sparse_index(field: &str) -> IndexModel {
    let mut keys = Document::new();
    keys.insert(field, 1);

    IndexModel::builder()
        .keys(keys)
        .options(
            IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name(format!("{}_unique", field.replace('.', "_")))
                .build(),
        )
        .build()
}

impl UserRepository {
    /// 고유 인덱스를 생성합니다. 서버 기동 시 한 번 호출합니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let mut indexes = vec![unique_sparse_index("local.email")];
        indexes.extend(OAuthProvider::ALL.iter().map(|p| unique_sparse_index(p.id_field())));
        indexes.push(
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
                .build(),
        );

        self.collection::<User>()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("✅ users 컬렉션 고유 인덱스 준비 완료");
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> Result<Option<User>, AppError> {
        self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        self.find_one(doc! { "_id": *id }).await
    }

    async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one(doc! { "local.email": email }).await
    }

    async fn find_by_provider_id(
        &self,
        provider: OAuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, AppError> {
        let mut filter = Document::new();
        filter.insert(provider.id_field(), provider_id);
        self.find_one(filter).await
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        match self.collection::<User>().insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => {
                log::info!("중복 키로 사용자 삽입 거부: {}", e);
                Err(AppError::ConflictError(e.to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }
}
