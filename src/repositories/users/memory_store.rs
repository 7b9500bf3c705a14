//! 인메모리 사용자 저장소
//!
//! 고유성 검사와 삽입을 하나의 쓰기 락 안에서 처리하므로 동시 가입 요청이
//! 같은 이메일/프로바이더 id로 두 건을 만들 수 없습니다. 테스트와 로컬 실험용입니다.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::AppError;
use crate::repositories::users::user_store::UserStore;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 로컬 이메일이 일치하는 사용자 수
    pub fn count_local_email(&self, email: &str) -> usize {
        self.read()
            .map(|users| users.values().filter(|u| u.local_email() == Some(email)).count())
            .unwrap_or(0)
    }

    /// 사용자를 삭제합니다. 삭제된 문서가 있었으면 `true`
    pub fn remove(&self, id: &ObjectId) -> bool {
        self.write()
            .map(|mut users| users.remove(id).is_some())
            .unwrap_or(false)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ObjectId, User>>, AppError> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ObjectId, User>>, AppError> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn find_where<P>(&self, predicate: P) -> Result<Option<User>, AppError>
    where
        P: Fn(&User) -> bool,
    {
        Ok(self.read()?.values().find(|user| predicate(user)).cloned())
    }
}

/// 새 사용자와 충돌하는 고유 필드 이름
fn conflicting_field(existing: &User, candidate: &User) -> Option<&'static str> {
    if existing.id == candidate.id {
        return Some("_id");
    }
    if let (Some(a), Some(b)) = (existing.local_email(), candidate.local_email()) {
        if a == b {
            return Some("local.email");
        }
    }
    OAuthProvider::ALL.into_iter().find_map(|provider| {
        match (existing.account(provider), candidate.account(provider)) {
            (Some(a), Some(b)) if a.id == b.id => Some(provider.id_field()),
            _ => None,
        }
    })
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_where(|user| user.local_email() == Some(email))
    }

    async fn find_by_provider_id(
        &self,
        provider: OAuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, AppError> {
        self.find_where(|user| {
            user.account(provider)
                .is_some_and(|account| account.id == provider_id)
        })
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        let mut users = self.write()?;

        if let Some(field) = users.values().find_map(|existing| conflicting_field(existing, &user)) {
            return Err(AppError::ConflictError(format!("duplicate key on {}", field)));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::{LocalCredential, ProviderAccount};

    fn local(email: &str) -> User {
        User::new_local(LocalCredential {
            email: email.into(),
            password_hash: "hash".into(),
        })
    }

    fn google(id: &str) -> User {
        User::new_federated(OAuthProvider::Google, ProviderAccount {
            id: id.into(),
            token: "token".into(),
            display_name: None,
            email: None,
            username: None,
        })
    }

    #[actix_web::test]
    async fn test_insert_rejects_duplicate_local_email() {
        let store = MemoryUserStore::new();
        store.insert(local("a@example.com")).await.unwrap();

        let result = store.insert(local("a@example.com")).await;
        assert!(matches!(result, Err(AppError::ConflictError(ref msg)) if msg.contains("local.email")));
        assert_eq!(store.count_local_email("a@example.com"), 1);
    }

    #[actix_web::test]
    async fn test_provider_ids_are_unique_per_provider_only() {
        let store = MemoryUserStore::new();
        store.insert(google("123")).await.unwrap();

        assert!(matches!(store.insert(google("123")).await, Err(AppError::ConflictError(_))));

        // 같은 id라도 다른 프로바이더라면 별개의 사용자
        let twitter = User::new_federated(OAuthProvider::Twitter, ProviderAccount {
            id: "123".into(),
            token: "t".into(),
            display_name: None,
            email: None,
            username: Some("handle".into()),
        });
        store.insert(twitter).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_lookups() {
        let store = MemoryUserStore::new();
        let saved = store.insert(google("g-1")).await.unwrap();
        store.insert(local("b@example.com")).await.unwrap();

        let by_id = store.find_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(by_id.id, saved.id);

        let by_provider = store
            .find_by_provider_id(OAuthProvider::Google, "g-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_provider.id, saved.id);

        assert!(store.find_by_provider_id(OAuthProvider::Facebook, "g-1").await.unwrap().is_none());
        assert!(store.find_by_local_email("b@example.com").await.unwrap().is_some());
        assert!(store.find_by_local_email("nobody@example.com").await.unwrap().is_none());
        assert!(store.find_by_id(&ObjectId::new()).await.unwrap().is_none());
    }
}
