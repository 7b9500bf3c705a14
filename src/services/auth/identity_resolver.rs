//! # 신원 확인 서비스
//!
//! 로컬 자격 증명과 페더레이션 프로필을 저장된 사용자로 해석합니다.
//!
//! ## 결과
//!
//! | 흐름            | 성공                          | 거부                        | 실패            |
//! |-----------------|-------------------------------|-----------------------------|-----------------|
//! | 로컬 가입       | `Authenticated(새 사용자)`    | `Rejected(EmailTaken)`      | `Err(AppError)` |
//! | 로컬 로그인     | `Authenticated(기존 사용자)`  | `Rejected(InvalidCredentials)` | `Err(AppError)` |
//! | 페더레이션      | `Ok(User)` (없으면 생성)      | -                           | `Err(AppError)` |
//!
//! ## 동시성
//!
//! 조회 후 삽입 순서에 기대지 않습니다. 저장소의 고유 제약이 최종 판단을 하고,
//! 삽입이 `ConflictError`로 실패하면 다음처럼 처리합니다.
//!
//! - 로컬 가입: 먼저 가입한 요청이 이겼으므로 `EmailTaken` 거부
//! - 페더레이션: 먼저 생성된 사용자를 다시 읽어 반환
//!
//! ## 비밀번호 처리
//!
//! bcrypt 해시/검증은 `web::block`으로 블로킹 스레드 풀에서 실행합니다.
//! 로그인은 사용자를 찾지 못해도 같은 비용의 더미 해시로 검증을 한 번 수행하므로
//! 없는 이메일과 틀린 비밀번호의 응답 시간이 같습니다.
//!
//! ## 알려진 제약
//!
//! - 재로그인 시 저장된 프로바이더 액세스 토큰을 갱신하지 않습니다.
//! - 프로바이더 간 계정 병합은 하지 않습니다. 같은 이메일이라도 다른 프로바이더로
//!   로그인하면 별도의 사용자가 만들어집니다.

use std::sync::Arc;

use actix_web::web;
use once_cell::sync::OnceCell;

use crate::domain::entities::users::user::{LocalCredential, User};
use crate::domain::models::auth::resolution::{Rejection, Resolution};
use crate::domain::models::oauth::federated_profile::{FederatedCredentials, FederatedProfile};
use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::repositories::users::user_store::UserStore;

/// 계정이 없을 때 검증 대상으로 쓰는 평문
const DUMMY_PASSWORD: &str = "identity-auth-service/no-such-account";

pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    dummy_hash: OnceCell<String>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    /// 설정된 비용으로 만든 더미 해시. 처음 필요할 때 한 번만 계산합니다.
    fn dummy_hash(&self) -> AppResult<&str> {
        self.dummy_hash
            .get_or_try_init(|| bcrypt::hash(DUMMY_PASSWORD, self.bcrypt_cost))
            .map(String::as_str)
            .map_err(AppError::from)
    }

    /// 로그인 시 검증할 해시를 고릅니다. 로컬 자격 증명이 없으면 더미 해시입니다.
    fn hash_to_verify<'a>(&'a self, user: Option<&'a User>) -> AppResult<&'a str> {
        match user.and_then(|u| u.local.as_ref()) {
            Some(credential) => Ok(credential.password_hash.as_str()),
            None => self.dummy_hash(),
        }
    }

    /// 로컬 계정 가입
    ///
    /// 이메일 형식은 검사하지 않습니다.
    pub async fn register_local(&self, email: &str, password: &str) -> AppResult<Resolution> {
        if self.store.find_by_local_email(email).await?.is_some() {
            log::info!("가입 거부 (이메일 중복): {}", email);
            return Ok(Resolution::Rejected(Rejection::EmailTaken));
        }

        let credential = hash_password(email, password, self.bcrypt_cost).await?;

        match self.store.insert(User::new_local(credential)).await {
            Ok(user) => {
                log::info!("✅ 로컬 사용자 가입: {} ({})", email, user.id_string());
                Ok(Resolution::Authenticated(user))
            }
            Err(AppError::ConflictError(detail)) => {
                log::info!("가입 경쟁에서 밀림: {} ({})", email, detail);
                Ok(Resolution::Rejected(Rejection::EmailTaken))
            }
            Err(e) => Err(e),
        }
    }

    /// 로컬 계정 로그인
    ///
    /// 없는 이메일과 틀린 비밀번호는 같은 거부 사유를 돌려줍니다.
    pub async fn login_local(&self, email: &str, password: &str) -> AppResult<Resolution> {
        let user = self.store.find_by_local_email(email).await?;

        let hash = self.hash_to_verify(user.as_ref())?;
        let matched = verify_password(password, hash).await?;

        match user {
            Some(user) if matched && user.local.is_some() => {
                log::info!("✅ 로컬 로그인: {} ({})", email, user.id_string());
                Ok(Resolution::Authenticated(user))
            }
            _ => {
                log::warn!("로그인 실패: {}", email);
                Ok(Resolution::Rejected(Rejection::InvalidCredentials))
            }
        }
    }

    /// 페더레이션 로그인
    ///
    /// 프로바이더 id로 사용자를 찾고, 없으면 해당 프로바이더 계정만 가진 사용자를 만듭니다.
    /// 이미 있는 사용자는 저장된 토큰을 포함해 변경 없이 반환합니다.
    pub async fn resolve_federated(
        &self,
        provider: OAuthProvider,
        credentials: &FederatedCredentials,
        profile: &FederatedProfile,
    ) -> AppResult<User> {
        if profile.id.trim().is_empty() {
            return Err(AppError::ExternalServiceError(format!(
                "{} profile does not contain an id",
                provider
            )));
        }

        if let Some(user) = self.store.find_by_provider_id(provider, &profile.id).await? {
            log::info!("✅ {} 로그인: {} ({})", provider, profile.id, user.id_string());
            return Ok(user);
        }

        let account = profile.to_account(provider, &credentials.access_token);

        match self.store.insert(User::new_federated(provider, account)).await {
            Ok(user) => {
                log::info!("✅ 새 {} 사용자 생성: {} ({})", provider, profile.id, user.id_string());
                Ok(user)
            }
            Err(AppError::ConflictError(detail)) => {
                log::info!("{} 사용자 생성 경쟁, 기존 사용자 재조회: {}", provider, detail);
                self.store
                    .find_by_provider_id(provider, &profile.id)
                    .await?
                    .ok_or(AppError::ConflictError(detail))
            }
            Err(e) => Err(e),
        }
    }
}

async fn hash_password(email: &str, password: &str, cost: u32) -> AppResult<LocalCredential> {
    let (email, password) = (email.to_string(), password.to_string());
    web::block(move || LocalCredential::hash(&email, &password, cost))
        .await
        .context("비밀번호 해시 작업 실패")?
}

async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    web::block(move || bcrypt::verify(&password, &hash))
        .await
        .with_context(|| "비밀번호 검증 작업 실패".to_string())?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use futures_util::future::join_all;
    use mongodb::bson::oid::ObjectId;

    use crate::repositories::users::memory_store::MemoryUserStore;

    const TEST_COST: u32 = 4;

    fn resolver_with(store: Arc<dyn UserStore>) -> IdentityResolver {
        IdentityResolver::new(store, TEST_COST)
    }

    fn credentials(token: &str) -> FederatedCredentials {
        FederatedCredentials {
            access_token: token.to_string(),
            refresh_token: None,
        }
    }

    fn google_profile(id: &str) -> FederatedProfile {
        FederatedProfile {
            id: id.to_string(),
            display_name: Some("Alice Kim".to_string()),
            emails: vec!["alice@gmail.com".to_string()],
            ..FederatedProfile::default()
        }
    }

    fn authenticated(resolution: Resolution) -> User {
        match resolution {
            Resolution::Authenticated(user) => user,
            Resolution::Rejected(reason) => panic!("unexpected rejection: {}", reason),
        }
    }

    /// 조회 결과를 숨겨 다른 요청과의 경쟁에서 진 상황을 재현하는 저장소
    struct RacingStore {
        inner: MemoryUserStore,
        hide_next_lookup: AtomicBool,
    }

    impl RacingStore {
        fn new(inner: MemoryUserStore) -> Self {
            Self { inner, hide_next_lookup: AtomicBool::new(true) }
        }
    }

    #[async_trait]
    impl UserStore for RacingStore {
        async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
            if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_local_email(email).await
        }

        async fn find_by_provider_id(
            &self,
            provider: OAuthProvider,
            provider_id: &str,
        ) -> Result<Option<User>, AppError> {
            if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_provider_id(provider, provider_id).await
        }

        async fn insert(&self, user: User) -> Result<User, AppError> {
            self.inner.insert(user).await
        }
    }

    /// 모든 쓰기가 실패하는 저장소
    struct BrokenWriteStore(MemoryUserStore);

    #[async_trait]
    impl UserStore for BrokenWriteStore {
        async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
            self.0.find_by_id(id).await
        }

        async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
            self.0.find_by_local_email(email).await
        }

        async fn find_by_provider_id(
            &self,
            provider: OAuthProvider,
            provider_id: &str,
        ) -> Result<Option<User>, AppError> {
            self.0.find_by_provider_id(provider, provider_id).await
        }

        async fn insert(&self, _user: User) -> Result<User, AppError> {
            Err(AppError::DatabaseError("write concern timeout".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_register_creates_user_with_verifiable_hash() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        let user = authenticated(resolver.register_local("alice@example.com", "correct horse").await.unwrap());

        assert_eq!(store.len(), 1);
        let credential = user.local.as_ref().unwrap();
        assert_eq!(credential.email, "alice@example.com");
        assert_ne!(credential.password_hash, "correct horse");
        assert!(credential.verify("correct horse").unwrap());
        assert!(!credential.verify("battery staple").unwrap());
    }

    #[actix_web::test]
    async fn test_register_twice_is_rejected() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        resolver.register_local("bob@example.com", "pw1").await.unwrap();
        let second = resolver.register_local("bob@example.com", "pw2").await.unwrap();

        assert_eq!(second.rejection(), Some(Rejection::EmailTaken));
        assert_eq!(Rejection::EmailTaken.message(), "That email is already taken.");
        assert_eq!(store.count_local_email("bob@example.com"), 1);
    }

    #[actix_web::test]
    async fn test_register_race_lost_at_storage_is_soft_rejection() {
        let inner = MemoryUserStore::new();
        inner
            .insert(User::new_local(LocalCredential::hash("carol@example.com", "first", TEST_COST).unwrap()))
            .await
            .unwrap();
        let store = Arc::new(RacingStore::new(inner));
        let resolver = resolver_with(store.clone());

        let result = resolver.register_local("carol@example.com", "second").await.unwrap();

        assert_eq!(result.rejection(), Some(Rejection::EmailTaken));
        assert_eq!(store.inner.count_local_email("carol@example.com"), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_registrations_create_at_most_one_user() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        let attempts = (0..8).map(|i| {
            let resolver = &resolver;
            async move { resolver.register_local("dave@example.com", &format!("pw-{}", i)).await }
        });
        let results = join_all(attempts).await;

        let created = results
            .iter()
            .filter(|r| matches!(r, Ok(Resolution::Authenticated(_))))
            .count();
        assert_eq!(created, 1);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(store.count_local_email("dave@example.com"), 1);
    }

    #[actix_web::test]
    async fn test_login_failures_are_indistinguishable() {
        let resolver = resolver_with(Arc::new(MemoryUserStore::new()));
        resolver.register_local("erin@example.com", "right").await.unwrap();

        let wrong_password = resolver.login_local("erin@example.com", "wrong").await.unwrap();
        let unknown_email = resolver.login_local("nobody@example.com", "right").await.unwrap();

        assert_eq!(wrong_password.rejection(), Some(Rejection::InvalidCredentials));
        assert_eq!(unknown_email.rejection(), wrong_password.rejection());
        assert_eq!(Rejection::InvalidCredentials.message(), "Invalid credentials.");
    }

    #[actix_web::test]
    async fn test_login_without_local_credential_still_verifies_a_hash() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());
        let registered = authenticated(resolver.register_local("hana@example.com", "pw").await.unwrap());
        let federated = resolver
            .resolve_federated(OAuthProvider::Google, &credentials("g"), &google_profile("g-9"))
            .await
            .unwrap();

        let real = resolver.hash_to_verify(Some(&registered)).unwrap();
        assert_eq!(real, registered.local.as_ref().unwrap().password_hash);

        // 없는 이메일과 로컬 자격 증명이 없는 사용자 모두 같은 비용의 더미 해시로 검증
        let unknown = resolver.hash_to_verify(None).unwrap();
        let federated_only = resolver.hash_to_verify(Some(&federated)).unwrap();
        assert_eq!(unknown, federated_only);
        assert_ne!(unknown, real);
        assert_eq!(&unknown[..7], &real[..7]);
        assert!(!bcrypt::verify("pw", unknown).unwrap());

        let rejected = resolver.login_local("nobody@example.com", DUMMY_PASSWORD).await.unwrap();
        assert_eq!(rejected.rejection(), Some(Rejection::InvalidCredentials));
    }

    #[actix_web::test]
    async fn test_login_returns_existing_user_unchanged() {
        let resolver = resolver_with(Arc::new(MemoryUserStore::new()));
        let registered = authenticated(resolver.register_local("frank@example.com", "pw").await.unwrap());

        let logged_in = authenticated(resolver.login_local("frank@example.com", "pw").await.unwrap());

        assert_eq!(logged_in.id, registered.id);
        assert_eq!(
            logged_in.local.as_ref().unwrap().password_hash,
            registered.local.as_ref().unwrap().password_hash
        );
        assert_eq!(logged_in.updated_at, registered.updated_at);
    }

    #[actix_web::test]
    async fn test_federated_login_creates_once_then_returns_same_user() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        let first = resolver
            .resolve_federated(OAuthProvider::Google, &credentials("token-1"), &google_profile("g-42"))
            .await
            .unwrap();
        assert_eq!(first.linked_providers(), vec![OAuthProvider::Google]);
        assert!(first.local.is_none());

        let second = resolver
            .resolve_federated(OAuthProvider::Google, &credentials("token-2"), &google_profile("g-42"))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(store.len(), 1);
        // 재로그인 시 토큰은 갱신되지 않음
        assert_eq!(second.google.as_ref().unwrap().token, "token-1");
    }

    #[actix_web::test]
    async fn test_same_email_on_two_providers_creates_two_users() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        let google = resolver
            .resolve_federated(OAuthProvider::Google, &credentials("g"), &google_profile("1"))
            .await
            .unwrap();
        let facebook = resolver
            .resolve_federated(OAuthProvider::Facebook, &credentials("f"), &google_profile("1"))
            .await
            .unwrap();

        assert_ne!(google.id, facebook.id);
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_federated_race_returns_winner() {
        let inner = MemoryUserStore::new();
        let winner = inner
            .insert(User::new_federated(
                OAuthProvider::Twitter,
                google_profile("t-7").to_account(OAuthProvider::Twitter, "winner-token"),
            ))
            .await
            .unwrap();
        let store = Arc::new(RacingStore::new(inner));
        let resolver = resolver_with(store.clone());

        let resolved = resolver
            .resolve_federated(OAuthProvider::Twitter, &credentials("loser-token"), &google_profile("t-7"))
            .await
            .unwrap();

        assert_eq!(resolved.id, winner.id);
        assert_eq!(store.inner.len(), 1);
    }

    #[actix_web::test]
    async fn test_storage_write_failure_is_hard_error() {
        let resolver = resolver_with(Arc::new(BrokenWriteStore(MemoryUserStore::new())));

        let register = resolver.register_local("gina@example.com", "pw").await;
        assert!(matches!(register, Err(AppError::DatabaseError(_))));

        let federated = resolver
            .resolve_federated(OAuthProvider::Facebook, &credentials("f"), &google_profile("fb-1"))
            .await;
        assert!(matches!(federated, Err(AppError::DatabaseError(_))));
    }

    #[actix_web::test]
    async fn test_profile_without_id_is_rejected_before_storage() {
        let store = Arc::new(MemoryUserStore::new());
        let resolver = resolver_with(store.clone());

        let result = resolver
            .resolve_federated(OAuthProvider::Google, &credentials("g"), &google_profile(""))
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        assert!(store.is_empty());
    }
}
