//! User Entity Implementation
//!
//! 로컬 자격 증명과 프로바이더별 계정을 하위 문서로 가지는 사용자 엔티티입니다.
//!
//! ```json
//! {
//!   "_id": ObjectId("65f0..."),
//!   "local":  { "email": "a@b.c", "password_hash": "$2b$12$..." },
//!   "google": { "id": "1098...", "token": "ya29...", "display_name": "Alice", "email": "a@gmail.com" },
//!   "created_at": ISODate(...),
//!   "updated_at": ISODate(...)
//! }
//! ```
//!
//! 비어 있는 하위 문서는 저장하지 않습니다. 고유 인덱스가 sparse로 걸려 있어
//! 필드가 없는 문서끼리는 충돌하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::oauth::provider::OAuthProvider;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 생성 시점에 부여되는 내부 식별자. 세션 식별자로도 쓰입니다.
    #[serde(rename = "_id")]
    pub id: ObjectId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalCredential>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<ProviderAccount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<ProviderAccount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<ProviderAccount>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 이메일/비밀번호 자격 증명. 평문 비밀번호는 저장하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalCredential {
    pub email: String,
    pub password_hash: String,
}

/// 페더레이션 프로바이더가 발급한 계정 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAccount {
    /// 프로바이더 내에서 고유한 사용자 id
    pub id: String,

    /// 최초 로그인 시점의 액세스 토큰
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Twitter 핸들
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LocalCredential {
    /// 비밀번호를 bcrypt로 해시해 자격 증명을 만듭니다.
    pub fn hash(email: &str, password: &str, cost: u32) -> Result<Self, AppError> {
        let password_hash = bcrypt::hash(password, cost)?;
        Ok(Self {
            email: email.to_string(),
            password_hash,
        })
    }

    pub fn verify(&self, password: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(password, &self.password_hash)?)
    }
}

impl User {
    fn empty() -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            local: None,
            facebook: None,
            twitter: None,
            google: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_local(credential: LocalCredential) -> Self {
        Self {
            local: Some(credential),
            ..Self::empty()
        }
    }

    /// 해당 프로바이더 하위 문서만 채워진 사용자를 만듭니다.
    pub fn new_federated(provider: OAuthProvider, account: ProviderAccount) -> Self {
        let mut user = Self::empty();
        *user.account_slot(provider) = Some(account);
        user
    }

    pub fn id_string(&self) -> String {
        self.id.to_hex()
    }

    pub fn local_email(&self) -> Option<&str> {
        self.local.as_ref().map(|local| local.email.as_str())
    }

    pub fn account(&self, provider: OAuthProvider) -> Option<&ProviderAccount> {
        match provider {
            OAuthProvider::Facebook => self.facebook.as_ref(),
            OAuthProvider::Twitter => self.twitter.as_ref(),
            OAuthProvider::Google => self.google.as_ref(),
        }
    }

    fn account_slot(&mut self, provider: OAuthProvider) -> &mut Option<ProviderAccount> {
        match provider {
            OAuthProvider::Facebook => &mut self.facebook,
            OAuthProvider::Twitter => &mut self.twitter,
            OAuthProvider::Google => &mut self.google,
        }
    }

    /// 연결된 프로바이더 목록
    pub fn linked_providers(&self) -> Vec<OAuthProvider> {
        OAuthProvider::ALL
            .into_iter()
            .filter(|provider| self.account(*provider).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google_account() -> ProviderAccount {
        ProviderAccount {
            id: "109876".into(),
            token: "ya29.token".into(),
            display_name: Some("Alice Kim".into()),
            email: Some("alice@gmail.com".into()),
            username: None,
        }
    }

    #[test]
    fn test_password_hash_verifies_only_original_password() {
        let credential = LocalCredential::hash("alice@example.com", "s3cret", 4).unwrap();

        assert_ne!(credential.password_hash, "s3cret");
        assert!(credential.verify("s3cret").unwrap());
        assert!(!credential.verify("S3cret").unwrap());
        assert!(!credential.verify("").unwrap());
    }

    #[test]
    fn test_federated_user_has_only_that_provider() {
        let user = User::new_federated(OAuthProvider::Google, google_account());

        assert_eq!(user.account(OAuthProvider::Google), Some(&google_account()));
        assert!(user.facebook.is_none());
        assert!(user.twitter.is_none());
        assert!(user.local.is_none());
        assert_eq!(user.linked_providers(), vec![OAuthProvider::Google]);
    }

    #[test]
    fn test_new_users_get_distinct_ids() {
        let a = User::new_federated(OAuthProvider::Google, google_account());
        let b = User::new_federated(OAuthProvider::Google, google_account());
        assert_ne!(a.id, b.id);
        assert_eq!(a.id_string().len(), 24);
    }

    #[test]
    fn test_empty_sub_documents_are_not_serialized() {
        let user = User::new_federated(OAuthProvider::Twitter, ProviderAccount {
            id: "42".into(),
            token: "t".into(),
            display_name: Some("Bob".into()),
            email: None,
            username: Some("bob".into()),
        });

        let document = mongodb::bson::to_document(&user).unwrap();
        assert!(document.contains_key("_id"));
        assert!(document.contains_key("twitter"));
        assert!(!document.contains_key("local"));
        assert!(!document.contains_key("google"));

        let twitter = document.get_document("twitter").unwrap();
        assert!(!twitter.contains_key("email"));
        assert_eq!(twitter.get_str("username").unwrap(), "bob");
    }
}
