//! 프로바이더 프로필 정규화
//!
//! 각 프로바이더의 사용자 정보 응답을 공통 [`FederatedProfile`]로 바꾸고,
//! 프로바이더별 필드 추출 규칙([`FederatedProfile::to_account`])으로
//! 사용자 문서에 저장할 [`ProviderAccount`]를 만듭니다.
//!
//! | 프로바이더 | 표시 이름                          | 이메일        | 사용자명 |
//! |------------|------------------------------------|---------------|----------|
//! | Facebook   | `first_name + " " + last_name`     | `emails[0]`   | -        |
//! | Twitter    | `name`                             | 저장하지 않음 | `username` |
//! | Google     | `name`                             | `emails[0]`   | -        |

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::ProviderAccount;
use crate::domain::models::oauth::provider::OAuthProvider;

/// 프로바이더와 무관한 정규화된 프로필
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FederatedProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub username: Option<String>,
    pub emails: Vec<String>,
}

/// 프로바이더 토큰 엔드포인트에서 받은 자격 증명
#[derive(Debug, Clone)]
pub struct FederatedCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl FederatedProfile {
    fn primary_email(&self) -> Option<String> {
        self.emails.first().cloned()
    }

    /// 이름과 성이 모두 있으면 이어 붙이고, 아니면 표시 이름을 씁니다.
    fn full_name(&self) -> Option<String> {
        match (&self.given_name, &self.family_name) {
            (Some(given), Some(family)) => Some(format!("{} {}", given, family)),
            _ => self.display_name.clone(),
        }
    }

    /// 신규 사용자에 저장할 프로바이더 계정을 추출합니다.
    pub fn to_account(&self, provider: OAuthProvider, access_token: &str) -> ProviderAccount {
        let (display_name, email, username) = match provider {
            OAuthProvider::Facebook => (self.full_name(), self.primary_email(), None),
            OAuthProvider::Twitter => (self.display_name.clone(), None, self.username.clone()),
            OAuthProvider::Google => (self.display_name.clone(), self.primary_email(), None),
        };

        ProviderAccount {
            id: self.id.clone(),
            token: access_token.to_string(),
            display_name,
            email,
            username,
        }
    }
}

/// Google `oauth2/v2/userinfo` 응답
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Facebook Graph API `/me?fields=...` 응답
#[derive(Debug, Deserialize)]
pub struct FacebookUserInfo {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Twitter API v2 `/2/users/me` 응답 (`data` 로 감싸져 있음)
#[derive(Debug, Deserialize)]
pub struct TwitterUserEnvelope {
    pub data: TwitterUserInfo,
}

#[derive(Debug, Deserialize)]
pub struct TwitterUserInfo {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
}

impl From<GoogleUserInfo> for FederatedProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            id: info.id,
            display_name: info.name,
            given_name: info.given_name,
            family_name: info.family_name,
            username: None,
            emails: info.email.into_iter().collect(),
        }
    }
}

impl From<FacebookUserInfo> for FederatedProfile {
    fn from(info: FacebookUserInfo) -> Self {
        Self {
            id: info.id,
            display_name: info.name,
            given_name: info.first_name,
            family_name: info.last_name,
            username: None,
            emails: info.email.into_iter().collect(),
        }
    }
}

impl From<TwitterUserEnvelope> for FederatedProfile {
    fn from(envelope: TwitterUserEnvelope) -> Self {
        let info = envelope.data;
        Self {
            id: info.id,
            display_name: info.name,
            username: info.username,
            ..Self::default()
        }
    }
}
