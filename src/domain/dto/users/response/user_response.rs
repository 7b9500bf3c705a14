use mongodb::bson::DateTime;
use serde::Serialize;

use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::provider::OAuthProvider;
use crate::domain::models::token::SessionToken;

/// 클라이언트에 노출되는 사용자 정보
///
/// 비밀번호 해시와 프로바이더 액세스 토큰은 포함하지 않습니다.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub accounts: Vec<LinkedAccountResponse>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Serialize)]
pub struct LinkedAccountResponse {
    pub provider: OAuthProvider,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let accounts = OAuthProvider::ALL
            .into_iter()
            .filter_map(|provider| {
                user.account(provider).map(|account| LinkedAccountResponse {
                    provider,
                    id: account.id.clone(),
                    display_name: account.display_name.clone(),
                    email: account.email.clone(),
                    username: account.username.clone(),
                })
            })
            .collect();

        Self {
            id: user.id_string(),
            email: user.local_email().map(String::from),
            accounts,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 가입/로그인 성공 응답
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub session: SessionToken,
}
