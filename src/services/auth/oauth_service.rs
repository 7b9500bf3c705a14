//! # 페더레이션 OAuth 2.0 서비스
//!
//! Facebook, Twitter(X), Google의 Authorization Code 흐름을 하나의 구현으로 처리합니다.
//! 프로바이더별 차이는 [`ProviderEndpoints`]와 [`OAuthClientConfig`]에서 옵니다.
//!
//! ```text
//! GET /auth/{provider}/login     → login_url()        → 프로바이더 동의 화면 URL
//! GET /auth/{provider}/callback  → authenticate()
//!                                    ├─ exchange_code()  code → access_token
//!                                    └─ fetch_profile()  access_token → FederatedProfile
//! ```
//!
//! ## PKCE
//!
//! Twitter는 PKCE(S256)를 요구합니다. 로그인 URL을 만들 때 verifier를 생성해
//! Redis `oauth:pkce:{state}`에 `OAUTH_SESSION_TIMEOUT_MINUTES` 동안 보관하고,
//! 콜백에서 같은 state로 한 번만 꺼내 토큰 요청에 실어 보냅니다.
//!
//! | 프로바이더 | 클라이언트 인증 | PKCE | 프로필 엔드포인트            |
//! |------------|-----------------|------|------------------------------|
//! | Facebook   | 폼 본문         | X    | Graph `/me?fields=...`       |
//! | Twitter    | HTTP Basic      | O    | `/2/users/me` (`data` 래핑)  |
//! | Google     | 폼 본문         | X    | `/oauth2/v2/userinfo`        |

use std::sync::Arc;

use serde::de::DeserializeOwned;
use singleton_macro::service;
use uuid::Uuid;

use crate::caching::redis::RedisClient;
use crate::config::{OAuthClientConfig, OAuthConfig};
use crate::domain::dto::users::response::oauth_response::{OAuthLoginUrlResponse, ProviderTokenResponse};
use crate::domain::models::oauth::federated_profile::{
    FacebookUserInfo, FederatedCredentials, FederatedProfile, GoogleUserInfo, TwitterUserEnvelope,
};
use crate::domain::models::oauth::provider::{ClientAuthMethod, OAuthProvider, ProviderEndpoints};
use crate::errors::AppError;
use crate::services::auth::pkce;

#[service(name = "oauth")]
pub struct OAuthService {
    redis: Arc<RedisClient>,
}

fn pkce_key(state: &str) -> String {
    format!("oauth:pkce:{}", state)
}

/// 프로바이더 동의 화면 URL
pub fn build_authorization_url(
    config: &OAuthClientConfig,
    state: Option<&str>,
    code_challenge: Option<&str>,
) -> String {
    let endpoints = config.provider.endpoints();
    let scope = endpoints.scopes.join(endpoints.scope_separator);

    let mut params = vec![
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.callback_url.as_str()),
        ("response_type", "code"),
        ("scope", scope.as_str()),
    ];
    if let Some(state) = state {
        params.push(("state", state));
    }
    if let Some(challenge) = code_challenge {
        params.push(("code_challenge", challenge));
        params.push(("code_challenge_method", pkce::CHALLENGE_METHOD));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.authorization_uri, query_string)
}

/// 토큰 엔드포인트 폼 본문
///
/// Basic 인증을 쓰는 프로바이더는 클라이언트 자격 증명을 본문에 넣지 않습니다.
pub fn token_request_params(
    config: &OAuthClientConfig,
    endpoints: &ProviderEndpoints,
    code: &str,
    code_verifier: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("grant_type", "authorization_code".to_string()),
        ("code", code.to_string()),
        ("redirect_uri", config.callback_url.clone()),
    ];

    match endpoints.client_auth {
        ClientAuthMethod::Form => {
            params.push(("client_id", config.client_id.clone()));
            params.push(("client_secret", config.client_secret.clone()));
        }
        ClientAuthMethod::Basic => {
            params.push(("client_id", config.client_id.clone()));
        }
    }

    if let Some(verifier) = code_verifier {
        params.push(("code_verifier", verifier.to_string()));
    }

    params
}

impl OAuthService {
    /// 로그인 URL을 만듭니다. PKCE 프로바이더는 verifier를 Redis에 보관합니다.
    pub async fn login_url(&self, provider: OAuthProvider) -> Result<OAuthLoginUrlResponse, AppError> {
        let config = OAuthClientConfig::for_provider(provider)?;

        if !provider.endpoints().uses_pkce {
            return Ok(OAuthLoginUrlResponse {
                provider,
                login_url: build_authorization_url(&config, None, None),
                state: None,
            });
        }

        let state = Uuid::new_v4().simple().to_string();
        let verifier = pkce::generate_code_verifier();
        let challenge = pkce::generate_code_challenge(&verifier);
        let ttl_seconds = (OAuthConfig::session_timeout_minutes().max(1) * 60) as usize;

        self.redis
            .set_with_expiry(&pkce_key(&state), &verifier, ttl_seconds)
            .await?;

        log::debug!("{} PKCE verifier 저장 (state: {})", provider, state);

        Ok(OAuthLoginUrlResponse {
            provider,
            login_url: build_authorization_url(&config, Some(&state), Some(&challenge)),
            state: Some(state),
        })
    }

    /// 콜백 처리: 인가 코드를 토큰으로 바꾸고 프로필을 가져옵니다.
    pub async fn authenticate(
        &self,
        provider: OAuthProvider,
        code: &str,
        state: Option<&str>,
    ) -> Result<(FederatedCredentials, FederatedProfile), AppError> {
        let config = OAuthClientConfig::for_provider(provider)?;

        let token = self.exchange_code(&config, code, state).await?;
        let profile = self.fetch_profile(&config, &token.access_token).await?;

        log::info!("{} 프로필 조회 완료: {}", provider, profile.id);

        Ok((
            FederatedCredentials {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
            },
            profile,
        ))
    }

    async fn take_code_verifier(&self, state: Option<&str>) -> Result<String, AppError> {
        let state = state
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("OAuth state가 없습니다".to_string()))?;

        self.redis
            .take::<String>(&pkce_key(state))
            .await?
            .ok_or_else(|| AppError::AuthenticationError("OAuth 세션이 만료되었거나 유효하지 않습니다".to_string()))
    }

    async fn exchange_code(
        &self,
        config: &OAuthClientConfig,
        code: &str,
        state: Option<&str>,
    ) -> Result<ProviderTokenResponse, AppError> {
        let endpoints = config.provider.endpoints();

        let verifier = if endpoints.uses_pkce {
            Some(self.take_code_verifier(state).await?)
        } else {
            None
        };

        let params = token_request_params(config, endpoints, code, verifier.as_deref());

        let mut request = reqwest::Client::new()
            .post(&config.token_uri)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params);

        if endpoints.client_auth == ClientAuthMethod::Basic {
            request = request.basic_auth(&config.client_id, Some(&config.client_secret));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", config.provider, e)))?;

        read_json(config.provider, "토큰 교환", response).await
    }

    async fn fetch_profile(
        &self,
        config: &OAuthClientConfig,
        access_token: &str,
    ) -> Result<FederatedProfile, AppError> {
        let mut request = reqwest::Client::new()
            .get(&config.userinfo_uri)
            .bearer_auth(access_token);

        if let Some(fields) = &config.profile_fields {
            request = request.query(&[("fields", fields.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", config.provider, e)))?;

        let provider = config.provider;
        let profile: FederatedProfile = match provider {
            OAuthProvider::Facebook => read_json::<FacebookUserInfo>(provider, "사용자 정보 조회", response).await?.into(),
            OAuthProvider::Twitter => read_json::<TwitterUserEnvelope>(provider, "사용자 정보 조회", response).await?.into(),
            OAuthProvider::Google => read_json::<GoogleUserInfo>(provider, "사용자 정보 조회", response).await?.into(),
        };

        Ok(profile)
    }
}

async fn read_json<T: DeserializeOwned>(
    provider: OAuthProvider,
    step: &str,
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "{} {} 실패 ({}): {}",
            provider, step, status, error_text
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} {} 응답 파싱 실패: {}", provider, step, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(provider: OAuthProvider) -> OAuthClientConfig {
        let prefix = provider.env_prefix();
        let values: HashMap<String, String> = [
            (format!("{}_CLIENT_ID", prefix), "client id".to_string()),
            (format!("{}_CLIENT_SECRET", prefix), "shh".to_string()),
            (
                format!("{}_CALLBACK_URL", prefix),
                format!("http://localhost:8080/api/v1/auth/{}/callback", provider),
            ),
        ]
        .into_iter()
        .collect();

        OAuthClientConfig::from_lookup(provider, move |key: &str| values.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_google_authorization_url() {
        let url = build_authorization_url(&config(OAuthProvider::Google), None, None);

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client%20id"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fv1%2Fauth%2Fgoogle%2Fcallback"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains("response_type=code"));
        assert!(!url.contains("state="));
        assert!(!url.contains("code_challenge"));
    }

    #[test]
    fn test_facebook_scopes_are_comma_separated() {
        let url = build_authorization_url(&config(OAuthProvider::Facebook), None, None);
        assert!(url.contains("scope=email%2Cpublic_profile"));
    }

    #[test]
    fn test_twitter_authorization_url_carries_pkce() {
        let url = build_authorization_url(&config(OAuthProvider::Twitter), Some("abc"), Some("challenge"));

        assert!(url.starts_with("https://x.com/i/oauth2/authorize?"));
        assert!(url.contains("state=abc"));
        assert!(url.contains("code_challenge=challenge"));
        assert!(url.contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_form_client_auth_sends_secret_in_body() {
        let config = config(OAuthProvider::Google);
        let params = token_request_params(&config, OAuthProvider::Google.endpoints(), "code-1", None);

        let lookup = |name: &str| params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str());
        assert_eq!(lookup("grant_type"), Some("authorization_code"));
        assert_eq!(lookup("code"), Some("code-1"));
        assert_eq!(lookup("client_secret"), Some("shh"));
        assert_eq!(lookup("code_verifier"), None);
    }

    #[test]
    fn test_basic_client_auth_keeps_secret_out_of_body() {
        let config = config(OAuthProvider::Twitter);
        let params = token_request_params(&config, OAuthProvider::Twitter.endpoints(), "code-2", Some("verifier"));

        let lookup = |name: &str| params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str());
        assert_eq!(lookup("client_secret"), None);
        assert_eq!(lookup("client_id"), Some("client id"));
        assert_eq!(lookup("code_verifier"), Some("verifier"));
    }

    #[test]
    fn test_pkce_key_format() {
        assert_eq!(pkce_key("abc"), "oauth:pkce:abc");
    }
}
