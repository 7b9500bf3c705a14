//! # 현재 사용자 핸들러
//!
//! `AuthMiddleware`가 복원한 세션 사용자를 돌려줍니다.
//! 비밀번호 해시와 프로바이더 토큰은 응답에 포함되지 않습니다.

use actix_web::{get, HttpResponse};

use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::AppError;

/// 현재 로그인한 사용자 조회
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn get_current_user(
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    log::debug!("현재 사용자 조회: {} ({})", current.user_id, current.auth_provider.as_str());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserResponse::from(&current.user),
        "auth_provider": current.auth_provider,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Service;
    use actix_web::{http::StatusCode, test, web, App, HttpMessage};

    use crate::config::AuthProvider;
    use crate::domain::entities::users::user::{LocalCredential, User};

    #[actix_web::test]
    async fn test_returns_user_from_request_extensions() {
        let user = User::new_local(LocalCredential {
            email: "ivy@example.com".into(),
            password_hash: "$2b$04$hash".into(),
        });
        let current = AuthenticatedUser {
            user_id: user.id_string(),
            auth_provider: AuthProvider::Local,
            user: user.clone(),
        };

        let app = test::init_service(
            App::new()
                .wrap_fn(move |req, srv| {
                    req.extensions_mut().insert(current.clone());
                    srv.call(req)
                })
                .service(web::scope("/me").service(get_current_user)),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["id"], user.id_string());
        assert_eq!(body["user"]["email"], "ivy@example.com");
        assert_eq!(body["auth_provider"], "local");
        assert!(!body.to_string().contains("$2b$04$hash"));
    }

    #[actix_web::test]
    async fn test_without_session_is_unauthorized() {
        let app = test::init_service(App::new().service(web::scope("/me").service(get_current_user))).await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
