//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::registry::ServiceLocator;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::AppError;
use crate::services::auth::token_service::bearer_token;
use crate::services::auth::{SessionCodec, TokenService};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let result = authenticate(&req).await;

            let response = match result {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
                Err(AppError::AuthenticationError(reason)) => {
                    log::warn!("인증 실패: {}", reason);
                    HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "authentication_required",
                        "message": "유효한 인증 토큰이 필요합니다"
                    }))
                }
                Err(err) => err.error_response(),
            };

            let (req, _) = req.into_parts();
            Ok(ServiceResponse::new(req, response).map_into_right_body())
        })
    }
}

/// 요청의 세션 토큰을 검증하고 사용자를 복원합니다.
///
/// 인증 실패는 `AuthenticationError`, 저장소 장애는 그대로 전파합니다.
async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::AuthenticationError("Bearer 토큰이 없습니다".to_string()))?;

    let claims = TokenService::instance().verify(token)?;

    let user = ServiceLocator::get::<SessionCodec>()
        .deserialize(&claims.sub)
        .await?
        .ok_or_else(|| AppError::AuthenticationError(format!("세션 사용자를 찾을 수 없습니다: {}", claims.sub)))?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        auth_provider: claims.auth_provider,
        user,
    })
}
