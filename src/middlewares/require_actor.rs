/*!
 * 操作者上下文中间件
 *
 * 认证由上游网关完成：网关校验凭证后，把已验证的操作者身份通过
 * `X-Actor-Id` / `X-Actor-Role` 请求头注入到本服务。此中间件负责解析
 * 这两个头并将 `ActorContext` 存入请求扩展，核心业务层从不读取任何
 * 全局认证状态。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_actor::RequireActor;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireActor)
 *                 .route("/protected", web::get().to(protected_handler))
 *         )
 * })
 * ```
 *
 * 2. 在处理程序中提取操作者：
 * ```rust,ignore
 * async fn protected_handler(req: HttpRequest) -> Result<HttpResponse> {
 *     if let Some(actor) = RequireActor::extract_actor(&req) {
 *         return Ok(HttpResponse::Ok().json(format!("Actor: {} ({})", actor.id, actor.role)));
 *     }
 *     Ok(HttpResponse::InternalServerError().finish())
 * }
 * ```
 *
 * ## 请求头约定
 *
 * - `X-Actor-Id`: 正整数用户 ID
 * - `X-Actor-Role`: student / teacher / admin
 *
 * 头缺失或非法时返回 401。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::str::FromStr;
use tracing::info;

use crate::models::ErrorCode;
use crate::models::users::entities::{ActorContext, UserRole};

use super::create_error_response;

const ACTOR_ID_HEADER: &str = "X-Actor-Id";
const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

#[derive(Clone)]
pub struct RequireActor;

impl RequireActor {
    /// 从请求扩展中取出操作者上下文
    pub fn extract_actor(req: &HttpRequest) -> Option<ActorContext> {
        req.extensions().get::<ActorContext>().cloned()
    }

    /// 只取操作者 ID
    pub fn extract_actor_id(req: &HttpRequest) -> Option<i64> {
        Self::extract_actor(req).map(|actor| actor.id)
    }

    /// 只取操作者角色
    pub fn extract_actor_role(req: &HttpRequest) -> Option<UserRole> {
        Self::extract_actor(req).map(|actor| actor.role)
    }
}

// 辅助函数：解析网关注入的身份头
fn parse_actor_headers(req: &ServiceRequest) -> Result<ActorContext, String> {
    let id = req
        .headers()
        .get(ACTOR_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("Missing or invalid {ACTOR_ID_HEADER} header"))?;

    let role = req
        .headers()
        .get(ACTOR_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| UserRole::from_str(s).ok())
        .ok_or_else(|| format!("Missing or invalid {ACTOR_ROLE_HEADER} header"))?;

    Ok(ActorContext { id, role })
}

impl<S, B> Transform<S, ServiceRequest> for RequireActor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireActorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireActorMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireActorMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireActorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            match parse_actor_headers(&req) {
                Ok(actor) => {
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(reason) => {
                    info!("Actor context rejected: {}", reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "缺少有效的操作者身份",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
