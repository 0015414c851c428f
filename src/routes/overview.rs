use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::overview::requests::OverviewQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::OverviewService;

// 懒加载的全局 OverviewService 实例
static OVERVIEW_SERVICE: Lazy<OverviewService> = Lazy::new(OverviewService::new_lazy);

// 获取看板总览
pub async fn get_overview(
    req: HttpRequest,
    query: web::Query<OverviewQuery>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireActor::extract_actor(&req) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "缺少有效的操作者身份",
            )));
        }
    };

    OVERVIEW_SERVICE
        .get_overview(&req, actor, query.into_inner())
        .await
}

// 配置路由
pub fn configure_overview_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/overview")
            .wrap(middlewares::RequireActor)
            .route("", web::get().to(get_overview)),
    );
}
