use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;
use crate::utils::SafeAssignmentIdI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 获取作业详情（教师视角）
pub async fn get_assignment_detail(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
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

    ASSIGNMENT_SERVICE
        .get_assignment_detail(&req, actor, assignment_id.0)
        .await
}

// 获取答题视图（学生视角）
pub async fn take_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
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

    ASSIGNMENT_SERVICE
        .take_assignment(&req, actor, assignment_id.0)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireActor)
            .service(
                web::resource("/{assignment_id}").route(web::get().to(get_assignment_detail)),
            )
            .service(web::resource("/{assignment_id}/take").route(web::get().to(take_assignment))),
    );
}
