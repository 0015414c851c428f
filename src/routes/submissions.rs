use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireActor};
use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;
use crate::utils::SafeSubmissionIdI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交（学生交卷）
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
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

    SUBMISSION_SERVICE
        .create_submission(&req, actor, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, submission_id.0)
        .await
}

// 教师评分
pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    body: web::Json<GradeSubmissionRequest>,
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

    SUBMISSION_SERVICE
        .grade_submission(&req, actor, submission_id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireActor)
            .service(
                web::resource("")
                    .wrap(middlewares::RateLimit::submit())
                    .route(web::post().to(create_submission)),
            )
            .service(web::resource("/{submission_id}").route(web::get().to(get_submission)))
            .service(
                web::resource("/{submission_id}/grade")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .wrap(middlewares::RateLimit::grade())
                    .route(web::post().to(grade_submission)),
            ),
    );
}
