use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::responses::AssignmentDetailResponse;
use crate::models::users::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};

/// 获取作业详情（教师/管理员视角）
/// GET /api/v1/assignments/{assignment_id}
pub async fn get_assignment_detail(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: ActorContext,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    // 含正确答案标记的详情只开放给作业的布置者和管理员
    if !actor.is_admin() && assignment.teacher_id != actor.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己布置的作业",
        )));
    }

    let questions = match storage.list_questions_with_options(assignment_id).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询题目失败: {e}"),
                )),
            );
        }
    };

    let response = AssignmentDetailResponse {
        assignment,
        questions,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
