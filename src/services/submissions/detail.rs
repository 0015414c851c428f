use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireActor;
use crate::models::submissions::responses::SubmissionDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 获取提交详情（含答案、作业与题目树）
/// GET /api/v1/submissions/{submission_id}
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match RequireActor::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "缺少有效的操作者身份",
            )));
        }
    };

    // 获取提交及答案
    let (submission, answers) = match storage.get_submission_with_answers(submission_id).await {
        Ok(Some(pair)) => pair,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // 获取作业信息
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
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

    // 权限检查
    match actor.role {
        UserRole::Admin => {
            // 管理员可以查看任何提交
        }
        UserRole::Teacher => {
            // 教师只能查看自己布置的作业的提交
            if assignment.teacher_id != actor.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己布置的作业的提交",
                )));
            }
        }
        UserRole::Student => {
            // 学生只能查看自己的提交
            if submission.student_id != actor.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己的提交",
                )));
            }
        }
    }

    let questions = match storage.list_questions_with_options(submission.assignment_id).await {
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

    let total_score: i32 = answers.iter().map(|a| a.points_awarded).sum();

    let response = SubmissionDetailResponse {
        submission,
        answers,
        assignment,
        questions,
        total_score,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
