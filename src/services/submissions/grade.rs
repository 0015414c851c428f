use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::ExamSystemError;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::submissions::responses::GradedSubmissionResponse;
use crate::models::users::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_adjustments;

/// 教师评分
///
/// 覆写自动判分的结果：逐题调整 is_correct / points_awarded，写入
/// 成绩标签与评语，状态推进为 graded。所有调整先校验再落库，
/// 校验失败时不产生任何变更。重复评分允许且幂等。
/// POST /api/v1/submissions/{submission_id}/grade
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: ActorContext,
    submission_id: i64,
    req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取提交
    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(sub)) => sub,
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

    // 只有 submitted / graded 状态的提交可以评分
    if !submission.status.can_transition_to(SubmissionStatus::Graded) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "该提交尚不能评分",
        )));
    }

    // 获取作业并校验归属：教师只能评自己布置的作业
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

    if !actor.is_admin() && assignment.teacher_id != actor.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能评分自己布置的作业",
        )));
    }

    // 所有调整先整体校验，任何一条不合法都不落库
    let questions = match storage
        .list_questions_with_options(submission.assignment_id)
        .await
    {
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

    if let Err(e) = validate_adjustments(&questions, &req.answers) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(e.error_code(), e.message())));
    }

    match storage
        .grade_submission(submission_id, &req.grade, req.feedback.clone(), &req.answers)
        .await
    {
        Ok((submission, answers)) => {
            let total_score: i32 = answers.iter().map(|a| a.points_awarded).sum();
            let response = GradedSubmissionResponse {
                submission,
                answers,
                total_score,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评分成功")))
        }
        Err(ExamSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SubmissionNotFound, "提交不存在"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评分失败: {e}"),
            )),
        ),
    }
}
