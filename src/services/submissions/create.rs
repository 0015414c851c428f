use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, autograde};
use crate::errors::ExamSystemError;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::submissions::requests::{CreateSubmissionRequest, NewStudentAnswer};
use crate::models::users::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_answer_set;

/// 创建提交
///
/// 整个操作是原子的：要么提交和全部答案一起落库，要么什么都不写。
/// POST /api/v1/submissions
pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    actor: ActorContext,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 只有学生可以交卷
    if !actor.is_student() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有学生可以提交作业",
        )));
    }

    // 作业必须存在
    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
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

    // 草稿作业对学生不可见，不接受提交
    if assignment.status != AssignmentStatus::Published {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotPublished,
            "作业尚未发布",
        )));
    }

    // 学生必须属于作业的目标班级
    match storage.get_enrollment_by_user_id(actor.id).await {
        Ok(Some(enrollment)) if enrollment.class_id == assignment.class_id => {}
        Ok(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只能提交本班级的作业",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询选课关系失败: {e}"),
                )),
            );
        }
    }

    // 拉取题目树，校验答卷完整性与形态
    let questions = match storage.list_questions_with_options(req.assignment_id).await {
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

    if let Err(e) = validate_answer_set(&questions, &req.answers) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(e.error_code(), e.message())));
    }

    // 预检查重复提交，给出友好错误；真正的竞态由唯一索引兜底
    match storage
        .get_submission_by_assignment_and_student(req.assignment_id, actor.id)
        .await
    {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DuplicateSubmission,
                "该作业已提交过，不能重复提交",
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
    }

    // 逐题自动判分，生成答案草稿
    let drafts: Vec<NewStudentAnswer> = req
        .answers
        .iter()
        .map(|ans| {
            let question = questions
                .iter()
                .find(|q| q.question.id == ans.question_id)
                .expect("validated answer refers to a known question");
            let auto = autograde::score(question, ans);

            NewStudentAnswer {
                question_id: ans.question_id,
                selected_option_id: ans.selected_option_id,
                text_answer: ans.text_answer.clone(),
                is_correct: auto.is_correct,
                points_awarded: auto.points,
            }
        })
        .collect();

    match storage
        .create_submission_with_answers(req.assignment_id, actor.id, drafts)
        .await
    {
        Ok(submission) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功")))
        }
        // 并发提交输掉唯一索引竞争的一方
        Err(ExamSystemError::SubmissionConflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DuplicateSubmission,
                "该作业已提交过，不能重复提交",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建提交失败: {e}"),
            )),
        ),
    }
}
