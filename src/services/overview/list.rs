use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OverviewService, categorize};
use crate::models::overview::requests::OverviewQuery;
use crate::models::overview::responses::{OverviewItem, OverviewResponse};
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};

/// 获取看板总览
///
/// 学生看自己班级的已发布作业联接自己的提交；教师看自己布置的作业
/// 联接指定学生的提交（批改视角）。联接结果在内存中完成分类与分区，
/// 不产生额外查询。
/// GET /api/v1/overview
pub async fn get_overview(
    service: &OverviewService,
    request: &HttpRequest,
    actor: ActorContext,
    query: OverviewQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 解析视角：作业列表来源 + 提交归属的学生
    let (assignments, student_id) = if actor.is_student() {
        let enrollment = match storage.get_enrollment_by_user_id(actor.id).await {
            Ok(enrollment) => enrollment,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询选课关系失败: {e}"),
                    )),
                );
            }
        };

        // 没有班级归属的学生没有可见作业
        let class_id = match enrollment {
            Some(enrollment) => enrollment.class_id,
            None => {
                let empty = OverviewResponse {
                    open: vec![],
                    completed: vec![],
                    graded: vec![],
                };
                return Ok(HttpResponse::Ok().json(ApiResponse::success(empty, "查询成功")));
            }
        };

        match storage.list_published_assignments_by_class(class_id).await {
            Ok(assignments) => (assignments, actor.id),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询作业列表失败: {e}"),
                    )),
                );
            }
        }
    } else {
        // 教师批改视角必须指定学生
        let student_id = match query.student_id {
            Some(id) => id,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "教师视角必须指定 student_id",
                )));
            }
        };

        // 指定的学生必须存在
        match storage.get_user_by_id(student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::NotFound,
                    "学生不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询用户失败: {e}"),
                    )),
                );
            }
        }

        match storage.list_published_assignments_by_teacher(actor.id).await {
            Ok(assignments) => (assignments, student_id),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询作业列表失败: {e}"),
                    )),
                );
            }
        }
    };

    // 联接该学生的提交
    let submissions = match storage.list_submissions_by_student(student_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交列表失败: {e}"),
                )),
            );
        }
    };
    let mut submission_map: HashMap<i64, Submission> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    // 批量统计题目数量用于 is_quiz 判定
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let question_counts = match storage
        .count_questions_for_assignments(&assignment_ids)
        .await
    {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计题目数量失败: {e}"),
                )),
            );
        }
    };

    // 组装条目，过滤主分类，再按提交状态分区
    let items: Vec<OverviewItem> = assignments
        .into_iter()
        .filter_map(|assignment| {
            let has_questions = question_counts
                .get(&assignment.id)
                .is_some_and(|count| *count > 0);
            let item_is_quiz = categorize::is_quiz(&assignment, has_questions);

            if !categorize::matches_category(item_is_quiz, query.main_category) {
                return None;
            }

            let submission = submission_map.remove(&assignment.id);
            Some(OverviewItem {
                assignment,
                submission,
                is_quiz: item_is_quiz,
            })
        })
        .collect();

    let response = categorize::partition(items);

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
