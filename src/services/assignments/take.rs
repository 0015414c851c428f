use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::AssignmentService;
use crate::cache::CacheResult;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::assignments::responses::AssignmentTakeResponse;
use crate::models::users::entities::ActorContext;
use crate::models::{ApiResponse, ErrorCode};

/// 答题视图的缓存键
fn take_cache_key(assignment_id: i64) -> String {
    format!("assignment_take:{assignment_id}")
}

/// 获取答题视图（学生视角）
///
/// 题目树在作业有提交后不再变化，适合缓存；选项中的 is_correct
/// 在进缓存之前就已剥离。权限检查始终在缓存命中之前执行。
/// GET /api/v1/assignments/{assignment_id}/take
pub async fn take_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    actor: ActorContext,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    // 只有学生走答题视图
    if !actor.is_student() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只有学生可以进入答题视图",
        )));
    }

    // 草稿作业、不属于本班级的作业一律视为不存在
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) if a.status == AssignmentStatus::Published => a,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在或不可用",
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

    match storage.get_enrollment_by_user_id(actor.id).await {
        Ok(Some(enrollment)) if enrollment.class_id == assignment.class_id => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在或不可用",
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

    // 缓存命中直接返回
    let cache_key = take_cache_key(assignment_id);
    if let CacheResult::Found(raw) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<AssignmentTakeResponse>(&raw) {
            Ok(response) => {
                return Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")));
            }
            Err(e) => {
                // 缓存内容损坏：丢弃并回源
                warn!("答题视图缓存反序列化失败: {}, key: {}", e, cache_key);
                cache.remove(&cache_key).await;
            }
        }
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

    let response = AssignmentTakeResponse {
        assignment,
        // 剥离 is_correct 后才可能进入任何对学生可见的通道
        questions: questions.into_iter().map(Into::into).collect(),
    };

    match serde_json::to_string(&response) {
        Ok(serialized) => cache.insert_raw(cache_key, serialized, 0).await,
        Err(e) => warn!("答题视图缓存序列化失败: {}", e),
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
