pub mod rate_limit;
pub mod require_actor;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_actor::RequireActor;
pub use require_role::RequireRole;

use actix_web::{
    HttpResponse,
    http::StatusCode,
    http::header::CONTENT_TYPE,
};

use crate::models::{ApiResponse, ErrorCode};

// 辅助函数：创建统一格式的中间件错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(code, message))
}
