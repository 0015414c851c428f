//! 业务数据模型
//!
//! 按领域划分：每个领域下分 entities / requests / responses。
//! `common` 提供统一的 API 响应信封。

pub mod assignments;
pub mod common;
pub mod enrollments;
pub mod overview;
pub mod questions;
pub mod submissions;
pub mod users;

pub use common::response::ApiResponse;

/// 业务错误码
///
/// 与 HTTP 状态码对应：400xx 参数校验、401xx 未认证、403xx 权限/状态、
/// 404xx 资源不存在、409xx 冲突、429xx 限流、500xx 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 参数校验类
    BadRequest = 40000,
    IncompleteAnswerSet = 40001,
    MalformedAnswer = 40002,
    PointsOutOfRange = 40003,
    UnknownQuestion = 40004,

    // 认证/权限类
    Unauthorized = 40100,
    Forbidden = 40300,
    AssignmentNotPublished = 40301,

    // 资源类
    NotFound = 40400,
    AssignmentNotFound = 40401,
    SubmissionNotFound = 40402,

    // 冲突类
    DuplicateSubmission = 40900,

    // 限流
    RateLimitExceeded = 42900,

    // 服务端
    InternalServerError = 50000,
}

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::IncompleteAnswerSet as i32, 40001);
        assert_eq!(ErrorCode::PointsOutOfRange as i32, 40003);
        assert_eq!(ErrorCode::DuplicateSubmission as i32, 40900);
        assert_eq!(ErrorCode::InternalServerError as i32, 50000);
    }
}
