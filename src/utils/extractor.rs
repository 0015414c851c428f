//! 类型安全的路径参数提取器
//!
//! 路径中的 ID 必须是正整数，解析失败时直接返回 400，
//! 避免每个 handler 重复写解析逻辑。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|v| v.parse::<i64>().ok());

                ready(match parsed {
                    Some(id) if id > 0 => Ok($name(id)),
                    _ => Err(actix_web::error::InternalError::from_response(
                        concat!("invalid path parameter: ", $param),
                        HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("非法的路径参数: ", $param),
                        )),
                    )
                    .into()),
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_id_extractor!(SafeSubmissionIdI64, "submission_id");
