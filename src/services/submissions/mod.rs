pub mod autograde;
pub mod create;
pub mod detail;
pub mod grade;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::models::users::entities::ActorContext;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建提交（含自动判分）
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        actor: ActorContext,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, actor, req).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 教师评分（覆写自动判分结果）
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        actor: ActorContext,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, actor, submission_id, req).await
    }
}
