pub mod detail;
pub mod take;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::users::entities::ActorContext;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    /// 获取作业详情（教师视角，含正确答案标记）
    pub async fn get_assignment_detail(
        &self,
        request: &HttpRequest,
        actor: ActorContext,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment_detail(self, request, actor, assignment_id).await
    }

    /// 获取答题视图（学生视角，选项不含 is_correct）
    pub async fn take_assignment(
        &self,
        request: &HttpRequest,
        actor: ActorContext,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        take::take_assignment(self, request, actor, assignment_id).await
    }
}
