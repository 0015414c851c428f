pub mod categorize;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::overview::requests::OverviewQuery;
use crate::models::users::entities::ActorContext;
use crate::storage::Storage;

pub struct OverviewService {
    storage: Option<Arc<dyn Storage>>,
}

impl OverviewService {
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

    /// 获取看板总览（作业 + 提交联接后按标签分区）
    pub async fn get_overview(
        &self,
        request: &HttpRequest,
        actor: ActorContext,
        query: OverviewQuery,
    ) -> ActixResult<HttpResponse> {
        list::get_overview(self, request, actor, query).await
    }
}
