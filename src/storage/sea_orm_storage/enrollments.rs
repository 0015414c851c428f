//! 选课关系存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column, Entity as Enrollments};
use crate::errors::{ExamSystemError, Result};
use crate::models::enrollments::entities::Enrollment;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 获取学生的班级归属
    pub async fn get_enrollment_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询选课关系失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }
}
