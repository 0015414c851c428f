use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课关系实体：学生归属于哪个班级
//
// 班级/年级等主数据的维护不在本服务范围内，这里只做只读消费。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub class_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl crate::entity::enrollments::Model {
    pub fn into_enrollment(self) -> Enrollment {
        Enrollment {
            id: self.id,
            user_id: self.user_id,
            class_id: self.class_id,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or_else(chrono::Utc::now),
        }
    }
}
