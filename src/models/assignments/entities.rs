use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业状态
//
// DRAFT 状态的作业对学生不可见，也不接受提交。
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Draft,     // 草稿
    Published, // 已发布
}

impl AssignmentStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssignmentStatus::DRAFT => Ok(AssignmentStatus::Draft),
            AssignmentStatus::PUBLISHED => Ok(AssignmentStatus::Published),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业状态: '{s}'. 支持的状态: draft, published"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "{}", AssignmentStatus::DRAFT),
            AssignmentStatus::Published => write!(f, "{}", AssignmentStatus::PUBLISHED),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "published" => Ok(AssignmentStatus::Published),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 布置作业的教师 ID
    pub teacher_id: i64,
    // 目标班级 ID
    pub class_id: i64,
    // 科目（自由文本，主数据管理不在本服务范围内）
    pub subject: Option<String>,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 截止时间
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 作业状态
    pub status: AssignmentStatus,
    // 考核类型标签（如 "Quiz"/"Homework"，自由文本）
    pub exam_type: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl crate::entity::assignments::Model {
    pub fn into_assignment(self) -> Assignment {
        use std::str::FromStr;

        Assignment {
            id: self.id,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            subject: self.subject,
            title: self.title,
            description: self.description,
            due_date: self
                .due_date
                .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
            status: AssignmentStatus::from_str(&self.status).unwrap_or(AssignmentStatus::Draft),
            exam_type: self.exam_type,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0)
                .unwrap_or_else(chrono::Utc::now),
            updated_at: chrono::DateTime::from_timestamp(self.updated_at, 0)
                .unwrap_or_else(chrono::Utc::now),
        }
    }
}
