use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;

/// 总览条目：作业 + 该学生的提交（若有）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/overview.ts")]
pub struct OverviewItem {
    pub assignment: Assignment,
    pub submission: Option<Submission>,
    pub is_quiz: bool,
}

/// 总览响应：按看板标签分区
///
/// 每个条目恰好落在一个分区：open（未提交）、completed（已提交待批）、
/// graded（已评分）。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/overview.ts")]
pub struct OverviewResponse {
    pub open: Vec<OverviewItem>,
    pub completed: Vec<OverviewItem>,
    pub graded: Vec<OverviewItem>,
}
