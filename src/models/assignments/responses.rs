use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::questions::entities::QuestionWithOptions;
use crate::models::questions::responses::QuestionPublic;

/// 教师/管理员视角的作业详情：包含完整题目树（含正确答案标记）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetailResponse {
    pub assignment: Assignment,
    pub questions: Vec<QuestionWithOptions>,
}

/// 学生答题视角的作业：题目选项不含 is_correct
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentTakeResponse {
    pub assignment: Assignment,
    pub questions: Vec<QuestionPublic>,
}
