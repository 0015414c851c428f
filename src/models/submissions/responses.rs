use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assignments::entities::Assignment;
use crate::models::questions::entities::QuestionWithOptions;
use crate::models::submissions::entities::{StudentAnswer, Submission};

/// 提交详情（批改/回顾页使用）
///
/// total_score 是当前 points_awarded 之和：提交后为自动判分结果，
/// 评分后为教师调整的结果。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetailResponse {
    pub submission: Submission,
    pub answers: Vec<StudentAnswer>,
    pub assignment: Assignment,
    pub questions: Vec<QuestionWithOptions>,
    pub total_score: i32,
}

/// 评分结果响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradedSubmissionResponse {
    pub submission: Submission,
    pub answers: Vec<StudentAnswer>,
    pub total_score: i32,
}
