use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单题作答输入
///
/// 选择/判断题填 selected_option_id，简答题填 text_answer，二者互斥。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AnswerInput {
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_answer: Option<String>,
}

/// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub answers: Vec<AnswerInput>,
}

/// 单题人工调分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AnswerAdjustment {
    pub question_id: i64,
    pub is_correct: bool,
    pub points: i32,
}

/// 教师评分请求
///
/// grade 为自由文本成绩标签，不参与分数计算。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: String,
    pub feedback: Option<String>,
    pub answers: Vec<AnswerAdjustment>,
}

/// 自动判分后的答案草稿（服务层 -> 存储层）
#[derive(Debug, Clone, Serialize)]
pub struct NewStudentAnswer {
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_answer: Option<String>,
    pub is_correct: bool,
    pub points_awarded: i32,
}
