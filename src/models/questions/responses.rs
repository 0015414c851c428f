use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::questions::entities::{QuestionOption, QuestionType, QuestionWithOptions};

/// 学生视角的题目选项：不暴露 is_correct
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionOptionPublic {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
}

/// 学生视角的题目（答题页使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionPublic {
    pub id: i64,
    pub assignment_id: i64,
    pub text: String,
    pub points: i32,
    pub question_type: QuestionType,
    pub options: Vec<QuestionOptionPublic>,
}

impl From<QuestionOption> for QuestionOptionPublic {
    fn from(option: QuestionOption) -> Self {
        Self {
            id: option.id,
            question_id: option.question_id,
            text: option.text,
        }
    }
}

impl From<QuestionWithOptions> for QuestionPublic {
    fn from(q: QuestionWithOptions) -> Self {
        Self {
            id: q.question.id,
            assignment_id: q.question.assignment_id,
            text: q.question.text,
            points: q.question.points,
            question_type: q.question.question_type,
            options: q.options.into_iter().map(Into::into).collect(),
        }
    }
}
