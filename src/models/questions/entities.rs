use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目类型
//
// 类型决定答案的形态：选择/判断题答选项 ID，简答题答自由文本。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    MultipleChoice, // 选择题
    TrueFalse,      // 判断题
    ShortAnswer,    // 简答题
}

impl QuestionType {
    pub const MULTIPLE_CHOICE: &'static str = "multiple_choice";
    pub const TRUE_FALSE: &'static str = "true_false";
    pub const SHORT_ANSWER: &'static str = "short_answer";

    /// 选择/判断题可自动判分，简答题只能由教师人工评分
    pub fn is_auto_gradable(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::TrueFalse)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            QuestionType::MULTIPLE_CHOICE => Ok(QuestionType::MultipleChoice),
            QuestionType::TRUE_FALSE => Ok(QuestionType::TrueFalse),
            QuestionType::SHORT_ANSWER => Ok(QuestionType::ShortAnswer),
            _ => Err(serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持的类型: multiple_choice, true_false, short_answer"
            ))),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "{}", QuestionType::MULTIPLE_CHOICE),
            QuestionType::TrueFalse => write!(f, "{}", QuestionType::TRUE_FALSE),
            QuestionType::ShortAnswer => write!(f, "{}", QuestionType::SHORT_ANSWER),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

// 题目实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub assignment_id: i64,
    pub text: String,
    // 满分值（正整数），人工调分不得超过它
    pub points: i32,
    pub question_type: QuestionType,
}

// 题目选项实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// 题目及其选项（题库读取的基本单元）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionWithOptions {
    pub question: Question,
    pub options: Vec<QuestionOption>,
}

impl crate::entity::questions::Model {
    pub fn into_question(self) -> Question {
        use std::str::FromStr;

        Question {
            id: self.id,
            assignment_id: self.assignment_id,
            text: self.text,
            points: self.points,
            // 未知类型按简答题处理：不会被自动判分
            question_type: QuestionType::from_str(&self.question_type)
                .unwrap_or(QuestionType::ShortAnswer),
        }
    }
}

impl crate::entity::question_options::Model {
    pub fn into_question_option(self) -> QuestionOption {
        QuestionOption {
            id: self.id,
            question_id: self.question_id,
            text: self.text,
            is_correct: self.is_correct,
        }
    }
}
