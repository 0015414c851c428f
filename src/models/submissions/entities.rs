use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
//
// Pending 只是概念上的"未提交"状态：提交记录从 Submitted 开始才会落库，
// 不存在预建的 Pending 行。状态只向前推进，Graded 可以被重复评分但
// 不会回退到 Submitted。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,   // 未提交（仅概念状态）
    Submitted, // 已提交
    Graded,    // 已评分
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";

    /// 状态机只允许向前：Pending -> Submitted -> Graded，Graded 可重入
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (SubmissionStatus::Pending, SubmissionStatus::Submitted)
                | (SubmissionStatus::Submitted, SubmissionStatus::Graded)
                | (SubmissionStatus::Graded, SubmissionStatus::Graded)
        )
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, submitted, graded"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    // 最终成绩标签：教师自由填写（字母等级、数字、自定义文本均可），
    // 不由系统从分数推导
    pub grade: Option<String>,
    // 教师评语
    pub feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 学生答案实体
//
// selected_option_id 与 text_answer 二者有且仅有其一，与题目类型对应。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct StudentAnswer {
    pub id: i64,
    pub submission_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>,
    pub text_answer: Option<String>,
    pub is_correct: bool,
    pub points_awarded: i32,
}

impl crate::entity::submissions::Model {
    pub fn into_submission(self) -> Submission {
        use std::str::FromStr;

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            status: SubmissionStatus::from_str(&self.status).unwrap_or(SubmissionStatus::Submitted),
            grade: self.grade,
            feedback: self.feedback,
            submitted_at: chrono::DateTime::from_timestamp(self.submitted_at, 0)
                .unwrap_or_else(chrono::Utc::now),
        }
    }
}

impl crate::entity::student_answers::Model {
    pub fn into_student_answer(self) -> StudentAnswer {
        StudentAnswer {
            id: self.id,
            submission_id: self.submission_id,
            question_id: self.question_id,
            selected_option_id: self.selected_option_id,
            text_answer: self.text_answer,
            is_correct: self.is_correct,
            points_awarded: self.points_awarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_forward_only() {
        assert!(SubmissionStatus::Pending.can_transition_to(SubmissionStatus::Submitted));
        assert!(SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Graded));
        // 重复评分允许
        assert!(SubmissionStatus::Graded.can_transition_to(SubmissionStatus::Graded));
    }

    #[test]
    fn test_status_never_regresses() {
        assert!(!SubmissionStatus::Graded.can_transition_to(SubmissionStatus::Submitted));
        assert!(!SubmissionStatus::Graded.can_transition_to(SubmissionStatus::Pending));
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Pending));
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Submitted));
    }

    #[test]
    fn test_status_roundtrip() {
        use std::str::FromStr;

        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Submitted,
            SubmissionStatus::Graded,
        ] {
            assert_eq!(
                SubmissionStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }
}
