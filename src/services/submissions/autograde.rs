//! 自动判分
//!
//! 无状态纯函数，提交时对每个答案调用一次，产出初始得分。
//! 之后教师评分可以覆写这里的任何结果。

use tracing::warn;

use crate::models::questions::entities::{QuestionType, QuestionWithOptions};
use crate::models::submissions::requests::AnswerInput;

/// 单题自动判分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScore {
    pub is_correct: bool,
    pub points: i32,
}

const INCORRECT: AutoScore = AutoScore {
    is_correct: false,
    points: 0,
};

/// 对单个答案自动判分
///
/// - 选择/判断题：选中唯一的正确选项得满分，未选或选错得 0 分
/// - 简答题：一律判 0 分，正确性只能由教师人工评分确立
/// - 正确选项数量不为 1 属于数据完整性故障：按不可判分处理并记录警告，
///   单道坏题不会让整份提交失败
pub fn score(question: &QuestionWithOptions, answer: &AnswerInput) -> AutoScore {
    match question.question.question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            let correct_options: Vec<_> =
                question.options.iter().filter(|o| o.is_correct).collect();

            if correct_options.len() != 1 {
                warn!(
                    "题目 {} 的正确选项数量为 {}，按不可判分处理",
                    question.question.id,
                    correct_options.len()
                );
                return INCORRECT;
            }

            match answer.selected_option_id {
                Some(selected) if selected == correct_options[0].id => AutoScore {
                    is_correct: true,
                    points: question.question.points,
                },
                _ => INCORRECT,
            }
        }
        // 自由文本不做任何字符串匹配
        QuestionType::ShortAnswer => INCORRECT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{Question, QuestionOption};

    fn mc_question(id: i64, points: i32, correct_flags: &[bool]) -> QuestionWithOptions {
        QuestionWithOptions {
            question: Question {
                id,
                assignment_id: 1,
                text: "2 + 2 = ?".to_string(),
                points,
                question_type: QuestionType::MultipleChoice,
            },
            options: correct_flags
                .iter()
                .enumerate()
                .map(|(i, is_correct)| QuestionOption {
                    id: id * 10 + i as i64,
                    question_id: id,
                    text: format!("Option {i}"),
                    is_correct: *is_correct,
                })
                .collect(),
        }
    }

    fn answer(question_id: i64, selected_option_id: Option<i64>) -> AnswerInput {
        AnswerInput {
            question_id,
            selected_option_id,
            text_answer: None,
        }
    }

    #[test]
    fn test_correct_option_scores_full_points() {
        let q = mc_question(1, 5, &[true, false, false]);
        let result = score(&q, &answer(1, Some(10)));
        assert!(result.is_correct);
        assert_eq!(result.points, 5);
    }

    #[test]
    fn test_wrong_option_scores_zero() {
        let q = mc_question(1, 5, &[true, false, false]);
        let result = score(&q, &answer(1, Some(11)));
        assert!(!result.is_correct);
        assert_eq!(result.points, 0);
    }

    #[test]
    fn test_no_selection_scores_zero() {
        let q = mc_question(1, 5, &[true, false]);
        let result = score(&q, &answer(1, None));
        assert!(!result.is_correct);
        assert_eq!(result.points, 0);
    }

    #[test]
    fn test_true_false_scores_like_choice() {
        let mut q = mc_question(2, 3, &[false, true]);
        q.question.question_type = QuestionType::TrueFalse;
        let result = score(&q, &answer(2, Some(21)));
        assert!(result.is_correct);
        assert_eq!(result.points, 3);
    }

    #[test]
    fn test_short_answer_is_never_auto_correct() {
        let q = QuestionWithOptions {
            question: Question {
                id: 3,
                assignment_id: 1,
                text: "Explain gravity.".to_string(),
                points: 10,
                question_type: QuestionType::ShortAnswer,
            },
            options: vec![],
        };
        let result = score(
            &q,
            &AnswerInput {
                question_id: 3,
                selected_option_id: None,
                text_answer: Some("It pulls things down.".to_string()),
            },
        );
        assert!(!result.is_correct);
        assert_eq!(result.points, 0);
    }

    #[test]
    fn test_no_correct_option_fails_closed() {
        let q = mc_question(4, 5, &[false, false]);
        let result = score(&q, &answer(4, Some(40)));
        assert!(!result.is_correct);
        assert_eq!(result.points, 0);
    }

    #[test]
    fn test_multiple_correct_options_fails_closed() {
        let q = mc_question(5, 5, &[true, true]);
        // 即使选中了其中一个"正确"选项也不给分
        let result = score(&q, &answer(5, Some(50)));
        assert!(!result.is_correct);
        assert_eq!(result.points, 0);
    }
}
