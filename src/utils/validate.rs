//! 提交答卷的形态校验
//!
//! 提交必须覆盖作业的每一道题，且每个答案的形态与题型匹配：
//! 选择/判断题答选项 ID，简答题答非空文本，二者互斥。

use std::collections::HashSet;

use crate::models::ErrorCode;
use crate::models::questions::entities::{QuestionType, QuestionWithOptions};
use crate::models::submissions::requests::{AnswerAdjustment, AnswerInput};

/// 答卷校验错误
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerSetError {
    /// 有题目没有作答
    MissingAnswer { question_id: i64 },
    /// 答案指向了不属于该作业的题目
    UnknownQuestion { question_id: i64 },
    /// 同一道题出现多个答案
    DuplicateAnswer { question_id: i64 },
    /// 答案形态与题型不匹配
    MalformedAnswer {
        question_id: i64,
        reason: &'static str,
    },
}

impl AnswerSetError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AnswerSetError::MissingAnswer { .. } => ErrorCode::IncompleteAnswerSet,
            AnswerSetError::UnknownQuestion { .. } => ErrorCode::UnknownQuestion,
            AnswerSetError::DuplicateAnswer { .. } => ErrorCode::MalformedAnswer,
            AnswerSetError::MalformedAnswer { .. } => ErrorCode::MalformedAnswer,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AnswerSetError::MissingAnswer { question_id } => {
                format!("题目 {question_id} 缺少作答")
            }
            AnswerSetError::UnknownQuestion { question_id } => {
                format!("题目 {question_id} 不属于该作业")
            }
            AnswerSetError::DuplicateAnswer { question_id } => {
                format!("题目 {question_id} 出现重复作答")
            }
            AnswerSetError::MalformedAnswer {
                question_id,
                reason,
            } => {
                format!("题目 {question_id} 的答案形态不合法: {reason}")
            }
        }
    }
}

/// 校验一份答卷是否完整且形态正确
pub fn validate_answer_set(
    questions: &[QuestionWithOptions],
    answers: &[AnswerInput],
) -> Result<(), AnswerSetError> {
    let question_ids: HashSet<i64> = questions.iter().map(|q| q.question.id).collect();

    // 不允许答到作业之外的题目，也不允许重复作答
    let mut answered: HashSet<i64> = HashSet::new();
    for ans in answers {
        if !question_ids.contains(&ans.question_id) {
            return Err(AnswerSetError::UnknownQuestion {
                question_id: ans.question_id,
            });
        }
        if !answered.insert(ans.question_id) {
            return Err(AnswerSetError::DuplicateAnswer {
                question_id: ans.question_id,
            });
        }
    }

    // 每道题必须有作答，且形态匹配题型
    for q in questions {
        let ans = match answers.iter().find(|a| a.question_id == q.question.id) {
            Some(a) => a,
            None => {
                return Err(AnswerSetError::MissingAnswer {
                    question_id: q.question.id,
                });
            }
        };

        match q.question.question_type {
            QuestionType::MultipleChoice | QuestionType::TrueFalse => {
                if ans.selected_option_id.is_none() {
                    return Err(AnswerSetError::MissingAnswer {
                        question_id: q.question.id,
                    });
                }
                if ans.text_answer.is_some() {
                    return Err(AnswerSetError::MalformedAnswer {
                        question_id: q.question.id,
                        reason: "选择/判断题不接受文本作答",
                    });
                }
            }
            QuestionType::ShortAnswer => {
                if ans.selected_option_id.is_some() {
                    return Err(AnswerSetError::MalformedAnswer {
                        question_id: q.question.id,
                        reason: "简答题不接受选项作答",
                    });
                }
                match &ans.text_answer {
                    Some(text) if !text.trim().is_empty() => {}
                    _ => {
                        return Err(AnswerSetError::MissingAnswer {
                            question_id: q.question.id,
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

/// 调分校验错误
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    /// 调分指向了不属于该作业的题目
    UnknownQuestion { question_id: i64 },
    /// 分值超出 [0, 满分] 范围
    PointsOutOfRange {
        question_id: i64,
        points: i32,
        max_points: i32,
    },
}

impl AdjustmentError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AdjustmentError::UnknownQuestion { .. } => ErrorCode::UnknownQuestion,
            AdjustmentError::PointsOutOfRange { .. } => ErrorCode::PointsOutOfRange,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdjustmentError::UnknownQuestion { question_id } => {
                format!("题目 {question_id} 不属于该作业")
            }
            AdjustmentError::PointsOutOfRange {
                question_id,
                points,
                max_points,
            } => {
                format!("题目 {question_id} 的分值 {points} 超出范围 [0, {max_points}]")
            }
        }
    }
}

/// 校验教师的逐题调分
///
/// 超界的分值直接拒绝，不做截断；校验失败时调用方不得产生任何变更。
pub fn validate_adjustments(
    questions: &[QuestionWithOptions],
    adjustments: &[AnswerAdjustment],
) -> Result<(), AdjustmentError> {
    for adj in adjustments {
        let question = match questions.iter().find(|q| q.question.id == adj.question_id) {
            Some(q) => &q.question,
            None => {
                return Err(AdjustmentError::UnknownQuestion {
                    question_id: adj.question_id,
                });
            }
        };

        if adj.points < 0 || adj.points > question.points {
            return Err(AdjustmentError::PointsOutOfRange {
                question_id: adj.question_id,
                points: adj.points,
                max_points: question.points,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{Question, QuestionOption};

    fn question(id: i64, question_type: QuestionType) -> QuestionWithOptions {
        QuestionWithOptions {
            question: Question {
                id,
                assignment_id: 1,
                text: format!("Question {id}"),
                points: 5,
                question_type,
            },
            options: match question_type {
                QuestionType::ShortAnswer => vec![],
                _ => vec![
                    QuestionOption {
                        id: id * 10 + 1,
                        question_id: id,
                        text: "A".to_string(),
                        is_correct: true,
                    },
                    QuestionOption {
                        id: id * 10 + 2,
                        question_id: id,
                        text: "B".to_string(),
                        is_correct: false,
                    },
                ],
            },
        }
    }

    fn option_answer(question_id: i64, option_id: i64) -> AnswerInput {
        AnswerInput {
            question_id,
            selected_option_id: Some(option_id),
            text_answer: None,
        }
    }

    fn text_answer(question_id: i64, text: &str) -> AnswerInput {
        AnswerInput {
            question_id,
            selected_option_id: None,
            text_answer: Some(text.to_string()),
        }
    }

    #[test]
    fn test_complete_answer_set_passes() {
        let questions = vec![
            question(1, QuestionType::MultipleChoice),
            question(2, QuestionType::ShortAnswer),
        ];
        let answers = vec![option_answer(1, 11), text_answer(2, "An essay.")];
        assert!(validate_answer_set(&questions, &answers).is_ok());
    }

    #[test]
    fn test_missing_answer_rejected() {
        let questions = vec![
            question(1, QuestionType::MultipleChoice),
            question(2, QuestionType::TrueFalse),
        ];
        let answers = vec![option_answer(1, 11)];
        assert_eq!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::MissingAnswer { question_id: 2 })
        );
    }

    #[test]
    fn test_unselected_choice_counts_as_missing() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        let answers = vec![AnswerInput {
            question_id: 1,
            selected_option_id: None,
            text_answer: None,
        }];
        assert_eq!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::MissingAnswer { question_id: 1 })
        );
    }

    #[test]
    fn test_blank_text_counts_as_missing() {
        let questions = vec![question(1, QuestionType::ShortAnswer)];
        let answers = vec![text_answer(1, "   ")];
        assert_eq!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::MissingAnswer { question_id: 1 })
        );
    }

    #[test]
    fn test_both_fields_populated_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        let answers = vec![AnswerInput {
            question_id: 1,
            selected_option_id: Some(11),
            text_answer: Some("also text".to_string()),
        }];
        assert!(matches!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::MalformedAnswer { question_id: 1, .. })
        ));
    }

    #[test]
    fn test_option_on_short_answer_rejected() {
        let questions = vec![question(1, QuestionType::ShortAnswer)];
        let answers = vec![option_answer(1, 11)];
        assert!(matches!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::MalformedAnswer { question_id: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_question_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        let answers = vec![option_answer(1, 11), option_answer(99, 991)];
        assert_eq!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::UnknownQuestion { question_id: 99 })
        );
    }

    #[test]
    fn test_duplicate_answer_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        let answers = vec![option_answer(1, 11), option_answer(1, 12)];
        assert_eq!(
            validate_answer_set(&questions, &answers),
            Err(AnswerSetError::DuplicateAnswer { question_id: 1 })
        );
    }

    fn adjustment(question_id: i64, points: i32) -> AnswerAdjustment {
        AnswerAdjustment {
            question_id,
            is_correct: points > 0,
            points,
        }
    }

    #[test]
    fn test_adjustment_within_range_passes() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        assert!(validate_adjustments(&questions, &[adjustment(1, 0)]).is_ok());
        assert!(validate_adjustments(&questions, &[adjustment(1, 5)]).is_ok());
    }

    // 5 分题给 7 分必须被拒绝，而不是截断到 5
    #[test]
    fn test_points_above_max_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        assert_eq!(
            validate_adjustments(&questions, &[adjustment(1, 7)]),
            Err(AdjustmentError::PointsOutOfRange {
                question_id: 1,
                points: 7,
                max_points: 5,
            })
        );
    }

    #[test]
    fn test_negative_points_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        assert!(matches!(
            validate_adjustments(&questions, &[adjustment(1, -1)]),
            Err(AdjustmentError::PointsOutOfRange { .. })
        ));
    }

    #[test]
    fn test_adjustment_for_unknown_question_rejected() {
        let questions = vec![question(1, QuestionType::MultipleChoice)];
        assert_eq!(
            validate_adjustments(&questions, &[adjustment(99, 3)]),
            Err(AdjustmentError::UnknownQuestion { question_id: 99 })
        );
    }
}
