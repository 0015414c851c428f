//! 总览分类规则
//!
//! quiz/project 的判定没有显式字段，沿用线上一直在用的启发式：
//! 有题目、或 exam_type 为 "quiz"、或标题含 "quiz"（均不区分大小写）。
//! TODO: 给 assignments 表加显式的 is_quiz 列，替换掉标题匹配。

use crate::models::assignments::entities::Assignment;
use crate::models::overview::requests::MainCategory;
use crate::models::overview::responses::{OverviewItem, OverviewResponse};
use crate::models::submissions::entities::SubmissionStatus;

/// 判定一份作业是否属于 quiz 类
pub fn is_quiz(assignment: &Assignment, has_questions: bool) -> bool {
    if has_questions {
        return true;
    }

    if let Some(exam_type) = &assignment.exam_type
        && exam_type.eq_ignore_ascii_case("quiz")
    {
        return true;
    }

    assignment.title.to_lowercase().contains("quiz")
}

/// 条目是否落在请求的主分类里；未指定分类时全部保留
pub fn matches_category(item_is_quiz: bool, category: Option<MainCategory>) -> bool {
    match category {
        None => true,
        Some(MainCategory::Quiz) => item_is_quiz,
        Some(MainCategory::Project) => !item_is_quiz,
    }
}

/// 把联接后的条目分进看板标签
///
/// 分区规则：没有提交（或提交还不是 submitted/graded）归 open，
/// submitted 归 completed，graded 归 graded。每个条目恰好进一个分区。
pub fn partition(items: Vec<OverviewItem>) -> OverviewResponse {
    let mut response = OverviewResponse {
        open: vec![],
        completed: vec![],
        graded: vec![],
    };

    for item in items {
        match item.submission.as_ref().map(|s| s.status) {
            Some(SubmissionStatus::Submitted) => response.completed.push(item),
            Some(SubmissionStatus::Graded) => response.graded.push(item),
            Some(SubmissionStatus::Pending) | None => response.open.push(item),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentStatus;
    use crate::models::submissions::entities::Submission;

    fn assignment(title: &str, exam_type: Option<&str>) -> Assignment {
        Assignment {
            id: 1,
            teacher_id: 1,
            class_id: 1,
            subject: None,
            title: title.to_string(),
            description: None,
            due_date: None,
            status: AssignmentStatus::Published,
            exam_type: exam_type.map(|s| s.to_string()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn submission(status: SubmissionStatus) -> Submission {
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            status,
            grade: None,
            feedback: None,
            submitted_at: chrono::Utc::now(),
        }
    }

    fn item(status: Option<SubmissionStatus>) -> OverviewItem {
        OverviewItem {
            assignment: assignment("Book Report", Some("Homework")),
            submission: status.map(submission),
            is_quiz: false,
        }
    }

    #[test]
    fn test_has_questions_makes_quiz() {
        let a = assignment("Book Report", Some("Homework"));
        assert!(is_quiz(&a, true));
    }

    #[test]
    fn test_exam_type_quiz_case_insensitive() {
        assert!(is_quiz(&assignment("Chapter 3", Some("Quiz")), false));
        assert!(is_quiz(&assignment("Chapter 3", Some("QUIZ")), false));
        assert!(!is_quiz(&assignment("Chapter 3", Some("Homework")), false));
    }

    #[test]
    fn test_title_containing_quiz_counts() {
        assert!(is_quiz(&assignment("Algebra Quiz 1", None), false));
        assert!(is_quiz(&assignment("POP QUIZ", None), false));
    }

    // 无题目、exam_type=Homework、标题不含 quiz：归 project
    #[test]
    fn test_plain_homework_is_project() {
        let a = assignment("Book Report", Some("Homework"));
        assert!(!is_quiz(&a, false));
        assert!(matches_category(false, Some(MainCategory::Project)));
        assert!(!matches_category(false, Some(MainCategory::Quiz)));
    }

    #[test]
    fn test_no_category_keeps_everything() {
        assert!(matches_category(true, None));
        assert!(matches_category(false, None));
    }

    #[test]
    fn test_partition_by_submission_status() {
        let response = partition(vec![
            item(None),
            item(Some(SubmissionStatus::Pending)),
            item(Some(SubmissionStatus::Submitted)),
            item(Some(SubmissionStatus::Graded)),
        ]);

        assert_eq!(response.open.len(), 2);
        assert_eq!(response.completed.len(), 1);
        assert_eq!(response.graded.len(), 1);
    }

    // 任意状态组合下每个条目恰好进一个分区
    #[test]
    fn test_partition_is_complete() {
        let statuses = [
            None,
            Some(SubmissionStatus::Pending),
            Some(SubmissionStatus::Submitted),
            Some(SubmissionStatus::Graded),
        ];
        let items: Vec<OverviewItem> = statuses.iter().map(|s| item(*s)).collect();
        let total = items.len();

        let response = partition(items);
        assert_eq!(
            response.open.len() + response.completed.len() + response.graded.len(),
            total
        );
    }
}
