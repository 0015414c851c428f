//! 提交与评分存储操作
//!
//! 提交和学生答案是一个聚合：多行写入一律走事务，
//! 读者要么看到评分前的答案集，要么看到评分后的，不会看到中间状态。

use super::SeaOrmStorage;
use crate::entity::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Column as AnswerColumn, Entity as StudentAnswers,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{ExamSystemError, Result};
use crate::models::submissions::{
    entities::{StudentAnswer, Submission, SubmissionStatus},
    requests::{AnswerAdjustment, NewStudentAnswer},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 原子地创建提交及全部答案
    ///
    /// (assignment_id, student_id) 上的唯一索引把"检查后写入"的竞态
    /// 关死在数据库层：并发提交时只有一条 INSERT 成功，失败方收到
    /// SubmissionConflict。
    pub async fn create_submission_with_answers_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: Vec<NewStudentAnswer>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            status: Set(SubmissionStatus::Submitted.to_string()),
            submitted_at: Set(now),
            ..Default::default()
        };

        let submission = match model.insert(&txn).await {
            Ok(m) => m,
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(ExamSystemError::submission_conflict(format!(
                        "学生 {student_id} 已提交过作业 {assignment_id}"
                    )));
                }
                return Err(ExamSystemError::database_operation(format!(
                    "创建提交失败: {e}"
                )));
            }
        };

        for ans in answers {
            let model = StudentAnswerActiveModel {
                submission_id: Set(submission.id),
                question_id: Set(ans.question_id),
                selected_option_id: Set(ans.selected_option_id),
                text_answer: Set(ans.text_answer),
                is_correct: Set(ans.is_correct),
                points_awarded: Set(ans.points_awarded),
                ..Default::default()
            };

            model
                .insert(&txn)
                .await
                .map_err(|e| ExamSystemError::database_operation(format!("写入答案失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(submission.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取提交及其答案集
    pub async fn get_submission_with_answers_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<(Submission, Vec<StudentAnswer>)>> {
        let submission = match self.get_submission_by_id_impl(submission_id).await? {
            Some(sub) => sub,
            None => return Ok(None),
        };

        let answers = StudentAnswers::find()
            .filter(AnswerColumn::SubmissionId.eq(submission_id))
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(Some((
            submission,
            answers.into_iter().map(|m| m.into_student_answer()).collect(),
        )))
    }

    /// 查询学生对某作业的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出学生的全部提交（按提交时间倒序）
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 原子地执行教师评分
    ///
    /// 覆写被调整答案的 is_correct / points_awarded，更新成绩与评语，
    /// 状态推进为 graded。整个覆写在一个事务内完成，重复评分得到
    /// 相同的终态。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        grade: &str,
        feedback: Option<String>,
        adjustments: &[AnswerAdjustment],
    ) -> Result<(Submission, Vec<StudentAnswer>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = Submissions::find_by_id(submission_id)
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询提交失败: {e}")))?
            .ok_or_else(|| ExamSystemError::not_found(format!("提交不存在: {submission_id}")))?;

        // 逐题覆写答案得分
        for adj in adjustments {
            StudentAnswers::update_many()
                .col_expr(AnswerColumn::IsCorrect, Expr::value(adj.is_correct))
                .col_expr(AnswerColumn::PointsAwarded, Expr::value(adj.points))
                .filter(AnswerColumn::SubmissionId.eq(submission_id))
                .filter(AnswerColumn::QuestionId.eq(adj.question_id))
                .exec(&txn)
                .await
                .map_err(|e| {
                    ExamSystemError::database_operation(format!("覆写答案得分失败: {e}"))
                })?;
        }

        // 更新提交：成绩标签、评语、状态推进为 graded
        let mut model: ActiveModel = submission.into();
        model.grade = Set(Some(grade.to_string()));
        model.feedback = Set(feedback);
        model.status = Set(SubmissionStatus::Graded.to_string());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("更新提交失败: {e}")))?;

        let answers = StudentAnswers::find()
            .filter(AnswerColumn::SubmissionId.eq(submission_id))
            .order_by_asc(AnswerColumn::Id)
            .all(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询答案失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((
            updated.into_submission(),
            answers.into_iter().map(|m| m.into_student_answer()).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::*;
    use crate::models::submissions::entities::SubmissionStatus;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    /// 单连接的内存 SQLite，迁移后直接构造存储实例
    async fn setup_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);

        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        SeaOrmStorage { db }
    }

    async fn seed_user(storage: &SeaOrmStorage, username: &str, role: &str) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = UserActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            role: Set(role.to_string()),
            status: Set("active".to_string()),
            display_name: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(&storage.db).await.expect("seed user").id
    }

    async fn seed_class(storage: &SeaOrmStorage) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = ClassActiveModel {
            name: Set("8A".to_string()),
            grade_label: Set("Grade 8".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(&storage.db).await.expect("seed class").id
    }

    async fn seed_assignment(
        storage: &SeaOrmStorage,
        teacher_id: i64,
        class_id: i64,
        status: &str,
    ) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = AssignmentActiveModel {
            teacher_id: Set(teacher_id),
            class_id: Set(class_id),
            subject: Set(Some("Math".to_string())),
            title: Set("Algebra Quiz 1".to_string()),
            description: Set(None),
            due_date: Set(Some(now + 86400)),
            status: Set(status.to_string()),
            exam_type: Set(Some("Quiz".to_string())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(&storage.db).await.expect("seed assignment").id
    }

    async fn seed_question(storage: &SeaOrmStorage, assignment_id: i64, points: i32) -> i64 {
        let model = QuestionActiveModel {
            assignment_id: Set(assignment_id),
            text: Set("2 + 2 = ?".to_string()),
            points: Set(points),
            question_type: Set("multiple_choice".to_string()),
            ..Default::default()
        };
        model.insert(&storage.db).await.expect("seed question").id
    }

    async fn seed_option(
        storage: &SeaOrmStorage,
        question_id: i64,
        text: &str,
        is_correct: bool,
    ) -> i64 {
        let model = QuestionOptionActiveModel {
            question_id: Set(question_id),
            text: Set(text.to_string()),
            is_correct: Set(is_correct),
            ..Default::default()
        };
        model.insert(&storage.db).await.expect("seed option").id
    }

    /// 两道 5 分选择题，一对一错：提交后状态为 submitted，自动得分合计 5
    #[tokio::test]
    async fn test_create_submission_persists_autograded_answers() {
        let storage = setup_storage().await;
        let teacher_id = seed_user(&storage, "teacher1", "teacher").await;
        let student_id = seed_user(&storage, "student1", "student").await;
        let class_id = seed_class(&storage).await;
        let assignment_id = seed_assignment(&storage, teacher_id, class_id, "published").await;

        let q1 = seed_question(&storage, assignment_id, 5).await;
        let q1_a = seed_option(&storage, q1, "4", true).await;
        seed_option(&storage, q1, "5", false).await;
        let q2 = seed_question(&storage, assignment_id, 5).await;
        seed_option(&storage, q2, "yes", true).await;
        let q2_b = seed_option(&storage, q2, "no", false).await;

        let submission = storage
            .create_submission_with_answers_impl(
                assignment_id,
                student_id,
                vec![
                    NewStudentAnswer {
                        question_id: q1,
                        selected_option_id: Some(q1_a),
                        text_answer: None,
                        is_correct: true,
                        points_awarded: 5,
                    },
                    NewStudentAnswer {
                        question_id: q2,
                        selected_option_id: Some(q2_b),
                        text_answer: None,
                        is_correct: false,
                        points_awarded: 0,
                    },
                ],
            )
            .await
            .expect("create submission");

        assert_eq!(submission.status, SubmissionStatus::Submitted);

        let (found, answers) = storage
            .get_submission_with_answers_impl(submission.id)
            .await
            .expect("load submission")
            .expect("submission exists");
        assert_eq!(found.id, submission.id);
        assert_eq!(answers.len(), 2);
        let total: i32 = answers.iter().map(|a| a.points_awarded).sum();
        assert_eq!(total, 5);
    }

    /// 同一学生重复提交同一作业必须撞上唯一索引
    #[tokio::test]
    async fn test_duplicate_submission_is_conflict() {
        let storage = setup_storage().await;
        let teacher_id = seed_user(&storage, "teacher1", "teacher").await;
        let student_id = seed_user(&storage, "student1", "student").await;
        let class_id = seed_class(&storage).await;
        let assignment_id = seed_assignment(&storage, teacher_id, class_id, "published").await;
        let q1 = seed_question(&storage, assignment_id, 5).await;
        let q1_a = seed_option(&storage, q1, "4", true).await;

        let answer = NewStudentAnswer {
            question_id: q1,
            selected_option_id: Some(q1_a),
            text_answer: None,
            is_correct: true,
            points_awarded: 5,
        };

        storage
            .create_submission_with_answers_impl(assignment_id, student_id, vec![answer.clone()])
            .await
            .expect("first submission");

        let err = storage
            .create_submission_with_answers_impl(assignment_id, student_id, vec![answer])
            .await
            .expect_err("second submission must fail");
        assert!(matches!(err, ExamSystemError::SubmissionConflict(_)));

        // 失败的那次不能留下半个提交
        let submissions = storage
            .list_submissions_by_student_impl(student_id)
            .await
            .expect("list submissions");
        assert_eq!(submissions.len(), 1);
    }

    /// 评分覆写答案得分并推进状态；调整后合计 10 分
    #[tokio::test]
    async fn test_grade_overwrites_answers_and_advances_status() {
        let storage = setup_storage().await;
        let teacher_id = seed_user(&storage, "teacher1", "teacher").await;
        let student_id = seed_user(&storage, "student1", "student").await;
        let class_id = seed_class(&storage).await;
        let assignment_id = seed_assignment(&storage, teacher_id, class_id, "published").await;
        let q1 = seed_question(&storage, assignment_id, 5).await;
        let q1_a = seed_option(&storage, q1, "4", true).await;
        let q2 = seed_question(&storage, assignment_id, 5).await;
        let q2_b = seed_option(&storage, q2, "no", false).await;

        let submission = storage
            .create_submission_with_answers_impl(
                assignment_id,
                student_id,
                vec![
                    NewStudentAnswer {
                        question_id: q1,
                        selected_option_id: Some(q1_a),
                        text_answer: None,
                        is_correct: true,
                        points_awarded: 5,
                    },
                    NewStudentAnswer {
                        question_id: q2,
                        selected_option_id: Some(q2_b),
                        text_answer: None,
                        is_correct: false,
                        points_awarded: 0,
                    },
                ],
            )
            .await
            .expect("create submission");

        let adjustments = vec![AnswerAdjustment {
            question_id: q2,
            is_correct: true,
            points: 5,
        }];

        let (graded, answers) = storage
            .grade_submission_impl(submission.id, "A", Some("Good work".to_string()), &adjustments)
            .await
            .expect("grade submission");

        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.grade.as_deref(), Some("A"));
        assert_eq!(graded.feedback.as_deref(), Some("Good work"));
        let total: i32 = answers.iter().map(|a| a.points_awarded).sum();
        assert_eq!(total, 10);

        // 相同输入重复评分得到相同终态
        let (regraded, answers) = storage
            .grade_submission_impl(submission.id, "A", Some("Good work".to_string()), &adjustments)
            .await
            .expect("regrade submission");
        assert_eq!(regraded.status, SubmissionStatus::Graded);
        assert_eq!(regraded.grade.as_deref(), Some("A"));
        let total: i32 = answers.iter().map(|a| a.points_awarded).sum();
        assert_eq!(total, 10);
    }

    /// 评分不存在的提交返回 NotFound
    #[tokio::test]
    async fn test_grade_missing_submission_is_not_found() {
        let storage = setup_storage().await;

        let err = storage
            .grade_submission_impl(9999, "A", None, &[])
            .await
            .expect_err("missing submission must fail");
        assert!(matches!(err, ExamSystemError::NotFound(_)));
    }
}
