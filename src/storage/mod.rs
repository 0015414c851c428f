use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    assignments::entities::Assignment,
    enrollments::entities::Enrollment,
    questions::entities::QuestionWithOptions,
    submissions::{
        entities::{StudentAnswer, Submission},
        requests::{AnswerAdjustment, NewStudentAnswer},
    },
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户查询方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 选课关系查询方法
    // 获取学生的班级归属
    async fn get_enrollment_by_user_id(&self, user_id: i64) -> Result<Option<Enrollment>>;

    /// 题库读取方法（对本服务只读）
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出班级的已发布作业
    async fn list_published_assignments_by_class(&self, class_id: i64)
    -> Result<Vec<Assignment>>;
    // 列出教师布置的已发布作业
    async fn list_published_assignments_by_teacher(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>>;
    // 获取作业的题目及选项
    async fn list_questions_with_options(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<QuestionWithOptions>>;
    // 批量统计作业的题目数量（总览的 is_quiz 判定用）
    async fn count_questions_for_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>>;

    /// 提交台账方法
    // 原子地创建提交及全部答案；(assignment_id, student_id) 的唯一索引
    // 保证并发提交只有一条成功，冲突返回 SubmissionConflict
    async fn create_submission_with_answers(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: Vec<NewStudentAnswer>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取提交及其答案集
    async fn get_submission_with_answers(
        &self,
        submission_id: i64,
    ) -> Result<Option<(Submission, Vec<StudentAnswer>)>>;
    // 查询学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出学生的全部提交
    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>>;

    /// 评分覆写方法
    // 原子地覆写答案得分并推进提交状态到 graded；重复评分允许
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: &str,
        feedback: Option<String>,
        adjustments: &[AnswerAdjustment],
    ) -> Result<(Submission, Vec<StudentAnswer>)>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
