//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod enrollments;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{ExamSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ExamSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ExamSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use std::collections::HashMap;

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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 选课关系模块
    async fn get_enrollment_by_user_id(&self, user_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_user_id_impl(user_id).await
    }

    // 题库模块
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_published_assignments_by_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.list_published_assignments_by_class_impl(class_id)
            .await
    }

    async fn list_published_assignments_by_teacher(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>> {
        self.list_published_assignments_by_teacher_impl(teacher_id)
            .await
    }

    async fn list_questions_with_options(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<QuestionWithOptions>> {
        self.list_questions_with_options_impl(assignment_id).await
    }

    async fn count_questions_for_assignments(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        self.count_questions_for_assignments_impl(assignment_ids)
            .await
    }

    // 提交台账模块
    async fn create_submission_with_answers(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: Vec<NewStudentAnswer>,
    ) -> Result<Submission> {
        self.create_submission_with_answers_impl(assignment_id, student_id, answers)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_with_answers(
        &self,
        submission_id: i64,
    ) -> Result<Option<(Submission, Vec<StudentAnswer>)>> {
        self.get_submission_with_answers_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_student(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(student_id).await
    }

    // 评分覆写模块
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: &str,
        feedback: Option<String>,
        adjustments: &[AnswerAdjustment],
    ) -> Result<(Submission, Vec<StudentAnswer>)> {
        self.grade_submission_impl(submission_id, grade, feedback, adjustments)
            .await
    }
}
