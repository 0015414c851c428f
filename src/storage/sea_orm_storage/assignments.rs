//! 题库存储操作
//!
//! 作业、题目、选项对本服务是只读数据：教师端的题目编辑流程
//! 在本服务范围之外。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column, Entity as Assignments};
use crate::entity::question_options::{Column as OptionColumn, Entity as QuestionOptions};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    assignments::entities::{Assignment, AssignmentStatus},
    questions::entities::{QuestionOption, QuestionWithOptions},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出班级的已发布作业（按截止时间倒序）
    pub async fn list_published_assignments_by_class_impl(
        &self,
        class_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Status.eq(AssignmentStatus::PUBLISHED))
            .order_by_desc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出教师布置的已发布作业（按截止时间倒序）
    pub async fn list_published_assignments_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Status.eq(AssignmentStatus::PUBLISHED))
            .order_by_desc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 获取作业的题目及选项
    pub async fn list_questions_with_options_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<QuestionWithOptions>> {
        let questions = Questions::find()
            .filter(QuestionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询题目失败: {e}")))?;

        if questions.is_empty() {
            return Ok(vec![]);
        }

        // 批量查询所有选项后在内存中按题目分组
        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let options = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.is_in(question_ids))
            .order_by_asc(OptionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询题目选项失败: {e}")))?;

        let mut option_map: HashMap<i64, Vec<QuestionOption>> = HashMap::new();
        for opt in options {
            option_map
                .entry(opt.question_id)
                .or_default()
                .push(opt.into_question_option());
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let options = option_map.remove(&q.id).unwrap_or_default();
                QuestionWithOptions {
                    question: q.into_question(),
                    options,
                }
            })
            .collect())
    }

    /// 批量统计作业的题目数量
    pub async fn count_questions_for_assignments_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        if assignment_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i64> = Questions::find()
            .select_only()
            .column(QuestionColumn::AssignmentId)
            .filter(QuestionColumn::AssignmentId.is_in(assignment_ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("统计题目数量失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for assignment_id in rows {
            *counts.entry(assignment_id).or_insert(0) += 1;
        }

        Ok(counts)
    }
}
