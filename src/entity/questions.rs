//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub points: i32,
    pub question_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::question_options::Entity")]
    Options,
    #[sea_orm(has_many = "super::student_answers::Entity")]
    StudentAnswers,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::question_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl Related<super::student_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAnswers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
