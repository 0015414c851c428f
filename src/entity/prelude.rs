//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::question_options::{
    ActiveModel as QuestionOptionActiveModel, Entity as QuestionOptions,
    Model as QuestionOptionModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Entity as StudentAnswers,
    Model as StudentAnswerModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
