pub mod assignments;
pub mod overview;
pub mod submissions;

pub use assignments::AssignmentService;
pub use overview::OverviewService;
pub use submissions::SubmissionService;
