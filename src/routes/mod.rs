pub mod assignments;

pub mod overview;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use overview::configure_overview_routes;
pub use submissions::configure_submissions_routes;
