//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod feedback_repo;
pub mod manual_session_repo;
pub mod notification_repo;
pub mod payment_repo;
pub mod report_repo;
pub mod stats_repo;
pub mod template_repo;
pub mod user_repo;

pub use admin_user_repo::AdminUserRepo;
pub use feedback_repo::FeedbackRepo;
pub use manual_session_repo::ManualSessionRepo;
pub use notification_repo::NotificationRepo;
pub use payment_repo::PaymentRepo;
pub use report_repo::ReportRepo;
pub use stats_repo::StatsRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
