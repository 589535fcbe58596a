//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate input with `scidraft_core` rules, delegate storage to
//! the repositories in `scidraft_db` and map errors via [`AppError`].
//! Back-office handlers carry the `admin_` prefix and take a role extractor
//! from [`crate::middleware::rbac`].
//!
//! [`AppError`]: crate::error::AppError

pub mod admin_accounts;
pub mod admin_feedback;
pub mod admin_notifications;
pub mod admin_payments;
pub mod admin_reports;
pub mod admin_session;
pub mod admin_stats;
pub mod admin_templates;
pub mod admin_users;
pub mod auth;
pub mod drafts;
pub mod feedback;
pub mod manuals;
pub mod notifications;
pub mod payments;
pub mod reports;
pub mod templates;
