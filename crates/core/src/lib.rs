//! Domain rules for SciDraft: errors, roles, validation and the pure parts
//! of the drafting pipeline. Nothing in this crate performs I/O.

pub mod admin_session;
pub mod error;
pub mod feedback;
pub mod notification;
pub mod payment;
pub mod plan;
pub mod prompt;
pub mod report;
pub mod roles;
pub mod search;
pub mod session_id;
pub mod template;
pub mod text;
pub mod types;
