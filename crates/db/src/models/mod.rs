//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod admin_user;
pub mod feedback;
pub mod manual;
pub mod notification;
pub mod payment;
pub mod report;
pub mod stats;
pub mod template;
pub mod user;
