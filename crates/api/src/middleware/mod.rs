//! Authentication and authorization middleware and extractors.
//!
//! - [`auth::AuthUser`] -- student identity from a Bearer token.
//! - [`admin_session::require_admin_session`] -- admin cookie guard for `/admin`.
//! - [`admin_session::CurrentAdmin`] -- the validated admin session.
//! - [`rbac::RequireModerator`], [`rbac::RequireAdmin`],
//!   [`rbac::RequireSuperAdmin`] -- minimum admin role.

pub mod admin_session;
pub mod auth;
pub mod rbac;
