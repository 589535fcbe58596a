//! Authentication primitives.
//!
//! - [`jwt`] -- student bearer-token validation.
//! - [`admin_cookie`] -- back-office session cookie checks and builders.
//! - [`password`] -- Argon2id hashing for back-office accounts.

pub mod admin_cookie;
pub mod jwt;
pub mod password;
