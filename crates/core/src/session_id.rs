//! Drafting session identifiers.
//!
//! A session id correlates one report-drafting flow (manual upload or
//! template import, results, generation, finalization) across requests.
//! Only random (version 4) UUIDs supplied by the client are honoured.

use uuid::{Uuid, Version};

/// Parse `raw` as a UUID v4, returning `None` for anything else.
pub fn parse_session_id(raw: &str) -> Option<Uuid> {
    let id = Uuid::parse_str(raw.trim()).ok()?;
    (id.get_version() == Some(Version::Random)).then_some(id)
}

/// Use the caller-supplied session id when it is a well-formed UUID v4,
/// otherwise mint a fresh one.
pub fn resolve_session_id(raw: Option<&str>) -> Uuid {
    raw.and_then(parse_session_id).unwrap_or_else(Uuid::new_v4)
}
