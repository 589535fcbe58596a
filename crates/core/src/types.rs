/// Primary keys of back-office owned tables are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Student accounts are keyed by the identity provider's subject UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
