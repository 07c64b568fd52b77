/// Room ids are PostgreSQL BIGSERIAL keys (the memory store mimics them).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
