/// Database primary keys are PostgreSQL BIGSERIAL values.
pub type DbId = i64;

/// Timestamps are always UTC; calendar dates (due dates, the dedup day)
/// use [`chrono::NaiveDate`] directly.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
