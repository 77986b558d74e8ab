/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Calendar dates (project start/end, assignment date) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Optimistic concurrency token stored on every row.
pub type RowVersion = i32;
