use std::fmt::Display;

/// Domain error taxonomy shared by every layer.
///
/// The API crate maps each variant to exactly one HTTP status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The row changed between the caller's read and its write.
    #[error("Concurrency conflict: {0}")]
    Concurrency(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] from any displayable key
    /// (a single id or a composite `project/developer` pair).
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
