//! Field-level helpers shared by the per-entity rule sets.

use crate::error::CoreError;

/// Reject a missing or whitespace-only string.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject a string longer than `max` characters.
pub fn check_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Reject a body identifier that disagrees with the one in the request path.
///
/// `None` in the body means the client left the identifier out, which is
/// accepted: the path is authoritative.
pub fn check_path_matches_body<T: PartialEq + std::fmt::Display>(
    field: &str,
    path: T,
    body: Option<T>,
) -> Result<(), CoreError> {
    match body {
        Some(body) if body != path => Err(CoreError::Validation(format!(
            "{field} in the URL ({path}) does not match the request body ({body})"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("Name", "Alpha").is_ok());
        assert!(require_non_empty("Name", "").is_err());
        assert!(require_non_empty("Name", "   ").is_err());
    }

    #[test]
    fn test_check_max_len_counts_chars_not_bytes() {
        assert!(check_max_len("Role", "ñandú", 5).is_ok());
        assert!(check_max_len("Role", "ñandús", 5).is_err());
    }

    #[test]
    fn test_path_matches_body() {
        assert!(check_path_matches_body("id", 4, Some(4)).is_ok());
        assert!(check_path_matches_body("id", 4, None).is_ok());
        let err = check_path_matches_body("id", 4, Some(5)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
