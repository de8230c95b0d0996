use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid UUID pattern")
});

/// User ids are UUIDs; anything else is rejected before touching the store.
pub fn validate_user_id(id: &str) -> AppResult<&str> {
    if UUID_RE.is_match(id) {
        Ok(id)
    } else {
        Err(AppError::InvalidUserId(id.to_string()))
    }
}
