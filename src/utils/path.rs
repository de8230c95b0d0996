//! Path utilities: expand `~` in configured paths.

use std::path::PathBuf;

/// Resolve a leading `~` (alone or followed by `/`) to the home directory.
/// Paths without it, or without a known home, are returned unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(r) if r.starts_with('/') => r.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
