//! Remote path splitting.
//!
//! Remote paths always use `/`, independent of the local platform, so these
//! helpers work on `&str` rather than `std::path`.

/// Returns true for paths anchored at the server root.
pub fn is_absolute(remote_path: &str) -> bool {
    remote_path.starts_with('/')
}

/// Splits the directory portion of `remote_path` into segments.
///
/// The directory portion is everything before the final `/`. Empty and `.`
/// segments are skipped, so `/a//b/./file` yields `["a", "b"]`.
pub fn directory_segments(remote_path: &str) -> Vec<&str> {
    let Some(idx) = remote_path.rfind('/') else {
        return Vec::new();
    };

    remote_path[..idx]
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Returns the final component of `remote_path`.
pub fn file_name(remote_path: &str) -> &str {
    remote_path.rsplit('/').next().unwrap_or(remote_path)
}

/// Path handed to the transfer once the directory walk has finished.
///
/// Absolute paths resolve the same from any working directory. A relative
/// path would be resolved against the directory the walk ended in, so only
/// its file name is used.
pub fn transfer_target(remote_path: &str) -> &str {
    if is_absolute(remote_path) {
        remote_path
    } else {
        file_name(remote_path)
    }
}
