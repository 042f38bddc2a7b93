//! Utility functions for logging hygiene and file system checks.
//!
//! This module provides the small helpers used throughout the application:
//! - String truncation for keeping mirror response bodies loggable
//! - Output directory validation before any artifact is written

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes with an ellipsis and byte
/// count indicator appended. The cut always lands on a character boundary,
/// which matters here because mirror payloads are mostly Chinese text.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if it fits in `max` bytes, otherwise a truncated
/// version with `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Back off until the cut sits on a char boundary.
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Arguments
///
/// * `path` - The directory path to validate
///
/// # Returns
///
/// `Ok(())` if the directory exists and is writable, or an error describing
/// the failure.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Probe with a small sync write using std fs (simpler error surface).
    let probe_path = Path::new(path).join(".write_probe");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // Each of these characters is 3 bytes in UTF-8, so byte 10 falls
        // inside the fourth character. The cut backs down to byte 9 and
        // keeps three whole characters of the 39-byte string.
        let s = "编辑推荐热门榜锋芒榜新星榜";
        let result = truncate_for_log(s, 10);
        assert_eq!(result, "编辑推…(+30 bytes)");
        assert!(!result.starts_with("编辑推荐"));
    }

    #[test]
    fn test_truncate_for_log_exact_fit_untouched() {
        let s = "exactly10!";
        assert_eq!(truncate_for_log(s, 10), "exactly10!");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let nested = nested.to_str().unwrap();

        ensure_writable_dir(nested).await.unwrap();
        assert!(Path::new(nested).is_dir());
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_leaves_no_probe_behind() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        ensure_writable_dir(dir).await.unwrap();
        let leftovers: Vec<_> = stdfs::read_dir(dir).unwrap().collect();
        assert!(leftovers.is_empty());
    }
}
