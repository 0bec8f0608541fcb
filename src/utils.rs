//! Utility functions for size formatting and path handling

use std::path::Path;

/// Units used by [`format_bytes`], in ascending 1024-based magnitude
const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count as a human readable string
///
/// Magnitude is chosen by powers of 1024 and clamped to the largest unit,
/// so sizes beyond 1024 GB are still expressed in GB. Values in plain bytes
/// are whole numbers and render without decimals; every other unit carries
/// two decimal places.
///
/// # Examples
///
/// ```
/// use yt2gif::utils::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut pow = 0usize;
    let mut threshold = 1024u64;
    while pow < BYTE_UNITS.len() - 1 && bytes >= threshold {
        pow += 1;
        threshold = threshold.saturating_mul(1024);
    }

    if pow == 0 {
        return format!("{} {}", bytes, BYTE_UNITS[0]);
    }

    let scaled = bytes as f64 / 1024f64.powi(pow as i32);
    format!("{:.2} {}", scaled, BYTE_UNITS[pow])
}

/// Remove a file if it exists, ignoring "not found"
///
/// Returns `true` when a file was actually removed. Other I/O errors are
/// logged and swallowed; cleanup must never mask the primary outcome.
pub fn remove_if_exists(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(?path, error = %e, "failed to remove file");
            false
        }
    }
}
