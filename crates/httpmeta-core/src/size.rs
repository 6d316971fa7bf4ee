//! Human-readable byte sizes for non-HTML resources.

const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Shown when `Content-Length` is missing or unparsable.
pub const SIZE_UNKNOWN: &str = "size unknown";

/// Formats `bytes` with binary multiples and one decimal: `"12.1 KB"`.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Size descriptor from a raw `Content-Length` value.
pub fn describe_length(content_length: Option<u64>) -> String {
    content_length
        .map(human_size)
        .unwrap_or_else(|| SIZE_UNKNOWN.to_string())
}
