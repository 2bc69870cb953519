//! Human-readable byte sizes.

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Formats a byte count using the `B`/`KB`/`MB` thresholds.
///
/// Values below 1 KiB are shown as whole bytes; larger values get one decimal.
///
/// # Example
/// ```rust
/// use visadesk_util::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(10 * 1024 * 1024), "10.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(MIB - 1), "1024.0 KB");
        assert_eq!(format_size(MIB), "1.0 MB");
        assert_eq!(format_size(2_621_440), "2.5 MB");
    }
}
