//! Human-readable byte sizes

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Format a size as KB below 1 MB, otherwise as MB, with two decimals
pub fn format_size(size_in_bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let size = size_in_bytes as f64;
    if size < MB {
        format!("{:.2} KB", size / KB)
    } else {
        format!("{:.2} MB", size / MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(0), "0.00 KB");
        assert_eq!(format_size(512), "0.50 KB");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.00 KB");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }
}
