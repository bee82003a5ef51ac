//! Human-readable byte counts.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with one decimal place, stepping by 1024.
///
/// TB absorbs anything larger. The caller's value is not modified.
pub fn display_size(bytes: i64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(display_size(0), "0.0 B");
        assert_eq!(display_size(1023), "1023.0 B");
        assert_eq!(display_size(1024), "1.0 KB");
        assert_eq!(display_size(1536), "1.5 KB");
        assert_eq!(display_size(1_048_576), "1.0 MB");
        assert_eq!(display_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn test_tb_absorbs_larger() {
        assert_eq!(display_size(1_099_511_627_776), "1.0 TB");
        assert_eq!(display_size(1_125_899_906_842_624), "1024.0 TB");
    }

    #[test]
    fn test_input_untouched() {
        let stored = 5_000_i64;
        let _ = display_size(stored);
        assert_eq!(stored, 5_000);
    }
}
