//! String utility functions for text processing

/// Split a comma separated list, trimming items and dropping empty ones.
///
/// # Examples
/// ```
/// use subcompiler::utils::split_csv;
///
/// assert_eq!(split_csv(" HK, ,US,"), vec!["HK", "US"]);
/// ```
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human readable byte count with binary units and two decimals.
pub fn format_traffic(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes.max(0) as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv("a,b , c"), vec!["a", "b", "c"]);
        assert!(split_csv("").is_empty());
        assert!(split_csv(" , ,").is_empty());
    }

    #[test]
    fn test_format_traffic() {
        assert_eq!(format_traffic(0), "0.00 B");
        assert_eq!(format_traffic(1536), "1.50 KB");
        assert_eq!(format_traffic(10 * 1024 * 1024 * 1024), "10.00 GB");
        assert_eq!(format_traffic(-5), "0.00 B");
    }
}
