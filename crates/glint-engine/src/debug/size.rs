const UNITS: [&str; 4] = ["B", "kB", "MB", "GB"];

/// Formats a byte count with binary scaling.
///
/// Below 1 kB the count is printed as an integer; above, with one decimal.
/// `GB` is the largest unit.
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_one_kilobyte() {
        assert_eq!(human_readable_size(0), "0 B");
        assert_eq!(human_readable_size(512), "512 B");
        assert_eq!(human_readable_size(1023), "1023 B");
    }

    #[test]
    fn kilobyte_boundary() {
        assert_eq!(human_readable_size(1024), "1.0 kB");
        assert_eq!(human_readable_size(1536), "1.5 kB");
    }

    #[test]
    fn megabytes_and_gigabytes() {
        assert_eq!(human_readable_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(human_readable_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn gigabytes_is_the_largest_unit() {
        assert_eq!(human_readable_size(2048 * 1024 * 1024 * 1024), "2048.0 GB");
    }
}
