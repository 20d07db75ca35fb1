// Formatting helpers shared by the engine's payload builder and the dashboard panels.

/// Formats a price with two decimals, e.g. `$123.45`.
pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Formats a percentage with an explicit sign for positive values, e.g. `+2.50%`.
pub fn format_signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Compact volume label: `1.25M`, `830.0K`, `950`.
pub fn format_volume(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(123.456), "$123.46");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_format_signed_percent() {
        assert_eq!(format_signed_percent(2.5), "+2.50%");
        assert_eq!(format_signed_percent(-1.234), "-1.23%");
        assert_eq!(format_signed_percent(0.0), "0.00%");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(1_250_000.0), "1.25M");
        assert_eq!(format_volume(830_000.0), "830.0K");
        assert_eq!(format_volume(950.0), "950");
        assert_eq!(format_volume(3_100_000_000.0), "3.10B");
    }
}
