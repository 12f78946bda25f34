use unicode_width::UnicodeWidthStr;

/// Format a chart value, trimming trailing zeros
pub fn format_value(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Horizontal bar for a chart value relative to the series maximum.
pub fn value_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return "·".to_string();
    }
    let count = ((value / max).min(1.0) * width as f64).round().max(1.0) as usize;
    "▇".repeat(count)
}

/// Pad to a display width, counting emoji and CJK as two columns.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_trims_whole_numbers() {
        assert_eq!(format_value(5.0), "5");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.0 / 3.0), "0.3");
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(2, 4, 4), "██░░");
        assert_eq!(progress_bar(9, 4, 4), "████");
    }

    #[test]
    fn value_bar_has_at_least_one_cell() {
        assert_eq!(value_bar(0.0, 10.0, 10), "·");
        assert_eq!(value_bar(0.1, 10.0, 10), "▇");
        assert_eq!(value_bar(10.0, 10.0, 4), "▇▇▇▇");
    }

    #[test]
    fn pad_display_counts_wide_glyphs() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("📚", 4), "📚  ");
        assert_eq!(pad_display("toolong", 3), "toolong");
    }
}
