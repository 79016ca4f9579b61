use unicode_width::UnicodeWidthChar;

/// Clips `s` to at most `width - 1` display cells, then left-justifies the
/// result to exactly `width` cells.
pub fn clip_pad(s: &str, width: usize) -> String {
    let limit = width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > limit {
            break;
        }
        result.push(ch);
        used += ch_width;
    }
    while used < width {
        result.push(' ');
        used += 1;
    }
    result
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders a kibibyte count the way the process table prints it, e.g.
/// `12,345 K`. Records keep the numeric value; this runs at draw time only.
pub fn format_kib(kib: u64) -> String {
    format!("{} K", group_thousands(kib))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn formats_kib_with_suffix() {
        assert_eq!(format_kib(8), "8 K");
        assert_eq!(format_kib(12345), "12,345 K");
    }

    #[test]
    fn clip_pad_is_exactly_width() {
        assert_eq!(clip_pad("PID", 10), "PID       ");
        assert_eq!(clip_pad("", 4), "    ");
        // Overlong values keep at most width - 1 cells.
        assert_eq!(clip_pad("123456789012", 10), "123456789 ");
        assert_eq!(clip_pad("exactly10!", 10), "exactly10 ");
    }

    #[test]
    fn clip_pad_counts_display_cells() {
        // Wide characters take two cells each.
        assert_eq!(clip_pad("日本語テスト", 7), "日本語 ");
    }
}
