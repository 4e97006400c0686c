use unicode_width::UnicodeWidthStr;

use crate::countdown::time::parse_hh_mm;
use chrono::Timelike;

/// Format seconds as zero-padded "HH:MM:SS". Hours keep growing past 99
/// instead of rolling over into days; negative input reads as zero.
pub fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Convert a raw "HH:MM (TZ)" timing to "h:mm AM/PM".
/// Unparseable input is shown as "--:--".
pub fn to_12h(raw: &str) -> String {
    match parse_hh_mm(raw) {
        Ok(t) => {
            let (pm, hour) = t.hour12();
            format!("{}:{:02} {}", hour, t.minute(), if pm { "PM" } else { "AM" })
        }
        Err(_) => "--:--".to_string(),
    }
}

/// Replace ASCII digits with Bengali digits.
pub fn to_bn_digits(s: &str) -> String {
    const BN: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => BN[d as usize],
            _ => c,
        })
        .collect()
}

/// Left-align `s` in a column `width` terminal cells wide.
pub fn pad_display(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Create a simple progress bar from a percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_countdown(s: &str) -> i64 {
        let parts: Vec<i64> = s.split(':').map(|p| p.parse().unwrap()).collect();
        parts[0] * 3600 + parts[1] * 60 + parts[2]
    }

    #[test]
    fn countdown_examples() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(72 * 60), "01:12:00");
        assert_eq!(format_countdown(359_999), "99:59:59");
        assert_eq!(format_countdown(360_000), "100:00:00");
        assert_eq!(format_countdown(-5), "00:00:00");
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(to_12h("05:12 (+06)"), "5:12 AM");
        assert_eq!(to_12h("18:03 (+06)"), "6:03 PM");
        assert_eq!(to_12h("00:13"), "12:13 AM");
        assert_eq!(to_12h("12:00"), "12:00 PM");
        assert_eq!(to_12h("noon"), "--:--");
    }

    #[test]
    fn bengali_digits() {
        assert_eq!(to_bn_digits("05:12"), "০৫:১২");
        assert_eq!(to_bn_digits("Day 3"), "Day ৩");
    }

    #[test]
    fn padding_counts_cells_not_bytes() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("toolong", 3), "toolong");
    }

    #[test]
    fn bar_width_is_stable() {
        assert_eq!(progress_bar(50.0, 10), "█████░░░░░");
        assert_eq!(progress_bar(150.0, 4), "████");
        assert_eq!(progress_bar(-3.0, 4), "░░░░");
    }

    proptest! {
        #[test]
        fn countdown_round_trips(secs in 0i64..=359_999) {
            let s = format_countdown(secs);
            prop_assert_eq!(s.len(), 8);
            prop_assert_eq!(parse_countdown(&s), secs);
        }
    }
}
