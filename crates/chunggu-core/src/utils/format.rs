use std::cmp::Ordering;

use crate::engine::RankPosition;

/// Placeholder rendered wherever a value is missing. Never render 0 instead.
pub const NO_DATA: &str = "—";

/// Format an optional average with one decimal, or the no-data placeholder.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => NO_DATA.to_string(),
    }
}

/// "3 / 20 (top 90%)", or the no-data placeholder for an unranked member.
pub fn format_rank(position: &RankPosition) -> String {
    match position.percentile {
        Some(percentile) if position.is_ranked() => {
            format!("{} / {} (top {}%)", position.rank, position.total, percentile)
        }
        _ => NO_DATA.to_string(),
    }
}

/// Format a Korean phone number for display.
/// Mobile numbers become 010-1234-5678, Seoul landlines 02-1234-5678.
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        11 => format!("{}-{}-{}", &digits[0..3], &digits[3..7], &digits[7..11]),
        10 if digits.starts_with("02") => {
            format!("{}-{}-{}", &digits[0..2], &digits[2..6], &digits[6..10])
        }
        10 => format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(Some(89.0)), "89.0");
        assert_eq!(format_average(Some(88.25)), "88.2");
        assert_eq!(format_average(None), "—");
    }

    #[test]
    fn test_format_rank() {
        let ranked = RankPosition { rank: 2, total: 10, percentile: Some(90) };
        assert_eq!(format_rank(&ranked), "2 / 10 (top 90%)");
        assert_eq!(format_rank(&RankPosition::unranked(10)), "—");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("01012345678"), "010-1234-5678");
        assert_eq!(format_phone("010-1234-5678"), "010-1234-5678");
        assert_eq!(format_phone("0212345678"), "02-1234-5678");
        assert_eq!(format_phone("0311234567"), "031-123-4567");
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("김철수님안녕하세요", 5), "김철...");
    }

    #[test]
    fn test_ignore_case_helpers() {
        assert_eq!(cmp_ignore_case("alpha", "Beta"), Ordering::Less);
        assert!(contains_ignore_case("Kim Chulsoo", "CHUL"));
        assert!(!contains_ignore_case("Kim", "Lee"));
    }
}
