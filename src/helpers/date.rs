//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date using a strftime format string
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(format).to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00+09:00").unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&sample(), "%Y-%m-%d"), "2024-01-15");
    }

    #[test]
    fn test_date_xml() {
        assert_eq!(date_xml(&sample()), "2024-01-15T10:30:00+09:00");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&sample()), "January 15, 2024");
    }
}
