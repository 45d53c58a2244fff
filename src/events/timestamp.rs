//! Block timestamp formatting for reports.

use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Report format: `YYYY-MM-DD HH:MM`, zero padded.
pub const REPORT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format epoch milliseconds in the given time zone.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn format_timestamp_millis<Tz>(millis: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(millis)
        .earliest()
        .map(|dt| dt.format(REPORT_FORMAT).to_string())
}

/// Format a block timestamp (seconds) in the given time zone.
pub fn format_block_time<Tz>(secs: u64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let millis = i64::try_from(secs).ok()?.checked_mul(1000)?;
    format_timestamp_millis(millis, tz)
}

/// Format epoch milliseconds in the machine's local time zone.
pub fn format_local(millis: i64) -> Option<String> {
    format_timestamp_millis(millis, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_zero_padded_fields() {
        // 2024-03-05T07:09:00Z
        assert_eq!(
            format_timestamp_millis(1_709_622_540_000, &Utc).as_deref(),
            Some("2024-03-05 07:09")
        );
        // Seconds and millis are truncated, not rounded.
        assert_eq!(
            format_timestamp_millis(1_709_622_599_999, &Utc).as_deref(),
            Some("2024-03-05 07:09")
        );
    }

    #[test]
    fn test_offset_applied() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp_millis(1_709_622_540_000, &plus_two).as_deref(),
            Some("2024-03-05 09:09")
        );
    }

    #[test]
    fn test_block_seconds() {
        assert_eq!(format_block_time(1_709_622_540, &Utc).as_deref(), Some("2024-03-05 07:09"));
        assert_eq!(format_block_time(u64::MAX, &Utc), None);
    }

    #[test]
    fn test_local_has_report_shape() {
        let formatted = format_local(1_709_622_540_000).unwrap();
        assert_eq!(formatted.len(), "YYYY-MM-DD HH:MM".len());
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
    }
}
