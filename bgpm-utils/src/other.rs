//! Module containing some utility functions that didn't fit anywhere else.

use time::{format_description, OffsetDateTime};

/// Produces a timestamp `String` of the current time in YYYY-MM-DD_HH-mm-SS format.
///
/// Falls back to the UTC offset if the local one cannot be determined, and to plain unix seconds
/// if formatting fails.
pub fn get_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_description::parse("[year]-[month]-[day]_[hour]-[minute]-[second]")
        .ok()
        .and_then(|fmt| now.format(&fmt).ok())
        .unwrap_or_else(|| now.unix_timestamp().to_string())
}

#[cfg(test)]
mod test {
    #[test]
    fn timestamp_format() {
        let ts = super::get_timestamp();
        assert_eq!(ts.len(), "2024-10-19_12-04-38".len());
        assert_eq!(ts.as_bytes()[10], b'_');
        assert!(ts
            .chars()
            .all(|c| c.is_ascii_digit() || c == '-' || c == '_'));
    }
}
