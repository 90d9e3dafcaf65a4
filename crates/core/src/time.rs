use chrono::{DateTime, Datelike, Local, Utc};

/// Parse a server timestamp into UTC, tolerating the formats the backend
/// has emitted across versions: RFC 3339, bare ISO without offset, and the
/// space-separated SQL form.
pub fn parse_timestamp_utc(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    None
}

/// Format a server timestamp for list rows in local time.
///
/// Same-year timestamps drop the year; unparseable input falls back to a
/// truncated slice of the raw string so rows never render blank.
pub fn format_timestamp(value: &str) -> String {
    match parse_timestamp_utc(value) {
        Some(dt) => format_local(dt.with_timezone(&Local)),
        None if value.len() > 10 => value[5..value.len().min(16)].to_string(),
        None => value.to_string(),
    }
}

fn format_local(local: DateTime<Local>) -> String {
    let today = Local::now().date_naive();
    if local.date_naive().year() == today.year() {
        local.format("%m/%d %H:%M").to_string()
    } else {
        local.format("%Y/%m/%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_timestamp_utc("2025-06-01T12:30:00+09:00").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 3, 30, 0).unwrap());
    }

    #[test]
    fn parses_naive_iso_as_utc() {
        let dt = parse_timestamp_utc("2025-06-01T12:30:00.123").expect("parse");
        assert_eq!(dt.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parses_sql_style_timestamp() {
        let dt = parse_timestamp_utc("2025-06-01 12:30:00").expect("parse");
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp_utc("not a date").is_none());
    }

    #[test]
    fn format_falls_back_to_truncated_raw() {
        assert_eq!(format_timestamp("2025-06-01T99:99"), "06-01T99:99");
    }

    #[test]
    fn format_passes_short_garbage_through() {
        assert_eq!(format_timestamp("soon"), "soon");
    }
}
