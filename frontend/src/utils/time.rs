use chrono::{DateTime, Utc};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// History records carry RFC 3339 strings; anything unparsable is shown verbatim.
pub fn format_change_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| format_timestamp(&dt.with_timezone(&Utc)))
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_time_normalizes_offsets_to_utc() {
        assert_eq!(
            format_change_time("2025-01-02T17:30:00+07:00"),
            "2025-01-02 10:30:00 UTC"
        );
    }

    #[test]
    fn change_time_passes_through_garbage() {
        assert_eq!(format_change_time("yesterday"), "yesterday");
    }
}
