use chrono::{DateTime, Local, NaiveDateTime};

/// Wall clock time in the server's zone; timestamps are stored without a zone.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Accepts RFC 3339 (converted to local wall clock) or a zone-less timestamp.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_naive_formats() {
        let dt = parse_datetime("2024-03-05T10:11:12").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5));
        assert_eq!(dt.second(), 12);

        let dt = parse_datetime("2024-03-05 10:11:12").unwrap();
        assert_eq!(dt.minute(), 11);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
    }

    #[test]
    fn accepts_rfc3339() {
        assert!(parse_datetime("2024-03-05T10:11:12+07:00").is_some());
    }
}
