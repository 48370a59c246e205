/// Utilities for date and time formatting
///
/// Backend timestamps are ISO 8601 (RFC 3339 or bare `YYYY-MM-DD`);
/// the UI shows them as "15 Mar 2024" / "15 Mar 2024, 02:02 PM".
/// Timestamps with an offset are shown in the browser's local time;
/// bare timestamps are taken as already local.
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};

/// Смещение часового пояса браузера
#[cfg(target_arch = "wasm32")]
fn local_offset() -> FixedOffset {
    // getTimezoneOffset(): минуты от локального времени до UTC (Dhaka = -360)
    let minutes = js_sys::Date::new_0().get_timezone_offset() as i32;
    FixedOffset::west_opt(minutes * 60).unwrap_or(Utc.fix())
}

#[cfg(not(target_arch = "wasm32"))]
fn local_offset() -> FixedOffset {
    Utc.fix()
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    parse_in_offset(value, local_offset())
}

fn parse_in_offset(value: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&offset).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value.split('T').next().unwrap_or(value), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format ISO datetime string to "15 Mar 2024, 02:02 PM"
/// Unparseable input is returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    parse_naive(datetime_str)
        .map(|dt| dt.format("%d %b %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| datetime_str.to_string())
}

/// Format ISO date string to "15 Mar 2024"
pub fn format_date(date_str: &str) -> String {
    parse_naive(date_str)
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

/// Compact date for QR payloads and file names: "2024-03-15"
pub fn iso_date(date_str: &str) -> String {
    parse_naive(date_str)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

/// Текущее время по часам браузера (`SystemTime` в wasm32 недоступен)
pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15 Mar 2024, 02:02 PM"
        );
        assert_eq!(
            format_datetime("2024-12-31 09:59:59"),
            "31 Dec 2024, 09:59 AM"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15 Mar 2024");
        assert_eq!(format_date("2024-03-15T14:02:26+06:00"), "15 Mar 2024");
    }

    #[test]
    fn test_offset_timestamps_shift_to_local_time() {
        let dhaka = FixedOffset::east_opt(6 * 3600).unwrap();
        let local = parse_in_offset("2024-03-15T12:00:00+00:00", dhaka).unwrap();
        assert_eq!(local.format("%d %b %Y, %I:%M %p").to_string(), "15 Mar 2024, 06:00 PM");

        let next_day = parse_in_offset("2024-03-15T20:30:00Z", dhaka).unwrap();
        assert_eq!(next_day.format("%Y-%m-%d %H:%M").to_string(), "2024-03-16 02:30");

        // без смещения время уже локальное
        let bare = parse_in_offset("2024-03-15 12:00:00", dhaka).unwrap();
        assert_eq!(bare.format("%H:%M").to_string(), "12:00");
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(iso_date("2024-03-15T23:10:00Z"), "2024-03-15");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
