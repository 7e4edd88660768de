use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format for tile dates, e.g. `Oct 18, 2026`.
const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Format an optional timestamp as a short date.
///
/// Absent or empty input yields an empty string. Input that does not parse
/// as a timestamp is returned unchanged, so free-text dates still display.
pub fn format_display_date(value: Option<&str>) -> String {
    match value {
        None | Some("") => String::new(),
        Some(raw) => match parse_date(raw) {
            Some(date) => date.format(SHORT_DATE_FORMAT).to_string(),
            None => raw.to_string(),
        },
    }
}

/// Calendar date of a timestamp, taken in the timestamp's own offset.
///
/// Accepts RFC 3339 / ISO-8601 (with or without offset or time part) and
/// RFC 2822 mail dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(strip_weekday(value)) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Drop a leading `Day,` from a mail date; a weekday that disagrees with the
/// date would otherwise make the whole value unparseable.
fn strip_weekday(value: &str) -> &str {
    match value.split_once(',') {
        Some((day, rest)) if !day.is_empty() && day.chars().all(|c| c.is_ascii_alphabetic()) => {
            rest.trim_start()
        }
        _ => value,
    }
}
