//! Calendar export: a meeting document rendered as a single-VEVENT
//! iCalendar object.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::AppError;

/// Parse a stored meeting datetime.
///
/// Accepts RFC 3339 (`2025-01-01T09:00:00Z`, with offset) and naive ISO-8601
/// (`2025-01-01T09:00:00`); naive values are taken as UTC.
pub fn parse_meeting_date(value: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| AppError::validation(format!("invalid meeting date '{value}': {e}")))
}

/// Render a meeting document as a `text/calendar` body, CRLF-terminated per
/// the iCalendar format.
pub fn build_ics(meeting: &Value) -> Result<String, AppError> {
    let date = meeting
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Internal("stored meeting has no date".into()))?;
    let start = parse_meeting_date(date)?;

    let duration_minutes = meeting
        .get("duration_minutes")
        .and_then(Value::as_i64)
        .unwrap_or(30);
    let end = start + chrono::Duration::minutes(duration_minutes);

    let stamp = start.format("%Y%m%dT%H%M%SZ").to_string();
    let uid = meeting
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("meeting-{stamp}"));

    let attendees = meeting
        .get("attendees")
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Crewdesk//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{stamp}"),
        format!("DTSTART:{stamp}"),
        format!("DTEND:{}", end.format("%Y%m%dT%H%M%SZ")),
        format!("SUMMARY:{}", str_field(meeting, "title")),
        format!("DESCRIPTION:{}", str_field(meeting, "description")),
        format!("ATTENDEE:{attendees}"),
        format!("URL:{}", str_field(meeting, "meet_url")),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];
    Ok(lines.join("\r\n"))
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}
