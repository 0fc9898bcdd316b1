use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::DATE_PLACEHOLDER;

/**
 * Utility function to convert any ISO-8601-like date string to a Chrono NaiveDateTime object.
 * This function accepts YYYY-mm-dd HH:MM:SS separated by a space or letter T and with or
 * without months, days, hours, minutes or seconds. Missing parts are padded, hence
 * 2026-05 will be 2026-05-01 00:00:00 and 2026-05-10T18:20 will be 2026-05-10 18:20:00.
 * Returns None rather than an epoch default when nothing date-like can be read.
 */
pub fn iso_fuzzy_string_to_datetime(dt: &str) -> Option<NaiveDateTime> {
  let dt_base = if dt.contains('.') { dt.split('.').next().unwrap_or(dt) } else { dt };
  let clean_dt = dt_base.replace('T', " ").trim().to_string();
  let mut dt_parts = clean_dt.split(' ');
  let date_part = dt_parts.next().unwrap_or("");
  if date_part.is_empty() {
    return None;
  }
  let mut date_parts: Vec<&str> = date_part.split('-').collect();
  while date_parts.len() < 3 {
    date_parts.push("01");
  }
  let date_str = format!("{}-{}-{}", date_parts[0], date_parts[1], date_parts[2]);
  let time_part = dt_parts.next().unwrap_or("");
  let mut time_parts: Vec<&str> = if time_part.len() > 1 { time_part.split(':').collect() } else { vec![] };
  while time_parts.len() < 3 {
    time_parts.push("00");
  }
  let formatted_str = format!("{} {}:{}:{}", date_str, time_parts[0], time_parts[1], time_parts[2]);
  NaiveDateTime::parse_from_str(formatted_str.as_str(), "%Y-%m-%d %H:%M:%S").ok()
}

/*
* Accept the fuzzy ISO forms above plus the long month form
* used by trip records, e.g. "March 15, 2026".
*/
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDateTime> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }
  if let Some(dt) = iso_fuzzy_string_to_datetime(trimmed) {
    return Some(dt);
  }
  NaiveDate::parse_from_str(trimmed, "%B %d, %Y")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/*
* Human-readable "Month Year" label. Empty input yields the em-dash
* placeholder; anything unparsable passes through unchanged.
*/
pub fn format_month_year(raw: &str) -> String {
  if raw.trim().is_empty() {
    return DATE_PLACEHOLDER.to_owned();
  }
  match parse_flexible_date(raw) {
    Some(dt) => dt.format("%B %Y").to_string(),
    None => raw.to_owned(),
  }
}

/*
* Numeric key for chronological ordering without re-parsing the label.
* Milliseconds since the Unix epoch, 0 when unparsable.
*/
pub fn date_sort_key(raw: &str) -> i64 {
  parse_flexible_date(raw)
    .map(|dt| dt.and_utc().timestamp_millis())
    .unwrap_or(0)
}
