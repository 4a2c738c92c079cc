//! Date keys - calendar days as `YYYY-MM-DD` strings
//!
//! Workouts store their day as a plain key, never as a timestamp, so a
//! session logged late in the evening stays on the day the user picked.

use chrono::{Datelike, Local, Months, NaiveDate};

/// Format of a date key
const KEY_FORMAT: &str = "%Y-%m-%d";

/// Short month names used on chart axes (es-ES, as shown in the app)
const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Today in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date's own calendar fields as `YYYY-MM-DD`.
///
/// Works for anything with calendar fields: a `NaiveDate`, or a
/// `DateTime<Local>` (whose fields are already local, no UTC shift).
pub fn to_date_key<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a date key back into a calendar day.
///
/// Empty or missing keys fall back to today. Malformed keys fall back too;
/// use [`parse_date_key`] when the input has to be validated.
pub fn from_date_key(key: Option<&str>) -> NaiveDate {
    key.and_then(parse_date_key).unwrap_or_else(today)
}

/// Strict parse of a date key
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(key, KEY_FORMAT).ok()
}

/// Today's date key
pub fn today_key() -> String {
    to_date_key(&today())
}

/// Short day/month label for chart axes, e.g. "8 ene"
pub fn chart_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_SHORT[date.month0() as usize])
}

/// First day of the month `delta` months away from `date`'s month.
///
/// Always lands on day 1, so stepping from Jan 31 gives Feb 1, not March.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Parse a `YYYY-MM` month into its first day
pub fn parse_month(input: &str) -> Option<NaiveDate> {
    parse_date_key(&format!("{}-01", input.trim()))
}
