use chrono::{Datelike, NaiveDate};

use crate::models::BillStatus;

/// Short month labels as shown in the bill list (French abbreviations, cut to
/// three letters). June and July share "Jui".
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Format an ISO `YYYY-MM-DD` date for display.
/// e.g. `"2004-04-04"` → `"4 Avr. 04"`
pub(crate) fn format_date(raw: &str) -> Result<String, chrono::ParseError> {
    let date = parse_iso_date(raw)?;
    let month = MONTHS[date.month0() as usize];
    let year = date.year().rem_euclid(100);
    Ok(format!("{} {month}. {year:02}", date.day()))
}

pub(crate) fn parse_iso_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

/// Parse a string produced by [`format_date`] back into a date.
///
/// "Jui" resolves to June and two-digit years pivot at 70 (`69` → 2069,
/// `70` → 1970), so the result only guarantees that formatting it again yields
/// the same display string.
pub(crate) fn parse_display_date(display: &str) -> Option<NaiveDate> {
    let mut parts = display.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month_label = parts.next()?.trim_end_matches('.');
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0..100).contains(&year) {
        return None;
    }
    let month = MONTHS.iter().position(|m| *m == month_label)? as u32 + 1;
    let full_year = if year < 70 { 2000 + year } else { 1900 + year };
    NaiveDate::from_ymd_opt(full_year, month, day)
}

/// Display label for a bill status.
pub(crate) fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}
