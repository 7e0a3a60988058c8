//! Display formats shared with the UI.
//!
//! These strings are compared byte-for-byte by clients, so keep them stable.

use chrono::NaiveDate;

use crate::date::HijriDate;
use crate::months::MonthNames;

/// Era marker appended to Hijri display dates.
pub const HIJRI_ERA_SUFFIX: &str = "هـ";

/// `"<day> <month name> <year> هـ"`, e.g. `15 رمضان 1446 هـ`.
pub fn format_hijri(date: &HijriDate, names: &MonthNames) -> String {
    let month = names.name(date.month()).unwrap_or_default();
    format!(
        "{} {} {} {}",
        date.day(),
        month,
        date.year(),
        HIJRI_ERA_SUFFIX
    )
}

/// `"<day>/<month>/<year>"`, e.g. `15/9/1446`.
pub fn format_hijri_numeric(date: &HijriDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// ISO `YYYY-MM-DD`.
pub fn format_gregorian(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
