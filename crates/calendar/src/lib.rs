//! `usra-calendar`: Gregorian/Hijri conversion, Arabic month names, and
//! free-text date parsing.
//!
//! Everything here is a pure function over values; there is no shared mutable
//! state and no I/O.

pub mod convert;
pub mod date;
pub mod error;
pub mod format;
pub mod months;
pub mod parse;

pub use convert::{
    days_in_hijri_month, days_in_hijri_year, gregorian_to_hijri, hijri_to_gregorian,
    is_hijri_leap_year, is_valid_hijri_date, validate_hijri_date, MAX_HIJRI_YEAR, MIN_HIJRI_YEAR,
};
pub use date::{HijriDate, HijriDateParts};
pub use error::{CalendarError, DateField, ParseError, ParseField};
pub use format::{format_gregorian, format_hijri, format_hijri_numeric};
pub use months::{month_index, month_name, MonthNames, ARABIC_MONTH_NAMES};
pub use parse::{parse_date_text, DateTextParser};
