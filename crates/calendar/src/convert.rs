//! Gregorian ↔ Hijri conversion over the tabular Islamic calendar.
//!
//! Both directions route through an integer Julian Day Number, so the two
//! conversions are exact inverses with no rounding drift.
//!
//! Tabular rules:
//! - 30-year cycle; years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29 are leap
//!   years of 355 days, the other 19 have 354.
//! - Odd months have 30 days, even months 29, except month 12 which has 30
//!   days in a leap year.

use chrono::{Datelike, NaiveDate};

use crate::date::HijriDate;
use crate::error::{CalendarError, DateField};

/// JDN of 1 Muharram 1 AH.
///
/// Anchored so that 1 Muharram 1446 falls on 2024-07-07.
pub const HIJRI_EPOCH_JDN: i64 = 1_948_439;

pub const MIN_HIJRI_YEAR: i32 = 1;
pub const MAX_HIJRI_YEAR: i32 = 9999;

pub fn is_hijri_leap_year(year: i32) -> bool {
    (14 + 11 * i64::from(year)).rem_euclid(30) < 11
}

pub fn days_in_hijri_year(year: i32) -> u16 {
    if is_hijri_leap_year(year) { 355 } else { 354 }
}

/// Month length for a month already known to be in 1..=12.
pub(crate) fn month_length(year: i32, month: u8) -> u8 {
    if month == 12 && is_hijri_leap_year(year) {
        30
    } else if month % 2 == 1 {
        30
    } else {
        29
    }
}

pub fn days_in_hijri_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    Ok(month_length(year, month))
}

/// Checks a Hijri triple, reporting the first offending field.
pub fn validate_hijri_date(year: i32, month: u8, day: u8) -> Result<(), CalendarError> {
    let invalid = |field| CalendarError::InvalidDate {
        field,
        year,
        month,
        day,
    };

    if !(MIN_HIJRI_YEAR..=MAX_HIJRI_YEAR).contains(&year) {
        return Err(invalid(DateField::Year));
    }
    if !(1..=12).contains(&month) {
        return Err(invalid(DateField::Month));
    }
    if day < 1 || day > month_length(year, month) {
        return Err(invalid(DateField::Day));
    }
    Ok(())
}

pub fn is_valid_hijri_date(year: i32, month: u8, day: u8) -> bool {
    validate_hijri_date(year, month, day).is_ok()
}

pub fn gregorian_to_hijri(date: NaiveDate) -> Result<HijriDate, CalendarError> {
    jdn_to_hijri(gregorian_to_jdn(date)).ok_or(CalendarError::OutOfRange(date))
}

pub fn hijri_to_gregorian(year: i32, month: u8, day: u8) -> Result<NaiveDate, CalendarError> {
    validate_hijri_date(year, month, day)?;
    jdn_to_gregorian(hijri_to_jdn(year, month, day))
        .ok_or(CalendarError::Unrepresentable { year, month, day })
}

/// Proleptic Gregorian date to JDN (Fliegel & Van Flandern).
pub fn gregorian_to_jdn(date: NaiveDate) -> i64 {
    let year = i64::from(date.year());
    let month = i64::from(date.month());
    let day = i64::from(date.day());

    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    day + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

/// JDN to proleptic Gregorian date; `None` past chrono's range.
pub fn jdn_to_gregorian(jdn: i64) -> Option<NaiveDate> {
    let a = jdn + 32044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);

    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = 100 * b + d - 4800 + m.div_euclid(10);

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// JDN of a Hijri date. Inputs are not validated.
pub fn hijri_to_jdn(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year);
    let m = i64::from(month);

    i64::from(day)
        + (59 * (m - 1) + 1) / 2
        + (y - 1) * 354
        + (3 + 11 * y).div_euclid(30)
        + HIJRI_EPOCH_JDN
        - 1
}

/// Hijri date of a JDN; `None` outside the supported year range.
pub fn jdn_to_hijri(jdn: i64) -> Option<HijriDate> {
    if jdn < HIJRI_EPOCH_JDN {
        return None;
    }

    let elapsed = jdn - HIJRI_EPOCH_JDN;
    let estimate = (30 * elapsed + 10_646).div_euclid(10_631);
    if estimate > i64::from(MAX_HIJRI_YEAR) + 1 {
        return None;
    }

    let mut year = i32::try_from(estimate).ok()?;
    while year > MIN_HIJRI_YEAR && jdn < hijri_to_jdn(year, 1, 1) {
        year -= 1;
    }
    while jdn >= hijri_to_jdn(year + 1, 1, 1) {
        year += 1;
    }
    if year > MAX_HIJRI_YEAR {
        return None;
    }

    let mut remaining = jdn - hijri_to_jdn(year, 1, 1);
    let mut month = 1u8;
    while month < 12 && remaining >= i64::from(month_length(year, month)) {
        remaining -= i64::from(month_length(year, month));
        month += 1;
    }

    let day = u8::try_from(remaining + 1).ok()?;
    Some(HijriDate::from_valid_parts(year, month, day))
}
