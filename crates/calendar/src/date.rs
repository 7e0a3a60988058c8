use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use usra_core::ValueObject;

use crate::convert;
use crate::error::CalendarError;
use crate::months::MonthNames;

/// A day in the tabular Hijri calendar. No time-of-day.
///
/// Construction always validates, so a `HijriDate` value is a real calendar
/// day inside the supported range. Ordering is chronological.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "HijriDateParts")]
pub struct HijriDate {
    year: i32,
    month: u8,
    day: u8,
}

/// Unvalidated `{year, month, day}` triple as it appears on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct HijriDateParts {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl TryFrom<HijriDateParts> for HijriDate {
    type Error = CalendarError;

    fn try_from(value: HijriDateParts) -> Result<Self, Self::Error> {
        HijriDate::new(value.year, value.month, value.day)
    }
}

impl ValueObject for HijriDate {}

impl HijriDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        convert::validate_hijri_date(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Caller guarantees the triple is valid.
    pub(crate) const fn from_valid_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        convert::gregorian_to_hijri(date)
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        convert::hijri_to_gregorian(self.year, self.month, self.day)
    }

    pub fn days_in_month(&self) -> u8 {
        convert::month_length(self.year, self.month)
    }
}

/// Renders with the canonical Arabic month names, e.g. `1 محرم 1446 هـ`.
impl core::fmt::Display for HijriDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::format::format_hijri(self, MonthNames::arabic_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DateField;

    #[test]
    fn new_validates_each_field() {
        assert!(HijriDate::new(1446, 1, 30).is_ok());
        assert_eq!(
            HijriDate::new(1446, 2, 30).unwrap_err(),
            CalendarError::InvalidDate {
                field: DateField::Day,
                year: 1446,
                month: 2,
                day: 30
            }
        );
        assert!(matches!(
            HijriDate::new(1446, 13, 1),
            Err(CalendarError::InvalidDate {
                field: DateField::Month,
                ..
            })
        ));
        assert!(matches!(
            HijriDate::new(0, 1, 1),
            Err(CalendarError::InvalidDate {
                field: DateField::Year,
                ..
            })
        ));
    }

    #[test]
    fn orders_chronologically() {
        let a = HijriDate::new(1445, 12, 29).unwrap();
        let b = HijriDate::new(1446, 1, 1).unwrap();
        let c = HijriDate::new(1446, 1, 2).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn deserialization_rejects_invalid_days() {
        let ok: HijriDate = serde_json::from_str(r#"{"year":1446,"month":9,"day":15}"#).unwrap();
        assert_eq!(ok, HijriDate::new(1446, 9, 15).unwrap());

        let bad = serde_json::from_str::<HijriDate>(r#"{"year":1446,"month":2,"day":30}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_as_plain_triple() {
        let date = HijriDate::new(1446, 1, 1).unwrap();
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            r#"{"year":1446,"month":1,"day":1}"#
        );
    }
}
