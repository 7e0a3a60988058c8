//! Calendar and date-text errors.
//!
//! Both are recoverable by re-prompting whoever typed the date; they never
//! indicate a bug in the engine.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use usra_core::DomainError;

/// Component of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl core::fmt::Display for DateField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DateField::Year => f.write_str("year"),
            DateField::Month => f.write_str("month"),
            DateField::Day => f.write_str("day"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Day/month/year outside the calendar's valid range.
    #[error("invalid hijri date {year}-{month:02}-{day:02}: {field} out of range")]
    InvalidDate {
        field: DateField,
        year: i32,
        month: u8,
        day: u8,
    },

    #[error("hijri month {0} is not in 1..=12")]
    InvalidMonth(u8),

    /// The Gregorian date has no counterpart in the supported Hijri span.
    #[error("gregorian date {0} is outside the supported hijri range")]
    OutOfRange(NaiveDate),

    /// The Hijri date maps past the last representable Gregorian date.
    #[error("hijri date {year}-{month:02}-{day:02} has no representable gregorian date")]
    Unrepresentable { year: i32, month: u8, day: u8 },
}

impl CalendarError {
    /// Field to highlight in a form, if the error points at one.
    pub fn field(&self) -> Option<DateField> {
        match self {
            CalendarError::InvalidDate { field, .. } => Some(*field),
            CalendarError::InvalidMonth(_) => Some(DateField::Month),
            CalendarError::OutOfRange(_) | CalendarError::Unrepresentable { .. } => {
                Some(DateField::Year)
            }
        }
    }
}

impl From<CalendarError> for DomainError {
    fn from(value: CalendarError) -> Self {
        DomainError::validation(value.to_string())
    }
}

/// Which part of free-text input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseField {
    /// The text matches none of the accepted shapes.
    Format,
    Year,
    Month,
    Day,
}

impl From<DateField> for ParseField {
    fn from(value: DateField) -> Self {
        match value {
            DateField::Year => ParseField::Year,
            DateField::Month => ParseField::Month,
            DateField::Day => ParseField::Day,
        }
    }
}

impl core::fmt::Display for ParseField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseField::Format => f.write_str("format"),
            ParseField::Year => f.write_str("year"),
            ParseField::Month => f.write_str("month"),
            ParseField::Day => f.write_str("day"),
        }
    }
}

/// Free-text date input that could not be turned into a Hijri date.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("cannot parse date {input:?} ({field}): {message}")]
pub struct ParseError {
    /// The raw text as the user entered it.
    pub input: String,
    pub field: ParseField,
    pub message: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, field: ParseField, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            field,
            message: message.into(),
        }
    }
}

impl From<ParseError> for DomainError {
    fn from(value: ParseError) -> Self {
        DomainError::validation(value.to_string())
    }
}
