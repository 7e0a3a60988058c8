//! Free-text Hijri date input.
//!
//! Accepted shapes, tried in order (first match wins):
//! 1. `<day> <month name> <year>`, e.g. `15 رمضان 1446`
//! 2. `<day>/<month>/<year>`, e.g. `15/9/1446`
//!
//! A trailing `هـ` is ignored, and Arabic-Indic digits are read like ASCII
//! digits. An unrecognised month name falls through to shape 2.

use std::sync::LazyLock;

use crate::date::HijriDate;
use crate::error::{CalendarError, ParseError, ParseField};
use crate::format::HIJRI_ERA_SUFFIX;
use crate::months::MonthNames;

/// Longest digit run accepted for any field.
const MAX_DIGITS: usize = 6;

static DEFAULT_PARSER: LazyLock<DateTextParser> = LazyLock::new(DateTextParser::default);

/// Parse with the standard Arabic month table.
pub fn parse_date_text(input: &str) -> Result<HijriDate, ParseError> {
    DEFAULT_PARSER.parse(input)
}

#[derive(Debug, Clone, Default)]
pub struct DateTextParser {
    names: MonthNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawParts<'a> {
    day: &'a str,
    month: u8,
    year: &'a str,
}

enum NamedShape<'a> {
    Matched(RawParts<'a>),
    UnknownMonth(String),
    NoMatch,
}

impl DateTextParser {
    pub fn new(names: MonthNames) -> Self {
        Self { names }
    }

    pub fn month_names(&self) -> &MonthNames {
        &self.names
    }

    pub fn parse(&self, input: &str) -> Result<HijriDate, ParseError> {
        let ascii = to_ascii_digits(input);
        let text = strip_era(ascii.trim());

        let unknown_month = match self.match_named(text) {
            NamedShape::Matched(parts) => return accept(input, parts),
            NamedShape::UnknownMonth(name) => Some(name),
            NamedShape::NoMatch => None,
        };

        if let Some(parts) = match_numeric(text) {
            let month = parse_number::<u8>(parts.1)
                .ok_or_else(|| ParseError::new(input, ParseField::Month, "month must be 1-12"))?;
            return accept(
                input,
                RawParts {
                    day: parts.0,
                    month,
                    year: parts.2,
                },
            );
        }

        Err(match unknown_month {
            Some(name) => ParseError::new(
                input,
                ParseField::Month,
                format!("unknown month name {name:?}"),
            ),
            None => ParseError::new(
                input,
                ParseField::Format,
                "expected \"<day> <month name> <year>\" or \"<day>/<month>/<year>\"",
            ),
        })
    }

    fn match_named<'a>(&self, text: &'a str) -> NamedShape<'a> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 3 {
            return NamedShape::NoMatch;
        }

        let day = tokens[0];
        let year = tokens[tokens.len() - 1];
        if !is_digits(day) || !is_digits(year) {
            return NamedShape::NoMatch;
        }

        let name = tokens[1..tokens.len() - 1].join(" ");
        match self.names.index_of(&name) {
            Some(month) => NamedShape::Matched(RawParts { day, month, year }),
            None => NamedShape::UnknownMonth(name),
        }
    }
}

fn accept(input: &str, parts: RawParts<'_>) -> Result<HijriDate, ParseError> {
    let day = parse_number::<u8>(parts.day)
        .ok_or_else(|| ParseError::new(input, ParseField::Day, "day out of range"))?;
    let year = parse_number::<i32>(parts.year)
        .ok_or_else(|| ParseError::new(input, ParseField::Year, "year out of range"))?;

    HijriDate::new(year, parts.month, day).map_err(|e| invalid(input, e))
}

fn invalid(input: &str, err: CalendarError) -> ParseError {
    let field = err.field().map(ParseField::from).unwrap_or(ParseField::Format);
    ParseError::new(input, field, err.to_string())
}

fn match_numeric(text: &str) -> Option<(&str, &str, &str)> {
    let mut parts = text.split('/').map(str::trim);
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    [day, month, year]
        .iter()
        .all(|p| is_digits(p))
        .then_some((day, month, year))
}

fn parse_number<T: core::str::FromStr>(digits: &str) -> Option<T> {
    if digits.len() > MAX_DIGITS {
        return None;
    }
    digits.parse().ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_era(text: &str) -> &str {
    text.strip_suffix(HIJRI_ERA_SUFFIX)
        .or_else(|| text.strip_suffix('ه'))
        .map(str::trim_end)
        .unwrap_or(text)
}

/// Map Arabic-Indic (U+0660..) and Eastern Arabic-Indic (U+06F0..) digits to ASCII.
fn to_ascii_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            other => other,
        })
        .collect()
}
