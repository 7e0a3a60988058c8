//! Hijri month-name table.
//!
//! One table is the source of truth for both display and lookup. It is a plain
//! value: callers that need different spellings build their own and hand it to
//! the parser and formatter.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::CalendarError;

/// Canonical Arabic names, Muharram first.
pub const ARABIC_MONTH_NAMES: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الآخر",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// Alternate spellings seen in hand-entered data.
const ARABIC_MONTH_ALIASES: [(&str, u8); 6] = [
    ("ربيع الثاني", 4),
    ("جمادى الأول", 5),
    ("جمادى الثانية", 6),
    ("جمادى الثاني", 6),
    ("ذي القعدة", 11),
    ("ذي الحجة", 12),
];

static ARABIC: LazyLock<MonthNames> = LazyLock::new(MonthNames::arabic);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthNames {
    names: [String; 12],
    lookup: HashMap<String, u8>,
}

impl MonthNames {
    /// Build a table from twelve canonical names, Muharram first.
    pub fn new(names: [&str; 12]) -> Result<Self, CalendarError> {
        let mut table = Self {
            names: names.map(str::to_string),
            lookup: HashMap::new(),
        };
        for (i, name) in names.iter().enumerate() {
            // i < 12
            table.insert_key(name, i as u8 + 1)?;
        }
        Ok(table)
    }

    /// The standard Arabic table with common aliases.
    pub fn arabic() -> Self {
        let mut table = Self {
            names: ARABIC_MONTH_NAMES.map(str::to_string),
            lookup: HashMap::new(),
        };
        for (i, name) in ARABIC_MONTH_NAMES.iter().enumerate() {
            table.lookup.insert(normalize_month_name(name), i as u8 + 1);
        }
        for (alias, month) in ARABIC_MONTH_ALIASES {
            table.lookup.insert(normalize_month_name(alias), month);
        }
        table
    }

    /// Shared instance of [`MonthNames::arabic`].
    pub fn arabic_ref() -> &'static MonthNames {
        &ARABIC
    }

    /// Accept another spelling for `month` during lookup.
    pub fn with_alias(mut self, alias: &str, month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        self.insert_key(alias, month)?;
        Ok(self)
    }

    /// Canonical name of a 1-based month index.
    pub fn name(&self, month: u8) -> Option<&str> {
        let index = usize::from(month).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }

    /// 1-based month index of a name, ignoring whitespace, tatweel, harakat
    /// and common letter variants.
    pub fn index_of(&self, name: &str) -> Option<u8> {
        let key = normalize_month_name(name);
        if key.is_empty() {
            return None;
        }
        self.lookup.get(&key).copied()
    }

    fn insert_key(&mut self, name: &str, month: u8) -> Result<(), CalendarError> {
        let key = normalize_month_name(name);
        match self.lookup.get(&key) {
            Some(existing) if *existing != month => Err(CalendarError::InvalidMonth(month)),
            _ => {
                self.lookup.insert(key, month);
                Ok(())
            }
        }
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::arabic()
    }
}

/// Canonical Arabic name of a 1-based month index.
pub fn month_name(month: u8) -> Option<&'static str> {
    let index = usize::from(month).checked_sub(1)?;
    ARABIC_MONTH_NAMES.get(index).copied()
}

/// 1-based month index of an Arabic month name (normalized lookup).
pub fn month_index(name: &str) -> Option<u8> {
    ARABIC.index_of(name)
}

/// Comparison key for month names.
pub fn normalize_month_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !is_arabic_mark(*c))
        .map(fold_letter)
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_arabic_mark(c: char) -> bool {
    matches!(c, '\u{0640}' | '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn fold_letter(c: char) -> char {
    match c {
        'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
        'ى' => 'ي',
        'ة' => 'ه',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_indices_agree() {
        for month in 1..=12u8 {
            let name = month_name(month).unwrap();
            assert_eq!(month_index(name), Some(month), "{name}");
        }
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn lookup_ignores_spacing_and_diacritics() {
        assert_eq!(month_index("  رمضان "), Some(9));
        assert_eq!(month_index("رَمَضَان"), Some(9));
        assert_eq!(month_index("رمـضان"), Some(9));
        assert_eq!(month_index("ربيع  الأول"), Some(3));
        assert_eq!(month_index("ربيع الاول"), Some(3));
        assert_eq!(month_index("جمادي الاخره"), Some(6));
        assert_eq!(month_index("ذوالحجة"), Some(12));
    }

    #[test]
    fn aliases_resolve_but_display_stays_canonical() {
        let names = MonthNames::arabic();
        assert_eq!(names.index_of("ربيع الثاني"), Some(4));
        assert_eq!(names.index_of("ذي القعدة"), Some(11));
        assert_eq!(names.name(4), Some("ربيع الآخر"));
    }

    #[test]
    fn unknown_and_empty_names_miss() {
        assert_eq!(month_index("January"), None);
        assert_eq!(month_index(""), None);
        assert_eq!(month_index("   "), None);
    }

    #[test]
    fn custom_tables_are_independent_values() {
        let latin = MonthNames::new([
            "Muharram",
            "Safar",
            "Rabi al-Awwal",
            "Rabi al-Thani",
            "Jumada al-Ula",
            "Jumada al-Akhirah",
            "Rajab",
            "Shaban",
            "Ramadan",
            "Shawwal",
            "Dhu al-Qadah",
            "Dhu al-Hijjah",
        ])
        .unwrap()
        .with_alias("Ramadhan", 9)
        .unwrap();

        assert_eq!(latin.index_of("ramadan"), Some(9));
        assert_eq!(latin.index_of("Ramadhan"), Some(9));
        assert_eq!(latin.name(9), Some("Ramadan"));
        assert_eq!(latin.index_of("رمضان"), None);
        assert_eq!(month_index("Ramadan"), None);
    }

    #[test]
    fn conflicting_aliases_are_rejected() {
        let err = MonthNames::arabic().with_alias("رمضان", 10).unwrap_err();
        assert_eq!(err, CalendarError::InvalidMonth(10));
        assert!(MonthNames::arabic().with_alias("رمضان", 9).is_ok());
        assert!(MonthNames::arabic().with_alias("x", 13).is_err());
    }
}
