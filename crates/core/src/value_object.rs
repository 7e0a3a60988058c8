//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Calendar
/// dates and permission names are value objects; two `HijriDate`s with the same
/// year, month and day are the same date.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct HijriDate { year: i32, month: u8, day: u8 }
///
/// impl ValueObject for HijriDate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
