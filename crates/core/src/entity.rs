//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Role definitions and role assignments are entities: an assignment whose
/// dates are edited is still the same assignment.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
