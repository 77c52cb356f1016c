//! Entity trait: identity that survives field changes.

/// Entity marker + minimal interface.
///
/// Uniqueness of identities is a collection-level concern; an entity only
/// reports who it is.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
