//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, or `None` while the entity has not been
    /// assigned one by storage yet.
    fn id(&self) -> Option<&Self::Id>;
}
