//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Attribute declarations are entities keyed by their code: two declarations
/// with the same code describe the same catalog attribute, whatever their flags.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
