//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Option entries (`code` + `label`) and JSON-LD fragments are value objects:
/// immutable, compared by their contents, freely cloned.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct OptionEntry {
///     code: &'static str,
///     label: &'static str,
/// }
///
/// impl ValueObject for OptionEntry {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
