//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one with the new values (e.g. a customer moving gets a new
/// `Address`, the old one is never edited in place).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
