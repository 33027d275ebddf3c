//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two with the
/// same attribute values are equal, and "modifying" one means constructing a
/// new one. `Money { amount, currency }` is a value object; a stock
/// adjustment document (which has an id and continuity across state changes)
/// is not.
///
/// The bounds keep value objects cheap to copy, comparable by value, and
/// debuggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
