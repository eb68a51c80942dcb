//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: they are defined entirely by their
/// attribute values, so two instances with the same values are equal. They are
/// immutable; "changing" one means constructing a new instance, which is where
/// the type's invariants get re-checked.
///
/// - **Value Object**: `Stock { quantity: 3, available: true }`
/// - **Entity**: `Product { id: ProductId(...), .. }`
///
/// The trait requires `Clone` (values are cheap to copy), `PartialEq` (compared by
/// attributes) and `Debug`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
