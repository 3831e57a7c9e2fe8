//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values.
/// `Money` and `Percent` are the value objects of this workspace: two amounts of
/// `1355.00` are interchangeable wherever they appear.
///
/// The trait requires `Clone + PartialEq + Debug` so values can be copied into
/// events and snapshots, compared in tests and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
