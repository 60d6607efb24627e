//! The engine's schema-level type domain.

use serde::{Deserialize, Serialize};

/// A named, typed field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The field's name, unique within its enclosing record.
    pub name: String,
    /// The field's type.
    pub ty: Type,
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self { name: name.into(), ty }
    }
}

/// The schema-level type of a value.
///
/// Mirrors the value domain in [`crate::Value`] one-to-one, plus `Record` for
/// nested structures. There is deliberately no extension-type registry here:
/// domain-specific semantic tags (IP addresses, subnets, and the like) are a
/// concern of the operators built on top of this substrate, not of the
/// substrate itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool,
    /// A signed 64-bit integer.
    Int64,
    /// An unsigned 64-bit integer.
    UInt64,
    /// A 64-bit floating point number.
    Double,
    /// A UTF-8 string.
    String,
    /// An opaque byte string.
    Bytes,
    /// A signed duration, in nanoseconds.
    Duration,
    /// A point in time, in nanoseconds since the Unix epoch.
    Timestamp,
    /// A homogeneous list of values of the same type.
    List(Box<Type>),
    /// A nested record, i.e. an ordered sequence of named fields.
    Record(Vec<Field>),
}

impl Type {
    /// Returns the fields of this type if it is a record, `None` otherwise.
    pub fn as_record(&self) -> Option<&[Field]> {
        match self {
            Type::Record(fields) => Some(fields),
            _ => None,
        }
    }
}
