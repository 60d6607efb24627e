//! The engine's runtime value domain.

use std::sync::Arc;

use crate::ty::Type;

/// A single runtime value.
///
/// `Value` is the row-level counterpart of [`Type`](crate::Type): every
/// variant here has a matching type-level tag, with `List`/`Record`
/// recursing the same way. Values are cheap to clone: composite variants
/// share their backing storage through `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    Int64(i64),
    /// An unsigned 64-bit integer.
    UInt64(u64),
    /// A 64-bit floating point number. Not `Eq` by construction; see
    /// [`Value::eq_total`] for the total-order comparison aggregation and
    /// grouping rely on.
    Double(f64),
    /// A UTF-8 string.
    String(Arc<str>),
    /// An opaque byte string.
    Bytes(Arc<[u8]>),
    /// A signed duration, in nanoseconds.
    Duration(i64),
    /// A point in time, in nanoseconds since the Unix epoch.
    Timestamp(i64),
    /// A homogeneous list of values.
    List(Arc<[Value]>),
    /// A nested record: an ordered sequence of named values.
    Record(Arc<[(String, Value)]>),
}

impl Value {
    /// Returns the [`Type`] tag of this value.
    pub fn kind(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Bool,
            Value::Int64(_) => Type::Int64,
            Value::UInt64(_) => Type::UInt64,
            Value::Double(_) => Type::Double,
            Value::String(_) => Type::String,
            Value::Bytes(_) => Type::Bytes,
            Value::Duration(_) => Type::Duration,
            Value::Timestamp(_) => Type::Timestamp,
            Value::List(items) => {
                let inner = items.first().map(Value::kind).unwrap_or(Type::Null);
                Type::List(Box::new(inner))
            }
            Value::Record(fields) => Type::Record(
                fields
                    .iter()
                    .map(|(name, value)| crate::ty::Field::new(name.clone(), value.kind()))
                    .collect(),
            ),
        }
    }

    /// Looks up a dotted field path within a (possibly nested) record value.
    ///
    /// Returns `Value::Null` for any path that does not resolve, including
    /// looking inside a non-record value — this mirrors the original
    /// engine's tolerant field resolution, where a missing field is absent
    /// data rather than an error.
    pub fn get_path(&self, path: &[String]) -> Value {
        let mut current = self;
        for segment in path {
            match current {
                Value::Record(fields) => match fields.iter().find(|(name, _)| name == segment) {
                    Some((_, value)) => current = value,
                    None => return Value::Null,
                },
                _ => return Value::Null,
            }
        }
        current.clone()
    }

    /// A total-order equality used by grouping and hashing, where `NaN`
    /// floating point values must still compare and hash consistently with
    /// themselves (unlike `PartialEq`, which treats `NaN != NaN`).
    pub fn eq_total(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.eq_total(y))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((an, av), (bn, bv))| an == bn && av.eq_total(bv))
            }
            _ => self == other,
        }
    }

    /// Hashes this value with the same 64-bit primitive used for schema
    /// fingerprints, so that group-by keys and schemas share one stable hash
    /// algorithm across the engine.
    pub fn stable_hash(&self, seed: u64) -> u64 {
        use crate::fingerprint::{combine, stable_hash64};
        match self {
            Value::Null => combine(seed, 0),
            Value::Bool(b) => combine(seed, *b as u64),
            Value::Int64(i) => combine(seed, *i as u64),
            Value::UInt64(u) => combine(seed, *u),
            Value::Double(f) => combine(seed, f.to_bits()),
            Value::String(s) => combine(seed, stable_hash64(s.as_bytes())),
            Value::Bytes(b) => combine(seed, stable_hash64(b)),
            Value::Duration(d) => combine(seed, *d as u64),
            Value::Timestamp(t) => combine(seed, *t as u64),
            Value::List(items) => items.iter().fold(combine(seed, items.len() as u64), |acc, v| v.stable_hash(acc)),
            Value::Record(fields) => fields.iter().fold(combine(seed, fields.len() as u64), |acc, (name, v)| {
                v.stable_hash(combine(acc, stable_hash64(name.as_bytes())))
            }),
        }
    }
}
