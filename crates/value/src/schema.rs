//! Named, fingerprinted record schemas.

use serde::{Deserialize, Serialize};

use crate::fingerprint::{combine, stable_hash64};
use crate::ty::{Field, Type};

/// The index of a field within a [`Schema`], as returned by
/// [`Schema::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIndex {
    /// A concrete field at this position in the record's field list.
    Field(usize),
    /// The `#schema`/`@schema` meta-selector, targeting the schema's name
    /// rather than one of its fields.
    SchemaName,
}

/// A named, ordered record schema with a stable content fingerprint.
///
/// Two schemas fingerprint equally if and only if their field name/type
/// sequences are equal; the schema's own `name` does not participate in the
/// fingerprint; only structure does, matching the original engine's
/// `table_slice`/`record_type` equivalence used to decide whether two
/// batches can be concatenated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Creates a new schema with the given name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self { name: name.into(), fields }
    }

    /// The schema's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema's fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// A 64-bit structural fingerprint: stable across processes, sensitive
    /// to field name, type, and order, insensitive to the schema's name.
    pub fn fingerprint(&self) -> u64 {
        self.fields.iter().fold(stable_hash64(b"tenzir.schema"), |hash, field| {
            let hash = combine(hash, stable_hash64(field.name.as_bytes()));
            combine(hash, type_hash(&field.ty))
        })
    }

    /// Resolves a dotted field path, or the `#schema`/`@schema`
    /// meta-selector, to a [`FieldIndex`].
    ///
    /// An empty path resolves to the record root and is represented as
    /// `FieldIndex::Field` pointing nowhere meaningful is not supported here;
    /// callers needing "the whole record" should special-case an empty path
    /// before calling `resolve`, matching the original's root-replacement
    /// special case in aggregation emission.
    pub fn resolve(&self, path: &str) -> Option<FieldIndex> {
        if path == "#schema" || path == "@schema" {
            return Some(FieldIndex::SchemaName);
        }
        let top = path.split('.').next()?;
        self.fields
            .iter()
            .position(|field| field.name == top)
            .map(FieldIndex::Field)
    }

    /// Returns a copy of this schema with `field` appended (or, if a field of
    /// the same name already exists, left untouched — callers that want
    /// override semantics should use [`Schema::without_field`] first).
    pub fn with_field(&self, field: Field) -> Schema {
        let mut fields = self.fields.clone();
        if !fields.iter().any(|f| f.name == field.name) {
            fields.push(field);
        }
        Schema { name: self.name.clone(), fields }
    }

    /// Returns a copy of this schema with the named field removed, if it
    /// exists.
    pub fn without_field(&self, name: &str) -> Schema {
        Schema {
            name: self.name.clone(),
            fields: self.fields.iter().filter(|f| f.name != name).cloned().collect(),
        }
    }

    /// Returns a copy of this schema renamed to `name`, structurally
    /// unchanged (and therefore fingerprint-unchanged).
    pub fn rename(&self, name: impl Into<String>) -> Schema {
        Schema { name: name.into(), fields: self.fields.clone() }
    }
}

fn type_hash(ty: &Type) -> u64 {
    match ty {
        Type::Null => stable_hash64(b"null"),
        Type::Bool => stable_hash64(b"bool"),
        Type::Int64 => stable_hash64(b"int64"),
        Type::UInt64 => stable_hash64(b"uint64"),
        Type::Double => stable_hash64(b"double"),
        Type::String => stable_hash64(b"string"),
        Type::Bytes => stable_hash64(b"bytes"),
        Type::Duration => stable_hash64(b"duration"),
        Type::Timestamp => stable_hash64(b"timestamp"),
        Type::List(inner) => combine(stable_hash64(b"list"), type_hash(inner)),
        Type::Record(fields) => fields.iter().fold(stable_hash64(b"record"), |hash, field| {
            combine(combine(hash, stable_hash64(field.name.as_bytes())), type_hash(&field.ty))
        }),
    }
}
