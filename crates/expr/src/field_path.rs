//! Dotted field paths, the selector type operators use to address a field
//! of a record without parsing source text.

use value::{FieldIndex, Schema};

/// A dotted path into a (possibly nested) record, or the `#schema`
/// meta-selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// A path of field names, e.g. `["a", "b"]` for `a.b`.
    Segments(Vec<String>),
    /// The `#schema`/`@schema` meta-selector, addressing the schema's name.
    SchemaName,
}

impl FieldPath {
    /// Builds a path from dot-separated segments.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        FieldPath::Segments(segments.into_iter().map(Into::into).collect())
    }

    /// The `#schema` meta-selector.
    pub fn schema_name() -> Self {
        FieldPath::SchemaName
    }

    /// Parses a single extractor token (as produced by an operator
    /// argument list) into a `FieldPath`: `#schema`/`@schema` become the
    /// meta-selector, everything else is split on `.`.
    pub fn parse(extractor: &str) -> Self {
        if extractor == "#schema" || extractor == "@schema" {
            FieldPath::SchemaName
        } else {
            FieldPath::Segments(extractor.split('.').map(str::to_string).collect())
        }
    }

    /// The path's segments, or `None` for the meta-selector.
    pub fn segments(&self) -> Option<&[String]> {
        match self {
            FieldPath::Segments(segments) => Some(segments),
            FieldPath::SchemaName => None,
        }
    }

    /// The leading (top-level) field name this path resolves through, or
    /// `None` for the meta-selector.
    pub fn leading(&self) -> Option<&str> {
        self.segments().and_then(|s| s.first()).map(String::as_str)
    }

    /// Resolves this path against `schema`, yielding the index of the
    /// top-level field it addresses (or the schema-name sentinel).
    pub fn resolve(&self, schema: &Schema) -> Option<FieldIndex> {
        match self {
            FieldPath::SchemaName => Some(FieldIndex::SchemaName),
            FieldPath::Segments(segments) => schema.resolve(segments.first()?),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use value::{Field, Type};

    #[test]
    fn parse_splits_on_dot() {
        let path = FieldPath::parse("a.b.c");
        assert_eq!(path.segments(), Some(&["a".to_string(), "b".to_string(), "c".to_string()][..]));
    }

    #[test]
    fn parse_recognizes_schema_selector() {
        assert_eq!(FieldPath::parse("#schema"), FieldPath::SchemaName);
        assert_eq!(FieldPath::parse("@schema"), FieldPath::SchemaName);
    }

    #[test]
    fn resolve_uses_schema_resolution() {
        let schema = Schema::new("s", vec![Field::new("a", Type::Int64)]);
        assert_eq!(FieldPath::parse("a").resolve(&schema), Some(FieldIndex::Field(0)));
        assert_eq!(FieldPath::parse("missing").resolve(&schema), None);
    }
}
