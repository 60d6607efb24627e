//! Helpers for writing a dotted field path into a record value or a
//! schema's field list, widening missing intermediate records along the
//! way. Shared by all four projection modes, since `put`/`extend`/
//! `replace`/`set` differ only in *which* assignments reach these helpers,
//! not in how a single assignment is applied.

use std::sync::Arc;

use value::{Batch, Field, Type, Value};

/// Returns a copy of `record` with `path` set to `value`, creating any
/// missing intermediate nested record along the way. `record` is treated as
/// empty if it is not already a `Value::Record`.
pub fn set_value_path(record: &Value, path: &[String], value: Value) -> Value {
    let mut fields: Vec<(String, Value)> = match record {
        Value::Record(fields) => fields.iter().cloned().collect(),
        _ => Vec::new(),
    };
    set_value_in(&mut fields, path, value);
    Value::Record(Arc::from(fields))
}

fn set_value_in(fields: &mut Vec<(String, Value)>, path: &[String], value: Value) {
    let [head, rest @ ..] = path else { return };
    if rest.is_empty() {
        match fields.iter_mut().find(|(name, _)| name == head) {
            Some(slot) => slot.1 = value,
            None => fields.push((head.clone(), value)),
        }
        return;
    }
    match fields.iter_mut().find(|(name, _)| name == head) {
        Some(slot) => {
            let mut nested: Vec<(String, Value)> = match &slot.1 {
                Value::Record(inner) => inner.iter().cloned().collect(),
                _ => Vec::new(),
            };
            set_value_in(&mut nested, rest, value);
            slot.1 = Value::Record(Arc::from(nested));
        }
        None => fields.push((head.clone(), build_nested_value(rest, value))),
    }
}

fn build_nested_value(path: &[String], value: Value) -> Value {
    match path.split_first() {
        Some((head, rest)) => Value::Record(Arc::from(vec![(head.clone(), build_nested_value(rest, value))])),
        None => value,
    }
}

/// Sets `path` within `fields` to `ty`, widening any missing intermediate
/// record type along the way, mirroring [`set_value_path`] at the
/// schema level. Only the top-level segment of a pre-existing field
/// participates in lookup: this substrate's schema resolution, like the
/// original's, only addresses the top-level field of a path.
pub fn set_type_path(fields: &mut Vec<Field>, path: &[String], ty: Type) {
    let [head, rest @ ..] = path else { return };
    if rest.is_empty() {
        match fields.iter_mut().find(|f| f.name == *head) {
            Some(slot) => slot.ty = ty,
            None => fields.push(Field::new(head.clone(), ty)),
        }
        return;
    }
    match fields.iter_mut().find(|f| f.name == *head) {
        Some(slot) => {
            let mut nested = match &slot.ty {
                Type::Record(inner) => inner.clone(),
                _ => Vec::new(),
            };
            set_type_path(&mut nested, rest, ty);
            slot.ty = Type::Record(nested);
        }
        None => fields.push(Field::new(head.clone(), build_nested_type(rest, ty))),
    }
}

fn build_nested_type(path: &[String], ty: Type) -> Type {
    match path.split_first() {
        Some((head, rest)) => Type::Record(vec![Field::new(head.clone(), build_nested_type(rest, ty))]),
        None => ty,
    }
}

/// Infers the [`Type`] an assignment's source would produce by evaluating
/// it against the batch's first row. A batch with no rows yet to sample
/// infers `Type::Null`: there is nothing to learn the shape from until data
/// arrives.
pub fn infer_type(source: &expr::Expr, batch: &Batch) -> Type {
    if batch.is_empty() {
        Type::Null
    } else {
        source.eval(batch, 0).kind()
    }
}
