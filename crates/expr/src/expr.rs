//! The expression AST operators build from programmatically (not parsed
//! from source text — see this crate's Non-goals).

use value::{Batch, Value};

use crate::field_path::FieldPath;

/// An expression evaluated row-wise against a [`Batch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A field selector, e.g. `a.b`.
    Field(FieldPath),
    /// A constant value.
    Literal(Value),
    /// A named function call over sub-expressions. The substrate evaluates
    /// a small fixed set of scalar functions (see [`Expr::eval`]); a richer
    /// function registry belongs to a layer above this one.
    Call(String, Vec<Expr>),
}

impl Expr {
    /// Evaluates this expression against `row` of `batch`.
    ///
    /// A `Field` path that does not resolve evaluates to `Value::Null`
    /// rather than erroring, matching the tolerant field resolution the
    /// rest of this workspace relies on. The `#schema` meta-selector
    /// evaluates to the batch's schema name as a `Value::String`.
    pub fn eval(&self, batch: &Batch, row: usize) -> Value {
        match self {
            Expr::Literal(value) => value.clone(),
            Expr::Field(path) => match path {
                FieldPath::SchemaName => Value::String(batch.schema().name().into()),
                FieldPath::Segments(segments) => batch.row(row).get_path(segments),
            },
            Expr::Call(name, args) => eval_call(name, args, batch, row),
        }
    }
}

fn eval_call(name: &str, args: &[Expr], batch: &Batch, row: usize) -> Value {
    match name {
        "length" => match args.first().map(|a| a.eval(batch, row)) {
            Some(Value::String(s)) => Value::UInt64(s.len() as u64),
            Some(Value::Bytes(b)) => Value::UInt64(b.len() as u64),
            Some(Value::List(items)) => Value::UInt64(items.len() as u64),
            _ => Value::Null,
        },
        "coalesce" => args
            .iter()
            .map(|a| a.eval(batch, row))
            .find(|v| !matches!(v, Value::Null))
            .unwrap_or(Value::Null),
        "add" | "sub" | "mul" => eval_arithmetic(name, args, batch, row),
        // Unknown functions evaluate to `Null` rather than erroring: the
        // pipeline builder validates function names against the registry it
        // owns before ever constructing an `Expr::Call`.
        _ => Value::Null,
    }
}

/// Binary arithmetic, exposed as ordinary builtin calls rather than a
/// dedicated AST node (see this crate's Non-goals): `a + 1` arrives here as
/// `Expr::Call("add", [Expr::Field(a), Expr::Literal(1)])`, constructed by
/// whatever builds `Expr` values above this crate. Operands widen to
/// `Double` when mixed; anything else (including either operand missing)
/// evaluates to `Null`.
fn eval_arithmetic(name: &str, args: &[Expr], batch: &Batch, row: usize) -> Value {
    let (Some(lhs), Some(rhs)) = (args.first(), args.get(1)) else {
        return Value::Null;
    };
    match (lhs.eval(batch, row), rhs.eval(batch, row)) {
        (Value::Int64(a), Value::Int64(b)) => Value::Int64(apply(name, a, b)),
        (Value::UInt64(a), Value::UInt64(b)) => Value::UInt64(apply(name, a, b)),
        (Value::Double(a), Value::Double(b)) => Value::Double(apply(name, a, b)),
        (Value::Int64(a), Value::Double(b)) => Value::Double(apply(name, a as f64, b)),
        (Value::Double(a), Value::Int64(b)) => Value::Double(apply(name, a, b as f64)),
        _ => Value::Null,
    }
}

fn apply<T>(name: &str, a: T, b: T) -> T
where
    T: std::ops::Add<Output = T> + std::ops::Sub<Output = T> + std::ops::Mul<Output = T>,
{
    match name {
        "add" => a + b,
        "sub" => a - b,
        "mul" => a * b,
        _ => unreachable!("eval_arithmetic only dispatches add/sub/mul"),
    }
}
