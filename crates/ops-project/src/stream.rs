//! The instantiated projection stream: applies one of the four
//! `put`/`extend`/`replace`/`set` semantics to every batch it sees.

use std::collections::HashSet;
use std::sync::Arc;

use diagnostics::Diagnostic;
use expr::Assignment;
use operator::{ControlPlane, OperatorStream, StreamPoll};
use value::{Batch, Field, Schema, Value};

use crate::mode::ProjectionMode;
use crate::record::{infer_type, set_type_path, set_value_path};

/// The instantiated `put`/`extend`/`replace`/`set` operator.
///
/// Row order is never disturbed: every mode rewrites each row in place,
/// matching [`crate::ProjectOperator::optimize`]'s `order_invariant` report.
pub struct ProjectStream {
    mode: ProjectionMode,
    assignments: Vec<Assignment>,
}

impl ProjectStream {
    pub(crate) fn new(mode: ProjectionMode, assignments: Vec<Assignment>) -> Self {
        Self { mode, assignments }
    }

    fn project(&self, batch: Batch, ctrl: &mut dyn ControlPlane) -> Batch {
        match self.mode {
            ProjectionMode::Put => project_put(&self.assignments, &batch, ctrl),
            ProjectionMode::Extend => project_extend(&self.assignments, &batch, ctrl),
            ProjectionMode::Replace => project_replace(&self.assignments, &batch, ctrl),
            ProjectionMode::Set => project_set(&self.assignments, &batch, ctrl),
        }
    }
}

impl OperatorStream for ProjectStream {
    fn poll_next(&mut self, input: Option<Batch>, ctrl: &mut dyn ControlPlane) -> StreamPoll {
        match input {
            Some(batch) => StreamPoll::Ready(self.project(batch, ctrl)),
            None => StreamPoll::Done,
        }
    }
}

/// Evaluates a `#schema`/`@schema` assignment's source against the batch's
/// first row, or `Value::Null` if the batch has no rows to sample.
fn eval_schema_literal(assignment: &Assignment, batch: &Batch) -> Value {
    if batch.is_empty() {
        Value::Null
    } else {
        assignment.source.eval(batch, 0)
    }
}

/// `put`: keeps only the configured assignments. A duplicate destination
/// warns; the later assignment wins, at the position of its first
/// occurrence. Defaults the output schema name to `tenzir.put` unless
/// `#schema`/`@schema` is assigned — schema equality here is structural
/// (see [`value::Schema::fingerprint`]), so the fixed default name does not
/// make distinct `put` shapes collide.
fn project_put(assignments: &[Assignment], batch: &Batch, ctrl: &mut dyn ControlPlane) -> Batch {
    let mut schema_name: Option<String> = None;
    let mut fields: Vec<Field> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut field_assignments: Vec<&Assignment> = Vec::new();

    for assignment in assignments {
        if assignment.renames_schema() {
            if let Value::String(name) = eval_schema_literal(assignment, batch) {
                schema_name = Some(name.to_string());
            }
            continue;
        }
        let path = assignment.destination.segments().expect("non-schema-rename assignment carries a path");
        let key = path.join(".");
        if !seen.insert(key.clone()) {
            Diagnostic::warning(format!("duplicate assignment to `{key}`, the later assignment wins"))
                .primary("put")
                .emit(ctrl.diagnostics());
        }
        set_type_path(&mut fields, path, infer_type(&assignment.source, batch));
        field_assignments.push(assignment);
    }

    let schema = Schema::new(schema_name.unwrap_or_else(|| "tenzir.put".to_string()), fields);
    let rows = (0..batch.rows())
        .map(|row| {
            let mut record = Value::Record(Arc::from(Vec::new()));
            for assignment in &field_assignments {
                let path = assignment.destination.segments().expect("checked above");
                record = set_value_path(&record, path, assignment.source.eval(batch, row));
            }
            record
        })
        .collect();

    Batch::new(schema, rows)
}

/// `extend`: appends the configured assignments. An assignment whose
/// destination already exists warns and is dropped; `#schema`/`@schema` is
/// rejected outright, since appending fields should never also relabel the
/// record.
fn project_extend(assignments: &[Assignment], batch: &Batch, ctrl: &mut dyn ControlPlane) -> Batch {
    let mut fields: Vec<Field> = batch.schema().fields().to_vec();
    let mut accepted: Vec<&Assignment> = Vec::new();

    for assignment in assignments {
        if assignment.renames_schema() {
            Diagnostic::error("`extend` cannot rename the output schema").primary("extend").emit(ctrl.diagnostics());
            continue;
        }
        let path = assignment.destination.segments().expect("checked above");
        if fields.iter().any(|field| field.name == path[0]) {
            Diagnostic::warning(format!("`{}` already exists, `extend` does not overwrite it", path.join(".")))
                .primary("extend")
                .emit(ctrl.diagnostics());
            continue;
        }
        set_type_path(&mut fields, path, infer_type(&assignment.source, batch));
        accepted.push(assignment);
    }

    let schema = Schema::new(batch.schema().name(), fields);
    let rows = (0..batch.rows())
        .map(|row| {
            let mut record = batch.row(row).clone();
            for assignment in &accepted {
                let path = assignment.destination.segments().expect("checked above");
                record = set_value_path(&record, path, assignment.source.eval(batch, row));
            }
            record
        })
        .collect();

    Batch::new(schema, rows)
}

/// `replace`: rewrites existing fields in place. An assignment whose
/// destination does not already exist warns and is dropped. A top-level
/// field whose evaluated type differs from its previous type is still
/// replaced, but warns about the change.
fn project_replace(assignments: &[Assignment], batch: &Batch, ctrl: &mut dyn ControlPlane) -> Batch {
    let mut fields: Vec<Field> = batch.schema().fields().to_vec();
    let mut schema_name: Option<String> = None;
    let mut accepted: Vec<&Assignment> = Vec::new();

    for assignment in assignments {
        if assignment.renames_schema() {
            if let Value::String(name) = eval_schema_literal(assignment, batch) {
                schema_name = Some(name.to_string());
            }
            continue;
        }
        let path = assignment.destination.segments().expect("checked above");
        match fields.iter().find(|field| field.name == path[0]).cloned() {
            Some(existing) => {
                let new_ty = infer_type(&assignment.source, batch);
                if path.len() == 1 && existing.ty != new_ty {
                    Diagnostic::warning(format!(
                        "`{}` changed type from {:?} to {new_ty:?}",
                        path.join("."),
                        existing.ty
                    ))
                    .primary("replace")
                    .emit(ctrl.diagnostics());
                }
                set_type_path(&mut fields, path, new_ty);
                accepted.push(assignment);
            }
            None => {
                Diagnostic::warning(format!("`{}` does not exist, `replace` does not create new fields", path.join(".")))
                    .primary("replace")
                    .emit(ctrl.diagnostics());
            }
        }
    }

    let schema = Schema::new(schema_name.unwrap_or_else(|| batch.schema().name().to_string()), fields);
    let rows = (0..batch.rows())
        .map(|row| {
            let mut record = batch.row(row).clone();
            for assignment in &accepted {
                let path = assignment.destination.segments().expect("checked above");
                record = set_value_path(&record, path, assignment.source.eval(batch, row));
            }
            record
        })
        .collect();

    Batch::new(schema, rows)
}

/// `set`: `replace` for assignments that resolve against an existing field,
/// `extend` for ones that do not. Neither branch warns about the
/// collision/absence itself — both are intended outcomes of this mode — but
/// a top-level type change on the replace branch still warns, matching
/// `replace`.
fn project_set(assignments: &[Assignment], batch: &Batch, ctrl: &mut dyn ControlPlane) -> Batch {
    let mut fields: Vec<Field> = batch.schema().fields().to_vec();
    let mut schema_name: Option<String> = None;

    for assignment in assignments {
        if assignment.renames_schema() {
            if let Value::String(name) = eval_schema_literal(assignment, batch) {
                schema_name = Some(name.to_string());
            }
            continue;
        }
        let path = assignment.destination.segments().expect("checked above");
        let new_ty = infer_type(&assignment.source, batch);
        if let Some(existing) = fields.iter().find(|field| field.name == path[0]) {
            if path.len() == 1 && existing.ty != new_ty {
                Diagnostic::warning(format!("`{}` changed type from {:?} to {new_ty:?}", path.join("."), existing.ty))
                    .primary("set")
                    .emit(ctrl.diagnostics());
            }
        }
        set_type_path(&mut fields, path, new_ty);
    }

    let schema = Schema::new(schema_name.unwrap_or_else(|| batch.schema().name().to_string()), fields);
    let rows = (0..batch.rows())
        .map(|row| {
            let mut record = batch.row(row).clone();
            for assignment in assignments {
                if assignment.renames_schema() {
                    continue;
                }
                let path = assignment.destination.segments().expect("checked above");
                record = set_value_path(&record, path, assignment.source.eval(batch, row));
            }
            record
        })
        .collect();

    Batch::new(schema, rows)
}

#[cfg(test)]
mod test {
    use super::*;
    use diagnostics::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
    use expr::{Expr, FieldPath};
    use std::sync::Mutex;
    use value::Type;

    struct CollectingControlPlane {
        diagnostics: CollectingHandler,
        metrics: TracingMetricHandler,
        waiting: bool,
    }

    #[derive(Default)]
    struct CollectingHandler(Mutex<Vec<Diagnostic>>);

    impl DiagnosticHandler for CollectingHandler {
        fn emit(&self, diagnostic: Diagnostic) {
            self.0.lock().unwrap().push(diagnostic);
        }
    }

    impl ControlPlane for CollectingControlPlane {
        fn diagnostics(&self) -> &dyn DiagnosticHandler {
            &self.diagnostics
        }
        fn metrics(&self) -> &dyn MetricHandler {
            &self.metrics
        }
        fn operator_index(&self) -> usize {
            0
        }
        fn set_waiting(&mut self, waiting: bool) {
            self.waiting = waiting;
        }
    }

    fn ctrl() -> CollectingControlPlane {
        CollectingControlPlane { diagnostics: CollectingHandler::default(), metrics: TracingMetricHandler, waiting: false }
    }

    fn input_batch() -> Batch {
        let schema = Schema::new("s", vec![Field::new("a", Type::Int64), Field::new("b", Type::String)]);
        let row = Value::Record(Arc::from(vec![
            ("a".to_string(), Value::Int64(1)),
            ("b".to_string(), Value::String("x".into())),
        ]));
        Batch::new(schema, vec![row])
    }

    /// S4 — `put c=a+1, d="y"` on `{a: int, b: string}` drops `a`/`b` and
    /// produces `{c: int, d: string}`, named `tenzir.put`.
    #[test]
    fn s4_put_projects_and_renames_schema() {
        let assignments = vec![
            Assignment::new(
                FieldPath::parse("c"),
                Expr::Call("add".into(), vec![Expr::Field(FieldPath::parse("a")), Expr::Literal(Value::Int64(1))]),
            ),
            Assignment::new(FieldPath::parse("d"), Expr::Literal(Value::String("y".into()))),
        ];
        let mut stream = ProjectStream::new(ProjectionMode::Put, assignments);
        let mut c = ctrl();
        let out = match stream.poll_next(Some(input_batch()), &mut c) {
            StreamPoll::Ready(batch) => batch,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(out.schema().name(), "tenzir.put");
        assert_eq!(out.schema().fields().len(), 2);
        assert_eq!(out.row(0), &Value::Record(Arc::from(vec![
            ("c".to_string(), Value::Int64(2)),
            ("d".to_string(), Value::String("y".into())),
        ])));
    }

    /// Invariant 7 — `put` is idempotent: projecting the output of a `put`
    /// through the same assignment list again reproduces it exactly.
    #[test]
    fn put_is_idempotent() {
        let assignments = vec![Assignment::new(FieldPath::parse("c"), Expr::Field(FieldPath::parse("c")))];
        let schema = Schema::new("s", vec![Field::new("c", Type::Int64)]);
        let batch = Batch::new(schema, vec![Value::Record(Arc::from(vec![("c".to_string(), Value::Int64(5))]))]);

        let mut first = ProjectStream::new(ProjectionMode::Put, assignments.clone());
        let mut c = ctrl();
        let once = match first.poll_next(Some(batch), &mut c) {
            StreamPoll::Ready(b) => b,
            other => panic!("unexpected {other:?}"),
        };

        let mut second = ProjectStream::new(ProjectionMode::Put, assignments);
        let twice = match second.poll_next(Some(once.clone()), &mut c) {
            StreamPoll::Ready(b) => b,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(once.row(0), twice.row(0));
        assert_eq!(once.schema().fingerprint(), twice.schema().fingerprint());
    }

    /// Invariant 7 — `extend` with a configuration whose every destination
    /// already exists is a no-op on values (every assignment is dropped),
    /// warning once per collision.
    #[test]
    fn extend_no_op_when_all_keys_already_present() {
        let assignments = vec![Assignment::new(FieldPath::parse("a"), Expr::Literal(Value::Int64(99)))];
        let mut stream = ProjectStream::new(ProjectionMode::Extend, assignments);
        let mut c = ctrl();
        let out = match stream.poll_next(Some(input_batch()), &mut c) {
            StreamPoll::Ready(batch) => batch,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(out.row(0), input_batch().row(0));
        assert_eq!(c.diagnostics.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn put_duplicate_destination_warns_and_last_wins() {
        let assignments = vec![
            Assignment::new(FieldPath::parse("c"), Expr::Literal(Value::Int64(1))),
            Assignment::new(FieldPath::parse("c"), Expr::Literal(Value::Int64(2))),
        ];
        let mut stream = ProjectStream::new(ProjectionMode::Put, assignments);
        let mut c = ctrl();
        let out = match stream.poll_next(Some(input_batch()), &mut c) {
            StreamPoll::Ready(batch) => batch,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(out.schema().fields().len(), 1);
        assert_eq!(out.row(0), &Value::Record(Arc::from(vec![("c".to_string(), Value::Int64(2))])));
        assert_eq!(c.diagnostics.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn replace_warns_on_missing_field() {
        let assignments = vec![Assignment::new(FieldPath::parse("missing"), Expr::Literal(Value::Int64(1)))];
        let mut stream = ProjectStream::new(ProjectionMode::Replace, assignments);
        let mut c = ctrl();
        let out = match stream.poll_next(Some(input_batch()), &mut c) {
            StreamPoll::Ready(batch) => batch,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(out.row(0), input_batch().row(0));
        assert_eq!(c.diagnostics.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn set_replaces_existing_and_extends_missing() {
        let assignments = vec![
            Assignment::new(FieldPath::parse("a"), Expr::Literal(Value::Int64(7))),
            Assignment::new(FieldPath::parse("e"), Expr::Literal(Value::Bool(true))),
        ];
        let mut stream = ProjectStream::new(ProjectionMode::Set, assignments);
        let mut c = ctrl();
        let out = match stream.poll_next(Some(input_batch()), &mut c) {
            StreamPoll::Ready(batch) => batch,
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(out.schema().fields().len(), 3);
        assert!(c.diagnostics.0.lock().unwrap().is_empty());
        assert_eq!(out.row(0), &Value::Record(Arc::from(vec![
            ("a".to_string(), Value::Int64(7)),
            ("b".to_string(), Value::String("x".into())),
            ("e".to_string(), Value::Bool(true)),
        ])));
    }

    #[test]
    fn done_on_end_of_input() {
        let mut stream = ProjectStream::new(ProjectionMode::Put, vec![]);
        let mut c = ctrl();
        match stream.poll_next(None, &mut c) {
            StreamPoll::Done => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
