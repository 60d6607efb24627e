//! Placement hints for an operator.

/// Where an operator prefers to run.
///
/// This substrate does not implement distributed placement (see
/// `SPEC_FULL.md`'s `[MODULE: scheduler]` Non-goals); `Remote` is carried as
/// a hint an embedding application's placement layer may act on, but the
/// scheduler in this crate treats every operator as local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorLocation {
    /// Must run in the same process as its neighbors.
    Local,
    /// May run on a remote worker.
    Remote,
}
