//! The buffer's overflow policy.

use serde::{Deserialize, Serialize};

/// What a [`crate::BufferOperator`] does when a write would exceed its
/// configured capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Park the write until capacity frees up, delivering the fitting
    /// prefix immediately and the remainder across later polls.
    Block,
    /// Keep the fitting prefix, silently discard the remainder (after
    /// emitting one warning diagnostic and bumping the `dropped` metric).
    Drop,
}
