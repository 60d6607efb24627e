#![deny(
    trivial_numeric_casts,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    unused_results
)]
#![warn(rust_2021_compatibility, unreachable_pub)]

//! The `buffer` operator: a bounded, capacity-limited queue between two
//! pipeline stages with a configurable block-or-drop overflow policy.

mod buffer_operator;
mod policy;
mod state;
mod stream;

pub use buffer_operator::BufferOperator;
pub use policy::OverflowPolicy;
pub use state::BufferState;
pub use stream::BufferStream;
