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

//! The `put` / `extend` / `replace` / `set` projection family: four
//! operators sharing one assignment-list implementation, differing only in
//! how an assignment's destination interacts with the input schema.

mod mode;
mod project_operator;
mod record;
mod stream;

pub use mode::ProjectionMode;
pub use project_operator::ProjectOperator;
pub use stream::ProjectStream;
