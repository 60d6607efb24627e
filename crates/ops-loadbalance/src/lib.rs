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

//! The `load-balance` operator: fair, round-robin fan-out of event batches
//! across independently scheduled sub-pipeline replicas.

mod coordinator;
mod forward;
mod load_balance_operator;
mod source;
mod stream;

pub use load_balance_operator::LoadBalanceOperator;
pub use stream::LoadBalanceStream;
