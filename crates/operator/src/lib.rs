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

//! The operator contract: the trait every concrete pipeline stage
//! implements, and the small set of supporting types (`OperatorKind`,
//! `EventOrder`, `OptimizeResult`, the control-plane handle, and the
//! poll-based stream every instantiated operator drives).

mod control_plane;
mod error;
mod kind;
mod location;
mod operator;
mod optimize;
mod order;
mod stream;

pub use control_plane::ControlPlane;
pub use error::Error;
pub use kind::OperatorKind;
pub use location::OperatorLocation;
pub use operator::Operator;
pub use optimize::OptimizeResult;
pub use order::EventOrder;
pub use stream::{OperatorStream, StreamPoll};
