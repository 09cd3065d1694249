//! Verdict facade crate.
//!
//! Re-exports the core types and, with the `runtime` feature (on by default),
//! the async combinators, behind a single entry point.

pub use verdict_core as core;
#[cfg(feature = "runtime")]
pub use verdict_runtime as runtime;

pub use verdict_core::{ContractError, CustomOutcome, Exception, Maybe, Outcome, ResultLogic, State, WarningPolicy};
#[cfg(feature = "runtime")]
pub use verdict_runtime::{AsyncOutcome, OutcomeFuture, Step};

pub mod prelude {
    pub use verdict_core::prelude::*;
    #[cfg(feature = "runtime")]
    pub use verdict_runtime::prelude::*;
}
