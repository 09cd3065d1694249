//! # Verdict Core
//!
//! Exception-free control flow built on two values:
//!
//! * [`Maybe<T>`]: a value that is present or absent.
//! * [`Outcome<T, E>`]: the tri-state result of a computation:
//!   success, success with a warning, or failure.
//!
//! Outcomes are chained with combinators (`on_success`, `on_failure`,
//! `on_any`, `on_success_or_failure`, `ensure`, `flatten`) that decide from
//! the state whether the next callback runs. A [`WarningPolicy`] decides,
//! per call site, whether a warning still counts as a success.
//!
//! ```rust
//! use verdict_core::prelude::*;
//!
//! let mut counter = 0;
//! let _: Outcome = Outcome::success()
//!     .on_success(|_| counter += 1)
//!     .on_failure(|_| counter += 100);
//! assert_eq!(counter, 1);
//! ```
//!
//! This crate has no async and no I/O; async chaining lives in `verdict-runtime`.

pub mod combinators;
pub mod combine;
pub mod convert;
pub mod error;
pub mod flatten;
pub mod logic;
pub mod maybe;
pub mod metadata;
pub mod outcome;
pub mod policy;
pub mod telemetry;

pub use convert::{NULL_VALUE_MESSAGE, empty_maybe_message};
pub use error::{ContractError, ContractResult, Exception};
pub use flatten::RESULTING_IN;
pub use logic::{ResultLogic, State};
pub use maybe::Maybe;
pub use outcome::{CustomOutcome, Outcome};
pub use policy::WarningPolicy;

pub mod prelude {
    pub use crate::error::{ContractError, ContractResult, Exception};
    pub use crate::logic::{ResultLogic, State};
    pub use crate::maybe::Maybe;
    pub use crate::outcome::{CustomOutcome, Outcome};
    pub use crate::policy::WarningPolicy;
}
