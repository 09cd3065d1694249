//! # Verdict Runtime
//!
//! Async chaining for [`verdict_core::Outcome`].
//!
//! * [`OutcomeFuture`]: combinators on any future resolving to an outcome.
//! * [`AsyncOutcome`]: async callbacks on an outcome already in hand.
//! * [`Step`]: reusable async computations plugged into a chain.
//!
//! Nothing here spawns tasks; the caller's executor drives the futures.

pub mod async_outcome;
pub mod future;
pub mod step;

pub mod prelude {
    pub use crate::async_outcome::AsyncOutcome;
    pub use crate::future::{BoxFuture, NestedOutcomeFuture, OutcomeFuture};
    pub use crate::step::{FnStep, Step};
}

pub use async_outcome::AsyncOutcome;
pub use future::{BoxFuture, NestedOutcomeFuture, OutcomeFuture};
pub use step::{FnStep, Step};
