//! Step - Reusable Async Computation
//!
//! A `Step` is a named async computation from one value to an `Outcome`.
//! Implement it for computations that are shared across chains (lookups,
//! validations, remote calls) and plug them in with
//! [`OutcomeFuture::and_then_step`](crate::future::OutcomeFuture::and_then_step).

use std::future::Future;

use async_trait::async_trait;
use verdict_core::Outcome;

/// Async computation producing an `Outcome`.
#[async_trait]
pub trait Step<In, Out, E = ()>: Send + Sync
where
    In: Send + 'static,
{
    /// Run the computation on `input`.
    async fn run(&self, input: In) -> Outcome<Out, E>;

    /// Human-readable label for logs.
    fn label(&self) -> &str {
        "step"
    }
}

/// Adapts an async closure into a [`Step`].
pub struct FnStep<F> {
    label: String,
    f: F,
}

impl<F> FnStep<F> {
    pub fn new(label: impl Into<String>, f: F) -> Self {
        Self {
            label: label.into(),
            f,
        }
    }
}

#[async_trait]
impl<In, Out, E, F, Fut> Step<In, Out, E> for FnStep<F>
where
    In: Send + 'static,
    Out: Send + 'static,
    E: Send + 'static,
    F: Fn(In) -> Fut + Send + Sync,
    Fut: Future<Output = Outcome<Out, E>> + Send + 'static,
{
    async fn run(&self, input: In) -> Outcome<Out, E> {
        tracing::debug!(step = %self.label, "Running step");
        (self.f)(input).await
    }

    fn label(&self) -> &str {
        &self.label
    }
}
