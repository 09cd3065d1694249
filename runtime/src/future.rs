//! # OutcomeFuture: Chaining Before the Outcome Exists
//!
//! Any `Future` that resolves to an [`Outcome`] gets the combinators of the
//! synchronous type. Each call awaits the source, applies the combinator and
//! hands back a new boxed future, so chains read the same in both worlds:
//!
//! ```rust
//! use futures_util::future::ready;
//! use verdict_core::{Outcome, WarningPolicy};
//! use verdict_runtime::OutcomeFuture;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let shipped = ready(Outcome::<u32>::ok(41))
//!     .ensure_or(|id| *id > 0, "missing order id", ())
//!     .and_then_async(WarningPolicy::Tolerate, |id| async move { Outcome::ok(id + 1) })
//!     .instrumented("ship-order")
//!     .await;
//! assert_eq!(shipped.value(), Ok(&42));
//! # }
//! ```
//!
//! Only the source future is awaited by the sync-callback methods; methods
//! ending in `_async` also await the callback's own future.

use std::future::Future;
use std::pin::Pin;

use tracing::Instrument;
use verdict_core::{Maybe, Outcome, ResultLogic, WarningPolicy};

use crate::async_outcome::{AsyncOutcome, required_message};
use crate::step::Step;

/// Type alias for async boxed futures produced by the combinators.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Combinators over a pending outcome.
pub trait OutcomeFuture<T, E>: Future<Output = Outcome<T, E>> + Send + Sized
where
    T: Send,
    E: Send,
{
    fn on_success<'a, F>(self, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&T) + Send + 'a,
    {
        Box::pin(async move { self.await.on_success(f) })
    }

    fn on_success_with<'a, F>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&T) + Send + 'a,
    {
        Box::pin(async move { self.await.on_success_with(policy, f) })
    }

    fn on_success_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a,
    {
        Box::pin(async move { self.await.on_success_async(policy, f).await })
    }

    /// Named apart from `FutureExt::map`, which maps the raw output.
    fn map_value<'a, U, F>(self, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        Box::pin(async move { self.await.map(f) })
    }

    fn map_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = U> + Send + 'a,
    {
        Box::pin(async move { self.await.map_async(policy, f).await })
    }

    fn and_then<'a, U, F>(self, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'a,
    {
        Box::pin(async move { self.await.and_then(f) })
    }

    fn and_then_with<'a, U, F>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Outcome<U, E> + Send + 'a,
    {
        Box::pin(async move { self.await.and_then_with(policy, f) })
    }

    fn and_then_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<U, E>> + Send + 'a,
    {
        Box::pin(async move { self.await.and_then_async(policy, f).await })
    }

    /// Run a reusable [`Step`] on the value of a success.
    fn and_then_step<'a, U, S>(self, step: &'a S) -> BoxFuture<'a, Outcome<U, E>>
    where
        Self: 'a,
        T: 'static,
        E: 'a,
        U: 'a,
        S: Step<T, U, E> + ?Sized,
    {
        Box::pin(async move {
            let (value, _) = match self.await.split() {
                Ok(parts) => parts,
                Err(failure) => return failure,
            };
            step.run(value).await
        })
    }

    fn on_failure<'a, F>(self, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&ResultLogic) + Send + 'a,
    {
        Box::pin(async move { self.await.on_failure(f) })
    }

    fn on_failure_with<'a, F>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&ResultLogic) + Send + 'a,
    {
        Box::pin(async move { self.await.on_failure_with(policy, f) })
    }

    fn on_failure_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&ResultLogic) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a,
    {
        Box::pin(async move { self.await.on_failure_async(policy, f).await })
    }

    fn or_else<'a, E2, F>(self, f: F) -> BoxFuture<'a, Outcome<T, E2>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        E2: 'a,
        F: FnOnce(ResultLogic, E) -> Outcome<T, E2> + Send + 'a,
    {
        Box::pin(async move { self.await.or_else(f) })
    }

    fn on_any<'a, F>(self, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        F: FnOnce(&Outcome<T, E>) + Send + 'a,
    {
        Box::pin(async move { self.await.on_any(f) })
    }

    fn on_success_or_failure<'a, U, S, F>(self, on_success: S, on_failure: F) -> BoxFuture<'a, U>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        S: FnOnce(T) -> U + Send + 'a,
        F: FnOnce(ResultLogic, E) -> U + Send + 'a,
    {
        Box::pin(async move { self.await.on_success_or_failure(on_success, on_failure) })
    }

    fn on_success_or_failure_with<'a, U, S, F>(
        self,
        policy: WarningPolicy<E>,
        on_success: S,
        on_failure: F,
    ) -> BoxFuture<'a, U>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        U: 'a,
        S: FnOnce(T) -> U + Send + 'a,
        F: FnOnce(ResultLogic, E) -> U + Send + 'a,
    {
        Box::pin(async move {
            self.await
                .on_success_or_failure_with(policy, on_success, on_failure)
        })
    }

    /// # Panics
    /// Panics immediately if `message` is empty.
    #[track_caller]
    fn ensure_or<'a, P>(self, predicate: P, message: impl Into<String>, error: E) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        P: FnOnce(&T) -> bool + Send + 'a,
    {
        let message = required_message(message);
        Box::pin(async move { self.await.ensure_or(predicate, message, error) })
    }

    /// # Panics
    /// Panics immediately if `message` is empty.
    #[track_caller]
    fn ensure_async<'a, P, Fut>(
        self,
        predicate: P,
        message: impl Into<String>,
        error: E,
    ) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
        P: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        let message = required_message(message);
        Box::pin(async move { self.await.ensure_async(predicate, message, error).await })
    }

    fn escalate<'a>(self, policy: WarningPolicy<E>) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
    {
        Box::pin(async move { self.await.escalate(policy) })
    }

    fn to_maybe<'a>(self) -> BoxFuture<'a, Maybe<T>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
    {
        Box::pin(async move { self.await.to_maybe() })
    }

    /// Await inside an `Outcome` span and log the final state.
    fn instrumented<'a>(self, label: &str) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
    {
        let span = tracing::info_span!("Outcome", verdict.label = %label);
        let label = label.to_string();
        Box::pin(async move { self.await.traced(&label) }.instrument(span))
    }
}

impl<T, E, Fut> OutcomeFuture<T, E> for Fut
where
    Fut: Future<Output = Outcome<T, E>> + Send,
    T: Send,
    E: Send,
{
}

/// Flattening for futures of nested outcomes.
pub trait NestedOutcomeFuture<T, E>: Future<Output = Outcome<Outcome<T, E>, E>> + Send + Sized
where
    T: Send,
    E: Send,
{
    /// Named apart from `FutureExt::flatten`, which expects a future of futures.
    fn flatten_outcome<'a>(self) -> BoxFuture<'a, Outcome<T, E>>
    where
        Self: 'a,
        T: 'a,
        E: 'a,
    {
        Box::pin(async move { self.await.flatten() })
    }
}

impl<T, E, Fut> NestedOutcomeFuture<T, E> for Fut
where
    Fut: Future<Output = Outcome<Outcome<T, E>, E>> + Send,
    T: Send,
    E: Send,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::ready;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use verdict_core::RESULTING_IN;

    #[tokio::test]
    async fn test_success_chain_runs_success_callbacks_only() {
        let counter = Arc::new(AtomicUsize::new(0));
        let on_ok = counter.clone();
        let on_err = counter.clone();

        let outcome = ready(Outcome::<(), ()>::success())
            .on_success(move |_| {
                on_ok.fetch_add(1, Ordering::SeqCst);
            })
            .on_failure(move |_| {
                on_err.fetch_add(100, Ordering::SeqCst);
            })
            .await;

        assert!(outcome.is_only_success());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_skips_value_steps() {
        let outcome = ready(Outcome::<i32>::fail("boom"))
            .map_value(|v| v + 1)
            .and_then(|v| Outcome::ok(v * 2))
            .await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("boom"));
    }

    #[tokio::test]
    async fn test_async_steps_await_callback_futures() {
        let outcome = ready(Outcome::<i32>::warn(4, "slow path"))
            .map_async(WarningPolicy::Tolerate, |v| async move { v + 1 })
            .and_then_async(WarningPolicy::Tolerate, |v| async move {
                Outcome::<String>::ok(format!("#{v}"))
            })
            .await;
        assert_eq!(outcome.value(), Ok(&"#5".to_string()));
    }

    #[tokio::test]
    async fn test_strict_policy_escalates_pending_warning() {
        let reached = Arc::new(AtomicUsize::new(0));
        let marker = reached.clone();
        let outcome = ready(Outcome::<i32>::warn(1, "stale cache"))
            .on_success_with(WarningPolicy::strict(), move |_| {
                marker.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("stale cache"));
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_on_success_async_follows_policy() {
        let reached = Arc::new(AtomicUsize::new(0));
        let marker = reached.clone();
        let outcome = ready(Outcome::<i32>::warn(1, "stale cache"))
            .on_success_async(WarningPolicy::strict(), move |_| {
                marker.fetch_add(1, Ordering::SeqCst);
                async {}
            })
            .await;
        assert!(outcome.is_failure());
        assert_eq!(reached.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ensure_or_fails_rejected_value() {
        let outcome = ready(Outcome::<i32, &str>::ok(-1))
            .ensure_or(|v| *v >= 0, "negative", "E_NEG")
            .await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.error(), Ok(&"E_NEG"));
    }

    #[tokio::test]
    async fn test_ensure_async_accepts_value() {
        let outcome = ready(Outcome::<i32>::ok(2))
            .ensure_async(|v| ready(*v > 0), "must be positive", ())
            .await;
        assert_eq!(outcome, Outcome::ok(2));
    }

    #[tokio::test]
    async fn test_fold_and_maybe() {
        let folded = ready(Outcome::<i32>::fail("nope"))
            .on_success_or_failure(|v| v.to_string(), |logic, _| logic.to_string())
            .await;
        assert_eq!(folded, "Failure: nope");

        let maybe = ready(Outcome::<i32>::ok(9)).to_maybe().await;
        assert_eq!(maybe, Maybe::some(9));
    }

    #[tokio::test]
    async fn test_flatten_outcome_merges_messages() {
        let inner: Outcome<i32> = Outcome::fail("inner");
        let nested: Outcome<Outcome<i32>> = Outcome::warn(inner, "outer");
        let flat = ready(nested).flatten_outcome().await;
        assert!(flat.is_failure());
        assert_eq!(flat.message(), Some(format!("inner\n{RESULTING_IN}outer").as_str()));
    }

    #[tokio::test]
    async fn test_instrumented_passes_outcome_through() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let outcome = ready(Outcome::<i32>::warn(1, "w"))
            .instrumented("checkout")
            .await;
        assert_eq!(outcome, Outcome::warn(1, "w"));
    }
}
