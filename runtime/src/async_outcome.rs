//! # Async Callbacks on a Ready Outcome
//!
//! [`AsyncOutcome`] runs asynchronous callbacks on an [`Outcome`] that is
//! already in hand. Each method returns a boxed future; branching follows
//! the synchronous combinators exactly.

use std::future::Future;

use verdict_core::{ContractError, Outcome, ResultLogic, WarningPolicy};

use crate::future::BoxFuture;

/// Panics at the call site on an empty message, before any future is built.
#[track_caller]
pub(crate) fn required_message(message: impl Into<String>) -> String {
    let message = message.into();
    if message.is_empty() {
        panic!("{}", ContractError::ArgumentNull { argument: "message" });
    }
    message
}

/// Async counterparts of the `Outcome` combinators.
///
/// Callbacks return futures that are awaited before the chain continues.
/// Side-effect callbacks receive a reference but must return a future that
/// does not borrow from it; copy what the future needs first.
pub trait AsyncOutcome<T, E>: Sized {
    /// Await `f` on the value of a success under `policy`.
    ///
    /// A warning the policy escalates comes back as a failure and `f` is
    /// never called.
    fn on_success_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        T: 'a,
        E: 'a,
        F: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a;

    /// Await `f` on failure under `policy`; an escalated warning comes back failed.
    fn on_failure_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        T: 'a,
        E: 'a,
        F: FnOnce(&ResultLogic) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a;

    /// Transform the value of a success with an async function.
    fn map_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = U> + Send + 'a;

    /// Chain an async computation on success and return its outcome.
    fn and_then_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<U, E>> + Send + 'a;

    /// Fail with `message` and `error` unless the async `predicate` accepts the value.
    ///
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
        T: 'a,
        E: 'a,
        P: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a;
}

impl<T, E> AsyncOutcome<T, E> for Outcome<T, E>
where
    T: Send,
    E: Send,
{
    fn on_success_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        T: 'a,
        E: 'a,
        F: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a,
    {
        Box::pin(async move {
            let outcome = self.escalate(policy);
            let pending = outcome.value().ok().map(f);
            if let Some(pending) = pending {
                pending.await;
            }
            outcome
        })
    }

    fn on_failure_async<'a, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<T, E>>
    where
        T: 'a,
        E: 'a,
        F: FnOnce(&ResultLogic) -> Fut + Send + 'a,
        Fut: Future<Output = ()> + Send + 'a,
    {
        Box::pin(async move {
            if !policy.considers_failure(self.logic()) {
                return self;
            }
            let pending = f(self.logic());
            pending.await;
            self.escalate(policy)
        })
    }

    fn map_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = U> + Send + 'a,
    {
        Box::pin(async move {
            let (value, shell) = match self.escalate(policy).split() {
                Ok(parts) => parts,
                Err(failure) => return failure,
            };
            shell.with_value(f(value).await)
        })
    }

    fn and_then_async<'a, U, F, Fut>(self, policy: WarningPolicy<E>, f: F) -> BoxFuture<'a, Outcome<U, E>>
    where
        T: 'a,
        E: 'a,
        U: 'a,
        F: FnOnce(T) -> Fut + Send + 'a,
        Fut: Future<Output = Outcome<U, E>> + Send + 'a,
    {
        Box::pin(async move {
            let (value, _) = match self.escalate(policy).split() {
                Ok(parts) => parts,
                Err(failure) => return failure,
            };
            f(value).await
        })
    }

    #[track_caller]
    fn ensure_async<'a, P, Fut>(
        self,
        predicate: P,
        message: impl Into<String>,
        error: E,
    ) -> BoxFuture<'a, Outcome<T, E>>
    where
        T: 'a,
        E: 'a,
        P: FnOnce(&T) -> Fut + Send + 'a,
        Fut: Future<Output = bool> + Send + 'a,
    {
        let message = required_message(message);
        Box::pin(async move {
            let pending = self.value().ok().map(predicate);
            let accepted = match pending {
                Some(pending) => pending.await,
                None => true,
            };
            if accepted {
                self
            } else {
                Outcome::fail_with(message, error)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_on_success_async_awaits_callback() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let outcome = Outcome::<usize>::ok(5)
            .on_success_async(WarningPolicy::Tolerate, move |v| {
                let v = *v;
                async move {
                    sink.fetch_add(v, Ordering::SeqCst);
                }
            })
            .await;
        assert_eq!(outcome, Outcome::ok(5));
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_on_success_async_skips_failure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let outcome = Outcome::<usize>::fail("f")
            .on_success_async(WarningPolicy::Tolerate, move |_| async move {
                sink.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        assert!(outcome.is_failure());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_on_success_async_strict_policy_never_starts_callback() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let outcome = Outcome::<usize>::warn(3, "stale")
            .on_success_async(WarningPolicy::strict(), move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
                async {}
            })
            .await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("stale"));
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        let tolerated = Outcome::<usize>::warn(3, "stale")
            .on_success_async(WarningPolicy::Tolerate, |_| async {})
            .await;
        assert!(tolerated.is_warning());
    }

    #[tokio::test]
    async fn test_on_failure_async_keeps_actual_failure() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let outcome = Outcome::<i32, &str>::fail_with("f", "ORIG")
            .on_failure_async(WarningPolicy::escalate("NEW"), move |_| async move {
                sink.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("f"));
        assert_eq!(outcome.error(), Ok(&"ORIG"));
    }

    #[tokio::test]
    async fn test_on_failure_async_escalates_warning() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let outcome = Outcome::<(), ()>::warning("careful")
            .on_failure_async(WarningPolicy::strict(), move |_| async move {
                sink.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), Some("careful"));
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        let tolerated = Outcome::<(), ()>::warning("careful")
            .on_failure_async(WarningPolicy::Tolerate, |_| async {})
            .await;
        assert!(tolerated.is_warning());
    }

    #[tokio::test]
    async fn test_map_async_keeps_warning() {
        let outcome: Outcome<i32> = Outcome::warn(2, "w");
        let mapped = outcome
            .map_async(WarningPolicy::Tolerate, |v| async move { v * 10 })
            .await;
        assert!(mapped.is_warning());
        assert_eq!(mapped.value(), Ok(&20));
        assert_eq!(mapped.message(), Some("w"));
    }

    #[tokio::test]
    async fn test_and_then_async_short_circuits_failure() {
        let outcome: Outcome<i32> = Outcome::fail("upstream");
        let next = outcome
            .and_then_async(WarningPolicy::Tolerate, |v| async move {
                Outcome::<String>::ok(v.to_string())
            })
            .await;
        assert!(next.is_failure());
        assert_eq!(next.message(), Some("upstream"));
    }

    #[tokio::test]
    async fn test_ensure_async_rejects_value() {
        let outcome: Outcome<i32, &str> = Outcome::ok(3);
        let checked = outcome
            .ensure_async(|v| {
                let even = v % 2 == 0;
                async move { even }
            }, "odd value", "E_ODD")
            .await;
        assert!(checked.is_failure());
        assert_eq!(checked.message(), Some("odd value"));
        assert_eq!(checked.error(), Ok(&"E_ODD"));
    }

    #[test]
    #[should_panic(expected = "message")]
    fn test_ensure_async_rejects_empty_message_eagerly() {
        let outcome: Outcome<i32> = Outcome::ok(3);
        let _ = outcome.ensure_async(|_| async { true }, "", ());
    }
}
