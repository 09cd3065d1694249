//! # Combinators: Branching on State
//!
//! Each combinator decides from the outcome's state whether its callback runs,
//! and what state the produced outcome carries.
//!
//! * `on_success` / `map` / `and_then` run on success (a warning counts,
//!   unless the [`WarningPolicy`] escalates it).
//! * `on_failure` runs on failure, or on a warning the policy escalates.
//! * `on_any` always runs.
//! * `on_success_or_failure` runs exactly one of its two branches.
//! * `ensure` turns a success into a failure when a predicate rejects it.
//!
//! A failure is never demoted: no combinator turns it back into a success.

use crate::error::{enforce, non_empty};
use crate::logic::{ResultLogic, State};
use crate::outcome::{Outcome, Payload};
use crate::policy::WarningPolicy;

impl<T, E> Outcome<T, E> {
    /// Run a side effect on the value of a success; warnings count as success.
    pub fn on_success<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        self.on_success_with(WarningPolicy::Tolerate, f)
    }

    /// Run a side effect on success under `policy`.
    ///
    /// A failure passes through and the callback never runs. A warning the
    /// policy escalates comes back as a failure, also without the callback.
    pub fn on_success_with<F>(self, policy: WarningPolicy<E>, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        let outcome = self.escalate(policy);
        if let Payload::Value(value) = &outcome.payload {
            f(value);
        }
        outcome
    }

    /// Transform the value of a success.
    ///
    /// A warning keeps its diagnostics on the transformed value.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.map_with(WarningPolicy::Tolerate, f)
    }

    pub fn map_with<U, F>(self, policy: WarningPolicy<E>, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        let Outcome { logic, payload } = self.escalate(policy);
        let payload = match payload {
            Payload::Value(value) => Payload::Value(f(value)),
            Payload::Error(error) => Payload::Error(error),
        };
        Outcome { logic, payload }
    }

    /// Chain the next computation on success and return its outcome.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        self.and_then_with(WarningPolicy::Tolerate, f)
    }

    pub fn and_then_with<U, F>(self, policy: WarningPolicy<E>, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        let Outcome { logic, payload } = self.escalate(policy);
        match payload {
            Payload::Value(value) => f(value),
            Payload::Error(error) => Outcome::failed(logic, error),
        }
    }

    /// Run a side effect on failure; warnings are ignored.
    pub fn on_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(&ResultLogic),
    {
        self.on_failure_with(WarningPolicy::Tolerate, f)
    }

    /// Run a side effect on failure under `policy`.
    ///
    /// A warning the policy escalates triggers the callback and then comes
    /// back as a failure. An actual failure comes back unchanged.
    pub fn on_failure_with<F>(self, policy: WarningPolicy<E>, f: F) -> Self
    where
        F: FnOnce(&ResultLogic),
    {
        if policy.considers_failure(&self.logic) {
            f(&self.logic);
            self.escalate(policy)
        } else {
            self
        }
    }

    /// Recover from a failure with the next computation.
    ///
    /// Successes (including warnings) pass through with their value.
    pub fn or_else<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(ResultLogic, E) -> Outcome<T, E2>,
    {
        match self.payload {
            Payload::Value(value) => Outcome {
                logic: self.logic,
                payload: Payload::Value(value),
            },
            Payload::Error(error) => f(self.logic, error),
        }
    }

    /// Transform the custom error of a failure.
    pub fn map_error<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        let payload = match self.payload {
            Payload::Value(value) => Payload::Value(value),
            Payload::Error(error) => Payload::Error(f(error)),
        };
        Outcome {
            logic: self.logic,
            payload,
        }
    }

    /// Run a side effect whatever the state; returns `self` unchanged.
    pub fn on_any<F>(self, f: F) -> Self
    where
        F: FnOnce(&Self),
    {
        f(&self);
        self
    }

    /// Hand the whole outcome to `f` whatever the state.
    pub fn on_any_map<U, F>(self, f: F) -> U
    where
        F: FnOnce(Self) -> U,
    {
        f(self)
    }

    /// Exhaustive fold: exactly one branch runs; warnings take the success branch.
    pub fn on_success_or_failure<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(ResultLogic, E) -> U,
    {
        self.on_success_or_failure_with(WarningPolicy::Tolerate, on_success, on_failure)
    }

    /// Exhaustive fold under `policy`; an escalated warning takes the failure branch.
    pub fn on_success_or_failure_with<U, S, F>(
        self,
        policy: WarningPolicy<E>,
        on_success: S,
        on_failure: F,
    ) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(ResultLogic, E) -> U,
    {
        let Outcome { logic, payload } = self.escalate(policy);
        match payload {
            Payload::Value(value) => on_success(value),
            Payload::Error(error) => on_failure(logic, error),
        }
    }

    /// Fail with `message` and `error` unless `predicate` accepts the value.
    ///
    /// See [`Outcome::ensure_or_else`].
    #[track_caller]
    pub fn ensure_or<P>(self, predicate: P, message: impl Into<String>, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure_or_else(predicate, message, |_| error)
    }

    /// Fail with `message` and the factory's error unless `predicate` accepts the value.
    ///
    /// A failure is returned untouched and the predicate never runs. An
    /// accepted value returns `self` as is, warning included.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn ensure_or_else<P, F>(self, predicate: P, message: impl Into<String>, factory: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
    {
        let message = enforce(non_empty(message.into(), "message"));
        let rejected = match &self.payload {
            Payload::Value(value) => (!predicate(value)).then(|| factory(value)),
            Payload::Error(_) => None,
        };
        match rejected {
            Some(error) => Outcome::failed(ResultLogic::with_state(State::Failure, message, None), error),
            None => self,
        }
    }
}

impl<T> Outcome<T, ()> {
    /// Fail with `message` unless `predicate` accepts the value.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn ensure<P>(self, predicate: P, message: impl Into<String>) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure_or(predicate, message, ())
    }
}
