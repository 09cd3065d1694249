//! # Conversions at the Boundaries
//!
//! Explicit, named conversions between `Maybe`, `Outcome` and std types.
//! Nothing here converts implicitly.
//!
//! Rust's `Result<T, String>` plays the role of `Either<String, T>`:
//! `Err` is the left (message) side, `Ok` the right (value) side.

use crate::error::{ContractError, Exception, enforce, non_empty};
use crate::logic::{ResultLogic, State};
use crate::maybe::Maybe;
use crate::metadata::short_type_name;
use crate::outcome::{CustomOutcome, Outcome, Payload};

/// Left side produced for a success whose value is absent.
pub const NULL_VALUE_MESSAGE: &str = "Result succeeded but its value is absent.";

/// Failure message used when an empty `Maybe<T>` is converted.
///
/// `{T}` is the Rust type name without module paths, so an empty `Maybe<i32>`
/// reads `Maybe<i32>` (not `Maybe<Int32>`).
pub fn empty_maybe_message<T: ?Sized>() -> String {
    format!(
        "Attempt to convert an empty Maybe<{}> to a Result.",
        short_type_name::<T>()
    )
}

impl<T> Maybe<T> {
    /// Present -> success, empty -> failure with the default message.
    pub fn to_outcome(&self) -> Outcome {
        self.to_outcome_with(empty_maybe_message::<T>())
    }

    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn to_outcome_with(&self, message: impl Into<String>) -> Outcome {
        let message = enforce(non_empty(message.into(), "message"));
        if self.has_value() {
            Outcome::success()
        } else {
            Outcome::failed(ResultLogic::with_state(State::Failure, message, None), ())
        }
    }

    /// Present -> success carrying the value.
    pub fn to_value_outcome(self) -> Outcome<T> {
        self.to_value_outcome_with(empty_maybe_message::<T>())
    }

    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn to_value_outcome_with(self, message: impl Into<String>) -> Outcome<T> {
        self.to_value_custom_outcome_with(message, || ())
    }

    /// Empty -> failure carrying `error`.
    pub fn to_custom_outcome<E>(&self, error: E) -> CustomOutcome<E> {
        self.to_custom_outcome_with(|| error)
    }

    /// Empty -> failure carrying the factory's error; the factory runs only then.
    pub fn to_custom_outcome_with<E, F>(&self, factory: F) -> CustomOutcome<E>
    where
        F: FnOnce() -> E,
    {
        self.as_ref()
            .to_value_custom_outcome_with(empty_maybe_message::<T>(), factory)
            .discard_value()
    }

    pub fn to_value_custom_outcome<E>(self, error: E) -> Outcome<T, E> {
        self.to_value_custom_outcome_with(empty_maybe_message::<T>(), || error)
    }

    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn to_value_custom_outcome_with<E, F>(self, message: impl Into<String>, factory: F) -> Outcome<T, E>
    where
        F: FnOnce() -> E,
    {
        let message = enforce(non_empty(message.into(), "message"));
        match self.into_option() {
            Some(value) => Outcome::ok(value),
            None => Outcome::failed(ResultLogic::with_state(State::Failure, message, None), factory()),
        }
    }
}

impl<T, E> Outcome<T, E> {
    /// Success or warning -> present value, failure -> empty.
    pub fn to_maybe(self) -> Maybe<T> {
        match self.payload {
            Payload::Value(value) => Maybe::some(value),
            Payload::Error(_) => Maybe::none(),
        }
    }

    /// `Ok(value)` unless failed, else `Err(message)`.
    pub fn into_either(self) -> Result<T, String> {
        match self.payload {
            Payload::Value(value) => Ok(value),
            Payload::Error(_) => Err(self.logic.message().unwrap_or_default().to_string()),
        }
    }
}

impl<T, E> Outcome<Option<T>, E> {
    /// Like [`Outcome::into_either`], but an absent success value becomes
    /// `Err(NULL_VALUE_MESSAGE)`.
    pub fn into_either_present(self) -> Result<T, String> {
        self.into_either()?
            .ok_or_else(|| NULL_VALUE_MESSAGE.to_string())
    }
}

impl<T> Outcome<T> {
    /// Lift a std `Result`: the error becomes the failure's exception,
    /// its display text the failure's message.
    pub fn from_result<X>(result: Result<T, X>) -> Self
    where
        X: std::error::Error + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Outcome::ok(value),
            Err(err) => {
                let message = match err.to_string() {
                    text if text.is_empty() => short_type_name::<X>(),
                    text => text,
                };
                Outcome::failed(
                    ResultLogic::with_state(State::Failure, message, Some(Exception::new(err))),
                    (),
                )
            }
        }
    }
}

impl<T> TryFrom<Result<T, String>> for Outcome<T> {
    type Error = ContractError;

    /// `Ok` -> success, `Err(message)` -> failure; an empty message is rejected.
    fn try_from(either: Result<T, String>) -> Result<Self, Self::Error> {
        match either {
            Ok(value) => Ok(Outcome::ok(value)),
            Err(message) => Outcome::try_fail(message),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Maybe<T> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.to_maybe()
    }
}
