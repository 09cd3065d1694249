//! # Outcome: Control Flow as Data
//!
//! Instead of unwinding, every computation returns an `Outcome`.
//! One generic shape covers the whole family:
//!
//! | Alias                | Type              | Payload                    |
//! |----------------------|-------------------|----------------------------|
//! | plain outcome        | `Outcome`         | nothing                    |
//! | value outcome        | `Outcome<T>`      | `T` unless failed          |
//! | custom-error outcome | `CustomOutcome<E>`| `E` when failed            |
//! | full outcome         | `Outcome<T, E>`   | `T` unless failed, else `E`|
//!
//! A richer outcome narrows to a poorer one by dropping its value or error;
//! state, message and exception always survive.

use crate::error::{ContractError, ContractResult, Exception, enforce};
use crate::logic::{ResultLogic, State};
use crate::metadata::short_type_name;
use crate::policy::WarningPolicy;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

/// Outcome without a value, failing with a custom error.
pub type CustomOutcome<E> = Outcome<(), E>;

/// The tri-state outcome of a computation.
///
/// Immutable: every combinator consumes it and hands back a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "OutcomeRecord<T, E>",
    bound(
        serialize = "T: Serialize, E: Serialize",
        deserialize = "T: Deserialize<'de>, E: Deserialize<'de>"
    )
)]
pub struct Outcome<T = (), E = ()> {
    #[serde(flatten)]
    pub(crate) logic: ResultLogic,
    #[serde(flatten)]
    pub(crate) payload: Payload<T, E>,
}

/// Value while not failed, error once failed.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Payload<T, E> {
    Value(T),
    Error(E),
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, E: Deserialize<'de>"))]
struct OutcomeRecord<T, E> {
    #[serde(flatten)]
    logic: ResultLogic,
    #[serde(flatten)]
    payload: Payload<T, E>,
}

impl<T, E> TryFrom<OutcomeRecord<T, E>> for Outcome<T, E> {
    type Error = ContractError;

    fn try_from(record: OutcomeRecord<T, E>) -> ContractResult<Self> {
        Outcome::assemble(record.logic, record.payload)
    }
}

impl<E> Outcome<(), E> {
    /// A plain success.
    pub fn success() -> Self {
        Outcome::ok(())
    }

    /// A plain warning.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn warning(message: impl Into<String>) -> Self {
        Outcome::warn((), message)
    }

    pub fn try_warning(message: impl Into<String>) -> ContractResult<Self> {
        Outcome::try_warn((), message)
    }

    /// Widen to a value outcome. A failure stays a failure and drops `value`.
    pub fn with_value<U>(self, value: U) -> Outcome<U, E> {
        Outcome {
            logic: self.logic,
            payload: match self.payload {
                Payload::Value(()) => Payload::Value(value),
                Payload::Error(error) => Payload::Error(error),
            },
        }
    }
}

impl<T> Outcome<T, ()> {
    /// A failure of an outcome without a custom error type.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::fail_with(message, ())
    }

    pub fn try_fail(message: impl Into<String>) -> ContractResult<Self> {
        Outcome::try_fail_with(message, ())
    }
}

impl<T, E> Outcome<T, E> {
    pub fn ok(value: T) -> Self {
        Outcome {
            logic: ResultLogic::success(),
            payload: Payload::Value(value),
        }
    }

    /// A success that carries a diagnostic.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn warn(value: T, message: impl Into<String>) -> Self {
        enforce(Self::try_warn(value, message))
    }

    pub fn try_warn(value: T, message: impl Into<String>) -> ContractResult<Self> {
        Ok(Outcome {
            logic: ResultLogic::try_warning(message)?,
            payload: Payload::Value(value),
        })
    }

    /// A failure carrying a caller-defined error.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn fail_with(message: impl Into<String>, error: E) -> Self {
        enforce(Self::try_fail_with(message, error))
    }

    pub fn try_fail_with(message: impl Into<String>, error: E) -> ContractResult<Self> {
        Ok(Outcome {
            logic: ResultLogic::try_failure(message)?,
            payload: Payload::Error(error),
        })
    }

    /// Assemble an outcome from separately held parts.
    ///
    /// A failure needs an error, anything else needs a value.
    pub fn from_parts(logic: ResultLogic, value: Option<T>, error: Option<E>) -> ContractResult<Self> {
        let payload = if logic.is_failure() {
            Payload::Error(error.ok_or(ContractError::ArgumentNull { argument: "error" })?)
        } else {
            Payload::Value(value.ok_or(ContractError::ArgumentNull { argument: "value" })?)
        };
        Ok(Outcome { logic, payload })
    }

    fn assemble(logic: ResultLogic, payload: Payload<T, E>) -> ContractResult<Self> {
        let carries_error = matches!(payload, Payload::Error(_));
        match (carries_error, logic.is_failure()) {
            (false, false) | (true, true) => Ok(Outcome { logic, payload }),
            (false, true) => Err(ContractError::InvalidState(
                "a failure must carry an error, not a value".to_string(),
            )),
            (true, false) => Err(ContractError::InvalidState(
                "only a failure carries an error".to_string(),
            )),
        }
    }

    /// A failure built from validated parts.
    pub(crate) fn failed(logic: ResultLogic, error: E) -> Self {
        Outcome {
            logic,
            payload: Payload::Error(error),
        }
    }

    /// Attach an exception to a warning or failure; a success ignores it.
    pub fn with_exception(self, exception: Exception) -> Self {
        Outcome {
            logic: self.logic.with_exception(exception),
            payload: self.payload,
        }
    }

    pub fn state(&self) -> State {
        self.logic.state()
    }

    pub fn logic(&self) -> &ResultLogic {
        &self.logic
    }

    pub fn message(&self) -> Option<&str> {
        self.logic.message()
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.logic.exception()
    }

    /// Anything but a failure (a warning is a success).
    pub fn is_success(&self) -> bool {
        self.logic.is_success()
    }

    pub fn is_warning(&self) -> bool {
        self.logic.is_warning()
    }

    pub fn is_failure(&self) -> bool {
        self.logic.is_failure()
    }

    pub fn is_only_success(&self) -> bool {
        self.logic.is_only_success()
    }

    /// Borrow the value, or fail with [`ContractError::NoValue`] on a failure.
    pub fn value(&self) -> ContractResult<&T> {
        match &self.payload {
            Payload::Value(value) => Ok(value),
            Payload::Error(_) => Err(ContractError::no_value::<T>("Outcome")),
        }
    }

    pub fn into_value(self) -> ContractResult<T> {
        match self.payload {
            Payload::Value(value) => Ok(value),
            Payload::Error(_) => Err(ContractError::no_value::<T>("Outcome")),
        }
    }

    /// Borrow the error, or fail with [`ContractError::NoValue`] unless failed.
    pub fn error(&self) -> ContractResult<&E> {
        match &self.payload {
            Payload::Error(error) => Ok(error),
            Payload::Value(_) => Err(ContractError::no_value::<E>("Error")),
        }
    }

    pub fn into_error(self) -> ContractResult<E> {
        match self.payload {
            Payload::Error(error) => Ok(error),
            Payload::Value(_) => Err(ContractError::no_value::<E>("Error")),
        }
    }

    /// Split into the state record and a std `Result` of the payload.
    pub fn into_parts(self) -> (ResultLogic, Result<T, E>) {
        let payload = match self.payload {
            Payload::Value(value) => Ok(value),
            Payload::Error(error) => Err(error),
        };
        (self.logic, payload)
    }

    /// Separate the two tracks so each can be handled on its own.
    ///
    /// `Ok` holds the value and a value-less shell keeping the state and
    /// diagnostics; `Err` holds the failure, retyped to any value type.
    pub fn split<U>(self) -> Result<(T, Outcome<(), E>), Outcome<U, E>> {
        match self.payload {
            Payload::Value(value) => Ok((
                value,
                Outcome {
                    logic: self.logic,
                    payload: Payload::Value(()),
                },
            )),
            Payload::Error(error) => Err(Outcome::failed(self.logic, error)),
        }
    }

    /// Drop the value, keeping state, diagnostics and error.
    pub fn discard_value(self) -> Outcome<(), E> {
        Outcome {
            logic: self.logic,
            payload: match self.payload {
                Payload::Value(_) => Payload::Value(()),
                Payload::Error(error) => Payload::Error(error),
            },
        }
    }

    /// Drop the custom error, keeping state, diagnostics and value.
    pub fn discard_error(self) -> Outcome<T, ()> {
        Outcome {
            logic: self.logic,
            payload: match self.payload {
                Payload::Value(value) => Payload::Value(value),
                Payload::Error(_) => Payload::Error(()),
            },
        }
    }

    /// Narrow all the way down to a plain outcome.
    pub fn into_plain(self) -> Outcome {
        Outcome {
            logic: self.logic,
            payload: match self.payload {
                Payload::Value(_) => Payload::Value(()),
                Payload::Error(_) => Payload::Error(()),
            },
        }
    }

    /// Turn a warning into a failure if the policy says so.
    ///
    /// Message and exception are preserved; the error comes from the policy.
    /// Successes and failures pass through untouched.
    pub fn escalate(self, policy: WarningPolicy<E>) -> Self {
        if !self.logic.is_warning() {
            return self;
        }
        match policy.into_error(&self.logic) {
            Some(error) => Outcome::failed(self.logic.escalated(), error),
            None => self,
        }
    }
}

impl<T: PartialOrd, E: PartialOrd> PartialOrd for Outcome<T, E> {
    /// Orders by state (`Failure < Warning < Success`), then payload, then message.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.state().cmp(&other.state()) {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match self.payload.partial_cmp(&other.payload)? {
            Ordering::Equal => match self.message().cmp(&other.message()) {
                Ordering::Equal if self.logic != other.logic => None,
                ord => Some(ord),
            },
            ord => Some(ord),
        }
    }
}

impl<T: PartialOrd + 'static, E: PartialOrd + 'static> Outcome<T, E> {
    /// Compare against an outcome whose parameterization is only known at runtime.
    ///
    /// Fails with [`ContractError::InvalidState`] when `other` is not an
    /// `Outcome<T, E>`; otherwise behaves like `partial_cmp`.
    pub fn try_cmp_dyn(&self, other: &dyn Any) -> ContractResult<Option<Ordering>> {
        match other.downcast_ref::<Outcome<T, E>>() {
            Some(other) => Ok(self.partial_cmp(other)),
            None => Err(ContractError::InvalidState(format!(
                "cannot compare Outcome<{}, {}> with a value of a different type",
                short_type_name::<T>(),
                short_type_name::<E>()
            ))),
        }
    }
}

impl<T, E> fmt::Display for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.logic.fmt(f)
    }
}

impl<T, E> From<Outcome<T, E>> for ResultLogic {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.logic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_set_state() {
        let ok: Outcome = Outcome::success();
        assert!(ok.is_success() && ok.is_only_success());

        let fail: Outcome = Outcome::fail("m");
        assert!(fail.is_failure());
        assert_eq!(fail.message(), Some("m"));

        let warn: Outcome = Outcome::warning("w");
        assert!(warn.is_success() && warn.is_warning() && !warn.is_only_success());
    }

    #[test]
    fn test_value_is_present_unless_failed() {
        let ok: Outcome<i32> = Outcome::ok(4);
        assert_eq!(ok.value(), Ok(&4));

        let warn: Outcome<i32> = Outcome::warn(5, "stale");
        assert_eq!(warn.value(), Ok(&5));

        let fail: Outcome<i32> = Outcome::fail("gone");
        assert_eq!(
            fail.value(),
            Err(ContractError::NoValue {
                type_name: "Outcome<i32>".to_string()
            })
        );
    }

    #[test]
    fn test_error_is_present_only_when_failed() {
        let fail: CustomOutcome<u16> = Outcome::fail_with("not found", 404);
        assert_eq!(fail.error(), Ok(&404));

        let ok: CustomOutcome<u16> = Outcome::success();
        assert_eq!(
            ok.error(),
            Err(ContractError::NoValue {
                type_name: "Error<u16>".to_string()
            })
        );
    }

    #[test]
    fn test_empty_messages_are_rejected() {
        assert_eq!(
            Outcome::<i32>::try_fail(""),
            Err(ContractError::ArgumentNull {
                argument: "message"
            })
        );
        assert!(Outcome::<(), ()>::try_warning("").is_err());
        assert!(Outcome::<i32, u8>::try_fail_with("", 1).is_err());
    }

    #[test]
    #[should_panic(expected = "must not be null or empty")]
    fn test_fail_with_empty_message_panics() {
        let _: Outcome = Outcome::fail("");
    }

    #[test]
    fn test_from_parts_requires_matching_payload() {
        let parts = Outcome::<i32, &str>::from_parts(ResultLogic::failure("f"), Some(1), None);
        assert_eq!(parts, Err(ContractError::ArgumentNull { argument: "error" }));

        let parts = Outcome::<i32, &str>::from_parts(ResultLogic::warning("w"), Some(1), None);
        assert_eq!(parts, Ok(Outcome::warn(1, "w")));
    }

    #[test]
    fn test_narrowing_preserves_diagnostics() {
        let exn = Exception::msg("timeout");
        let full: Outcome<i32, u8> = Outcome::fail_with("slow", 7).with_exception(exn.clone());

        let plain = full.clone().into_plain();
        assert!(plain.is_failure());
        assert_eq!(plain.message(), Some("slow"));
        assert_eq!(plain.exception(), Some(&exn));

        assert_eq!(full.clone().discard_value().error(), Ok(&7));
        assert!(full.discard_error().is_failure());

        let warn: Outcome<i32, u8> = Outcome::warn(3, "w");
        assert_eq!(warn.discard_value(), Outcome::warning("w"));
    }

    #[test]
    fn test_split_separates_tracks() {
        let warn: Outcome<i32> = Outcome::warn(4, "w");
        let (value, shell) = warn.split::<String>().unwrap();
        assert_eq!(value, 4);
        assert!(shell.is_warning());
        assert_eq!(shell.with_value("four").value(), Ok(&"four"));

        let fail: Outcome<i32, u8> = Outcome::fail_with("gone", 9);
        let retyped = fail.split::<String>().unwrap_err();
        assert_eq!(retyped.message(), Some("gone"));
        assert_eq!(retyped.error(), Ok(&9));
    }

    #[test]
    fn test_with_value_keeps_failure() {
        let failed: Outcome = Outcome::fail("f");
        let widened = failed.with_value(1);
        assert!(widened.is_failure());
        assert!(widened.value().is_err());
    }

    #[test]
    fn test_escalate() {
        let warn: Outcome<i32, &str> = Outcome::warn(1, "w");
        let escalated = warn.clone().escalate(WarningPolicy::escalate("boom"));
        assert!(escalated.is_failure());
        assert_eq!(escalated.message(), Some("w"));
        assert_eq!(escalated.error(), Ok(&"boom"));

        assert_eq!(warn.clone().escalate(WarningPolicy::Tolerate), warn);

        let ok: Outcome<i32, &str> = Outcome::ok(1);
        assert_eq!(ok.clone().escalate(WarningPolicy::escalate("x")), ok);
    }

    #[test]
    fn test_ordering() {
        let fail: Outcome<i32> = Outcome::fail("f");
        let warn: Outcome<i32> = Outcome::warn(1, "w");
        let ok1: Outcome<i32> = Outcome::ok(1);
        let ok2: Outcome<i32> = Outcome::ok(2);

        assert!(fail < warn);
        assert!(warn < ok1);
        assert!(ok1 < ok2);
        assert!(ok2 >= ok1);
    }

    #[test]
    fn test_try_cmp_dyn_rejects_other_parameterization() {
        let ok1: Outcome<i32> = Outcome::ok(1);
        let ok2: Outcome<i32> = Outcome::ok(2);
        assert_eq!(ok1.try_cmp_dyn(&ok2), Ok(Some(Ordering::Less)));

        let text: Outcome<String> = Outcome::ok("1".to_string());
        assert!(matches!(
            ok1.try_cmp_dyn(&text),
            Err(ContractError::InvalidState(_))
        ));

        let custom: Outcome<i32, u8> = Outcome::ok(1);
        assert!(matches!(
            ok1.try_cmp_dyn(&custom),
            Err(ContractError::InvalidState(_))
        ));
    }

    #[test]
    fn test_display() {
        let fail: Outcome<i32> = Outcome::fail("disk full");
        assert_eq!(fail.to_string(), "Failure: disk full");
        assert_eq!(Outcome::<i32>::ok(1).to_string(), "Success");
    }

    #[test]
    fn test_serde_shape() {
        let warn: Outcome<i32> = Outcome::warn(5, "stale");
        let json = serde_json::to_value(&warn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "warning", "message": "stale", "value": 5 })
        );
        let parsed: Outcome<i32> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, warn);

        let fail: Outcome<i32, String> = Outcome::fail_with("nope", "E42".to_string());
        let json = serde_json::to_value(&fail).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "failure", "message": "nope", "error": "E42" })
        );

        let inconsistent = serde_json::json!({ "state": "success", "error": "E42" });
        assert!(serde_json::from_value::<Outcome<i32, String>>(inconsistent).is_err());
    }
}
