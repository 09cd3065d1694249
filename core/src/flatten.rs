//! # Flatten: Collapsing Nested Outcomes
//!
//! `Outcome<Outcome<T, E>, E>` collapses to `Outcome<T, E>`.
//!
//! The merge is asymmetric. An outer warning infects an inner success, but an
//! inner warning or failure dominates it: the inner message comes first and
//! the outer one is appended after [`RESULTING_IN`]. The innermost exception
//! wins.

use crate::logic::{ResultLogic, State};
use crate::outcome::{Outcome, Payload};

/// Joins an inner diagnostic to the outer one it caused, after a newline.
pub const RESULTING_IN: &str = "Resulting in: ";

impl<T, E> Outcome<Outcome<T, E>, E> {
    pub fn flatten(self) -> Outcome<T, E> {
        let Outcome {
            logic: outer,
            payload,
        } = self;
        let inner = match payload {
            Payload::Value(inner) => inner,
            Payload::Error(error) => return Outcome::failed(outer, error),
        };

        if outer.is_only_success() {
            return inner;
        }

        let Outcome {
            logic: inner_logic,
            payload,
        } = inner;
        let logic = match inner_logic.state() {
            State::Success => outer,
            State::Warning | State::Failure => merge(inner_logic, outer),
        };
        Outcome { logic, payload }
    }
}

/// Inner diagnostics first, then the outer warning they resulted in.
fn merge(inner: ResultLogic, outer: ResultLogic) -> ResultLogic {
    let state = inner.state();
    let (inner_message, inner_exception) = inner.into_diagnostics();
    let (outer_message, outer_exception) = outer.into_diagnostics();

    let message = format!(
        "{}\n{}{}",
        inner_message.unwrap_or_default(),
        RESULTING_IN,
        outer_message.unwrap_or_default()
    );
    tracing::trace!(%state, diagnostic = %message, "Merged nested outcome diagnostics");

    ResultLogic::with_state(state, message, inner_exception.or(outer_exception))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Exception;

    type Nested = Outcome<Outcome<i32, &'static str>, &'static str>;

    #[test]
    fn test_outer_failure_propagates() {
        let outer: Nested = Outcome::fail_with("outer fail", "E_OUTER");
        let flat = outer.flatten();
        assert!(flat.is_failure());
        assert_eq!(flat.message(), Some("outer fail"));
        assert_eq!(flat.error(), Ok(&"E_OUTER"));
    }

    #[test]
    fn test_outer_only_success_returns_inner_unchanged() {
        let inner: Outcome<i32, &str> = Outcome::warn(3, "inner warn");
        let outer: Nested = Outcome::ok(inner.clone());
        assert_eq!(outer.flatten(), inner);

        let inner: Outcome<i32, &str> = Outcome::fail_with("inner fail", "E");
        let outer: Nested = Outcome::ok(inner.clone());
        assert_eq!(outer.flatten(), inner);
    }

    #[test]
    fn test_outer_warning_over_inner_failure() {
        let inner: Outcome = Outcome::fail("inner fail");
        let outer: Outcome<Outcome> = Outcome::warn(inner, "outer warn");

        let flat = outer.flatten();

        assert!(flat.is_failure());
        assert_eq!(
            flat.message(),
            Some("inner fail\nResulting in: outer warn")
        );
    }

    #[test]
    fn test_outer_warning_over_inner_warning() {
        let inner: Outcome<i32, &str> = Outcome::warn(9, "inner warn");
        let outer: Nested = Outcome::warn(inner, "outer warn");

        let flat = outer.flatten();

        assert!(flat.is_warning());
        assert_eq!(flat.value(), Ok(&9));
        assert_eq!(
            flat.message(),
            Some("inner warn\nResulting in: outer warn")
        );
    }

    #[test]
    fn test_outer_warning_infects_inner_success() {
        let outer_exn = Exception::msg("outer cause");
        let outer: Nested = Outcome::warn(Outcome::ok(4), "outer warn").with_exception(outer_exn.clone());

        let flat = outer.flatten();

        assert!(flat.is_warning());
        assert_eq!(flat.value(), Ok(&4));
        assert_eq!(flat.message(), Some("outer warn"));
        assert_eq!(flat.exception(), Some(&outer_exn));
    }

    #[test]
    fn test_innermost_exception_wins() {
        let inner_exn = Exception::msg("inner cause");
        let outer_exn = Exception::msg("outer cause");

        let inner: Outcome<i32, &str> = Outcome::fail_with("inner", "E").with_exception(inner_exn.clone());
        let outer: Nested = Outcome::warn(inner, "outer").with_exception(outer_exn.clone());
        assert_eq!(outer.flatten().exception(), Some(&inner_exn));

        let inner: Outcome<i32, &str> = Outcome::fail_with("inner", "E");
        let outer: Nested = Outcome::warn(inner, "outer").with_exception(outer_exn.clone());
        let flat = outer.flatten();
        assert_eq!(flat.exception(), Some(&outer_exn));
        assert_eq!(flat.error(), Ok(&"E"));
    }
}
