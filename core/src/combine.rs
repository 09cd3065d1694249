//! Aggregating many outcomes into one.

use crate::error::Exception;
use crate::logic::{ResultLogic, State};
use crate::outcome::{Outcome, Payload};

/// Separator used by [`Outcome::combine`].
pub const DEFAULT_SEPARATOR: &str = ", ";

impl<T, E> Outcome<Vec<T>, Vec<E>> {
    /// Fold outcomes into one, joining messages with `", "`.
    ///
    /// Any failure makes a failure holding every error. Otherwise any warning
    /// makes a warning holding every value. Only the dominating state's
    /// messages are joined, and the first of its exceptions is kept.
    pub fn combine<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Outcome<T, E>>,
    {
        Self::combine_with_separator(outcomes, DEFAULT_SEPARATOR)
    }

    pub fn combine_with_separator<I>(outcomes: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = Outcome<T, E>>,
    {
        let mut values = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Diagnostics::default();
        let mut failures = Diagnostics::default();

        for outcome in outcomes {
            let Outcome { logic, payload } = outcome;
            match payload {
                Payload::Value(value) => {
                    if logic.is_warning() {
                        warnings.push(logic);
                    }
                    values.push(value);
                }
                Payload::Error(error) => {
                    failures.push(logic);
                    errors.push(error);
                }
            }
        }

        if !errors.is_empty() {
            Outcome::failed(failures.into_logic(State::Failure, separator), errors)
        } else if !warnings.is_empty() {
            Outcome {
                logic: warnings.into_logic(State::Warning, separator),
                payload: Payload::Value(values),
            }
        } else {
            Outcome::ok(values)
        }
    }
}

impl<T, E> FromIterator<Outcome<T, E>> for Outcome<Vec<T>, Vec<E>> {
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        Outcome::combine(iter)
    }
}

#[derive(Default)]
struct Diagnostics {
    messages: Vec<String>,
    exception: Option<Exception>,
}

impl Diagnostics {
    fn push(&mut self, logic: ResultLogic) {
        let (message, exception) = logic.into_diagnostics();
        self.messages.extend(message);
        if self.exception.is_none() {
            self.exception = exception;
        }
    }

    fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn into_logic(self, state: State, separator: &str) -> ResultLogic {
        ResultLogic::with_state(state, self.messages.join(separator), self.exception)
    }
}
