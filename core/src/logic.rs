//! # ResultLogic: the Tri-State Record
//!
//! Every outcome carries a `ResultLogic`: its [`State`], plus the diagnostic
//! message and optional [`Exception`] that explain a warning or a failure.
//!
//! The state alone decides which parts are legal:
//!
//! | State   | message      | exception |
//! |---------|--------------|-----------|
//! | Success | absent       | absent    |
//! | Warning | non-empty    | optional  |
//! | Failure | non-empty    | optional  |

use crate::error::{ContractError, ContractResult, Exception, enforce, non_empty};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three outcome states.
///
/// Ordered `Failure < Warning < Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Failure,
    Warning,
    Success,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Success => f.write_str("Success"),
            State::Warning => f.write_str("Warning"),
            State::Failure => f.write_str("Failure"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LogicRecord")]
pub struct ResultLogic {
    state: State,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip)]
    exception: Option<Exception>,
}

/// Unchecked wire shape; validated into a `ResultLogic` on deserialization.
#[derive(Deserialize)]
struct LogicRecord {
    state: State,
    #[serde(default)]
    message: Option<String>,
}

impl TryFrom<LogicRecord> for ResultLogic {
    type Error = ContractError;

    fn try_from(record: LogicRecord) -> ContractResult<Self> {
        ResultLogic::try_new(record.state, record.message, None)
    }
}

impl ResultLogic {
    pub const fn success() -> Self {
        ResultLogic {
            state: State::Success,
            message: None,
            exception: None,
        }
    }

    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn warning(message: impl Into<String>) -> Self {
        enforce(Self::try_warning(message))
    }

    pub fn try_warning(message: impl Into<String>) -> ContractResult<Self> {
        Self::try_new(State::Warning, Some(message.into()), None)
    }

    /// # Panics
    /// Panics if `message` is empty.
    #[track_caller]
    pub fn failure(message: impl Into<String>) -> Self {
        enforce(Self::try_failure(message))
    }

    pub fn try_failure(message: impl Into<String>) -> ContractResult<Self> {
        Self::try_new(State::Failure, Some(message.into()), None)
    }

    /// Validate and assemble a record from its parts.
    pub fn try_new(
        state: State,
        message: Option<String>,
        exception: Option<Exception>,
    ) -> ContractResult<Self> {
        match state {
            State::Success => {
                if message.is_some() || exception.is_some() {
                    return Err(ContractError::InvalidState(
                        "a success carries neither a message nor an exception".to_string(),
                    ));
                }
                Ok(ResultLogic::success())
            }
            State::Warning | State::Failure => {
                let message = message.ok_or(ContractError::ArgumentNull {
                    argument: "message",
                })?;
                Ok(ResultLogic {
                    state,
                    message: Some(non_empty(message, "message")?),
                    exception,
                })
            }
        }
    }

    /// Built from an already validated message.
    pub(crate) fn with_state(state: State, message: String, exception: Option<Exception>) -> Self {
        ResultLogic {
            state,
            message: Some(message),
            exception,
        }
    }

    /// Attach an exception. A success stays a success and ignores it.
    pub fn with_exception(mut self, exception: Exception) -> Self {
        if self.state != State::Success {
            self.exception = Some(exception);
        }
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    pub(crate) fn into_diagnostics(self) -> (Option<String>, Option<Exception>) {
        (self.message, self.exception)
    }

    /// Anything but a failure.
    pub fn is_success(&self) -> bool {
        self.state != State::Failure
    }

    pub fn is_warning(&self) -> bool {
        self.state == State::Warning
    }

    pub fn is_failure(&self) -> bool {
        self.state == State::Failure
    }

    /// A success without a warning attached.
    pub fn is_only_success(&self) -> bool {
        self.state == State::Success
    }

    /// Failure, or a warning while warnings are being escalated.
    pub fn considered_failure(&self, warning_as_error: bool) -> bool {
        self.is_failure() || (warning_as_error && self.is_warning())
    }

    /// The same diagnostics in the failure state.
    ///
    /// Only a warning changes; success and failure come back as they were.
    pub fn escalated(self) -> Self {
        match self.state {
            State::Warning => {
                tracing::trace!(
                    diagnostic = self.message.as_deref().unwrap_or_default(),
                    "Escalating warning to failure"
                );
                ResultLogic {
                    state: State::Failure,
                    ..self
                }
            }
            State::Success | State::Failure => self,
        }
    }
}

impl Default for ResultLogic {
    fn default() -> Self {
        ResultLogic::success()
    }
}

impl PartialEq for ResultLogic {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.message == other.message
            && self.exception == other.exception
    }
}

impl fmt::Display for ResultLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.state, message),
            None => write!(f, "{}", self.state),
        }
    }
}
