//! # Contract Errors and Exceptions
//!
//! Two very different kinds of "error" live in this crate:
//!
//! * [`ContractError`] is a *programmer* error: reading a value that is not
//!   there, passing an empty message, building an inconsistent outcome.
//!   These never travel through a combinator chain.
//! * [`Exception`] is a *domain* payload: the cause attached to a warning or a
//!   failure. It rides along inside an `Outcome` as a value.

use crate::metadata::short_type_name;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub type ContractResult<T> = Result<T, ContractError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A value (or error) was read from a container that does not hold one.
    #[error("No value present in {type_name}")]
    NoValue { type_name: String },
    /// A required argument was absent or empty.
    #[error("Argument `{argument}` must not be null or empty")]
    ArgumentNull { argument: &'static str },
    /// The requested combination of state and payload is not representable.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ContractError {
    pub(crate) fn no_value<T: ?Sized>(container: &str) -> Self {
        ContractError::NoValue {
            type_name: format!("{}<{}>", container, short_type_name::<T>()),
        }
    }
}

/// Unwraps a contract check at a call site whose signature can not fail.
///
/// Contract violations are bugs in the caller, so they surface as a panic
/// carrying the [`ContractError`] message.
#[track_caller]
pub(crate) fn enforce<T>(checked: ContractResult<T>) -> T {
    match checked {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Rejects empty diagnostic messages.
pub(crate) fn non_empty(message: String, argument: &'static str) -> ContractResult<String> {
    if message.is_empty() {
        Err(ContractError::ArgumentNull { argument })
    } else {
        Ok(message)
    }
}

/// The cause attached to a warning or a failure.
///
/// Cheap to clone: every clone shares the same underlying error, and
/// equality is identity of that shared error.
#[derive(Clone)]
pub struct Exception(Arc<anyhow::Error>);

impl Exception {
    /// Wrap any error type.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Exception(Arc::new(anyhow::Error::new(error)))
    }

    /// Build an exception from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Exception(Arc::new(anyhow::Error::msg(message)))
    }

    pub fn as_error(&self) -> &anyhow::Error {
        &self.0
    }

    /// Attempt to view the wrapped error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// True when both handles share the same underlying error.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<anyhow::Error> for Exception {
    fn from(error: anyhow::Error) -> Self {
        Exception(Arc::new(error))
    }
}

impl PartialEq for Exception {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Exception").field(&self.0).finish()
    }
}
