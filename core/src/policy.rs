//! # WarningPolicy: Escalation as a Value
//!
//! Combinators that branch on success take a `WarningPolicy` to decide
//! whether a warning still counts as a success. When it does not, the
//! warning is escalated to a failure, and failures of a custom-error outcome
//! need an error value: the policy carries it (or a factory for it).

use crate::logic::ResultLogic;
use std::fmt;

/// What a warning means at one particular call site.
pub enum WarningPolicy<E = ()> {
    /// Warnings pass as successes.
    Tolerate,
    /// Warnings become failures carrying this error.
    Escalate(E),
    /// Warnings become failures carrying the factory's error.
    ///
    /// The factory runs only if a warning is actually escalated.
    EscalateWith(Box<dyn FnOnce(&ResultLogic) -> E + Send>),
}

impl<E> WarningPolicy<E> {
    pub fn escalate(error: E) -> Self {
        WarningPolicy::Escalate(error)
    }

    pub fn escalate_with<F>(factory: F) -> Self
    where
        F: FnOnce(&ResultLogic) -> E + Send + 'static,
    {
        WarningPolicy::EscalateWith(Box::new(factory))
    }

    /// True unless warnings are tolerated.
    pub fn escalates(&self) -> bool {
        !matches!(self, WarningPolicy::Tolerate)
    }

    pub fn considers_failure(&self, logic: &ResultLogic) -> bool {
        logic.considered_failure(self.escalates())
    }

    /// The error for an escalated warning; `None` when tolerating.
    pub(crate) fn into_error(self, logic: &ResultLogic) -> Option<E> {
        match self {
            WarningPolicy::Tolerate => None,
            WarningPolicy::Escalate(error) => Some(error),
            WarningPolicy::EscalateWith(factory) => Some(factory(logic)),
        }
    }
}

impl WarningPolicy<()> {
    /// Treat warnings as errors on outcomes without a custom error type.
    pub fn strict() -> Self {
        WarningPolicy::Escalate(())
    }
}

impl<E> Default for WarningPolicy<E> {
    fn default() -> Self {
        WarningPolicy::Tolerate
    }
}

impl<E: fmt::Debug> fmt::Debug for WarningPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningPolicy::Tolerate => f.write_str("Tolerate"),
            WarningPolicy::Escalate(error) => f.debug_tuple("Escalate").field(error).finish(),
            WarningPolicy::EscalateWith(_) => f.write_str("EscalateWith(..)"),
        }
    }
}
