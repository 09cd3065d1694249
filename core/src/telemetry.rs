//! # Telemetry: Observing Outcomes
//!
//! Emits one `tracing` event per observed outcome, with a level that follows
//! its state. The outcome itself passes through untouched.

use crate::logic::State;
use crate::outcome::Outcome;

impl<T, E> Outcome<T, E> {
    /// Emit a tracing event describing this outcome, then return it unchanged.
    ///
    /// Success logs at `INFO`, warning at `WARN`, failure at `ERROR`.
    pub fn traced(self, label: &str) -> Self {
        let diagnostic = self.message().unwrap_or_default();
        match self.state() {
            State::Success => {
                tracing::info!(verdict.label = %label, "Outcome completed: Success");
            }
            State::Warning => {
                tracing::warn!(
                    verdict.label = %label,
                    diagnostic,
                    exception = ?self.exception(),
                    "Outcome completed: Warning"
                );
            }
            State::Failure => {
                tracing::error!(
                    verdict.label = %label,
                    diagnostic,
                    exception = ?self.exception(),
                    "Outcome failed: Failure"
                );
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("trace"))
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_traced_returns_outcome_unchanged() {
        init_tracing();

        let warn: Outcome<i32> = Outcome::warn(1, "w");
        assert_eq!(warn.clone().traced("warn-step"), warn);

        let fail: Outcome<i32> = Outcome::fail("f");
        assert_eq!(fail.clone().traced("fail-step"), fail);

        let ok: Outcome<i32> = Outcome::ok(1);
        assert_eq!(ok.clone().traced("ok-step"), ok);
    }
}
