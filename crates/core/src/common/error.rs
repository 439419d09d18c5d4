//! Simulator error types.
//!
//! All fatal conditions the core can report are collected in [`SimError`].
//! The set is deliberately small: every operation in the core is a
//! deterministic, single-attempt computation over in-memory state, so there
//! are no retryable or transient failures.

use thiserror::Error;

use super::policy::Policy;

/// Errors reported by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The run configuration is unusable and was rejected before any run
    /// started (for example, a thread count of zero).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A per-thread query named a thread index outside the run's range.
    ///
    /// This is a usage error in the caller, not a recoverable condition.
    #[error("thread index {tid} out of range: the run has {count} threads")]
    ThreadOutOfRange {
        /// The offending thread index.
        tid: usize,
        /// Number of threads in the run.
        count: usize,
    },

    /// CPI was queried for a run in which no instruction ever retired.
    ///
    /// Reported instead of a misleading quotient (zero, infinity, or NaN).
    #[error("CPI is undefined: no instructions have retired")]
    UndefinedCpi,

    /// A result was queried for a policy whose run has not been driven to
    /// completion yet.
    #[error("no completed {0} run: start one before querying results")]
    RunNotCompleted(Policy),
}
