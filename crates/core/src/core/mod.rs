//! The cycle engine of the modeled core.
//!
//! This module contains the cycle-by-cycle machinery: the execution unit,
//! the per-thread state machine, and the two scheduling policies built on a
//! shared rotation scan.

/// Execution unit: pure register-file arithmetic.
pub mod alu;

/// Per-cycle thread scheduling (rotation scan + switch policies).
pub mod scheduler;

/// Per-thread state machine.
pub mod thread;

pub use scheduler::{Blocked, FineGrained, Scheduler, SwitchPolicy};
pub use thread::{Thread, ThreadState};
