//! Common types shared throughout the multithreaded-core simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Constants:** Architectural parameters such as the register-file size.
//! 2. **Registers:** The per-thread architectural register file.
//! 3. **Policies:** Identifiers for the two scheduling disciplines.
//! 4. **Error Handling:** The simulator-wide error type.

/// Architectural constants used throughout the simulator.
pub mod constants;

/// Simulator error types.
pub mod error;

/// Scheduling-policy identifiers.
pub mod policy;

/// Per-thread register file implementation.
pub mod reg;

pub use constants::REG_COUNT;
pub use error::SimError;
pub use policy::Policy;
pub use reg::RegisterFile;
