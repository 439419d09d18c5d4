//! Memory collaborators of the simulation core.
//!
//! The core treats both memories as external collaborators reached through
//! narrow traits. This module provides:
//! 1. **Traits:** [`InstructionMemory`] and [`DataMemory`], the two contracts
//!    the cycle engine depends on.
//! 2. **Program storage:** [`ProgramImage`], per-thread instruction streams.
//! 3. **Data storage:** [`SparseMemory`], a word-addressed sparse backing store.

/// Per-thread instruction stream storage.
pub mod image;

/// Sparse data-memory backing store.
pub mod sparse;

/// Collaborator trait definitions.
pub mod traits;

pub use image::ProgramImage;
pub use sparse::SparseMemory;
pub use traits::{DataMemory, InstructionMemory};
