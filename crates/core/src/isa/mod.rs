//! Instruction set of the modeled core.
//!
//! The machine executes a deliberately small ISA: register/immediate
//! add and subtract, word load and store, `NOP`, and `HALT`. Instructions
//! are read-only values produced by the instruction-memory collaborator;
//! the core never mutates them.

/// Instruction value types and assembler-style formatting.
pub mod instruction;

pub use instruction::{Instruction, Opcode, Operand};
