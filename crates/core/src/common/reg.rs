//! Per-thread architectural register file.
//!
//! This module implements the register file owned by each hardware thread.
//! It performs the following:
//! 1. **Storage:** Maintains [`REG_COUNT`] signed 32-bit registers.
//! 2. **Snapshots:** The file is a plain `Copy` value, so context extraction
//!    at the end of a run is a direct copy with no aliasing concerns.
//! 3. **Debugging:** Provides a utility for dumping the register state.

use serde::Serialize;

use super::constants::REG_COUNT;

/// Architectural register file of a single hardware thread.
///
/// Registers are signed 32-bit integers, all initialized to zero at the
/// start of a run. Unlike RISC register files there is no hardwired-zero
/// register: every index is a normal read/write register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RegisterFile {
    regs: [i32; REG_COUNT],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; must be below [`REG_COUNT`]. Instruction
    ///   operands are range-checked when an image is loaded, so indices
    ///   reaching the core are always in range.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs[idx]
    }

    /// Writes a value to a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; must be below [`REG_COUNT`].
    /// * `val` - The value to write.
    pub fn write(&mut self, idx: usize, val: i32) {
        self.regs[idx] = val;
    }

    /// Returns the registers as a fixed-size array.
    pub fn as_array(&self) -> [i32; REG_COUNT] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs with hexadecimal formatting.
    pub fn dump(&self) {
        for i in (0..REG_COUNT).step_by(2) {
            println!(
                "r{:<2}={:#010x} r{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
