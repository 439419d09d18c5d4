//! Instruction value types.
//!
//! This module defines the decoded instruction format consumed by the
//! execution units. It provides:
//! 1. **Opcodes:** The eight operations the core understands.
//! 2. **Operands:** A second source that is either a register or an immediate.
//! 3. **Formatting:** Assembler-style rendering for traces and dumps.

use std::fmt;

/// Operation performed by an [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// No effect; consumes one issue slot.
    Nop,
    /// `dst = src1 + src2` (register second source).
    Add,
    /// `dst = src1 - src2` (register second source).
    Sub,
    /// `dst = src1 + imm`.
    Addi,
    /// `dst = src1 - imm`.
    Subi,
    /// `dst = mem[src1 + src2]`; stalls the thread for the load latency.
    Load,
    /// `mem[dst + src2] = src1`; stalls the thread for the store latency.
    Store,
    /// Terminates the issuing thread.
    Halt,
}

impl Opcode {
    /// Returns the assembler mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Addi => "ADDI",
            Opcode::Subi => "SUBI",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Halt => "HALT",
        }
    }
}

/// Second source operand: a register index or an immediate value.
///
/// `LOAD` and `STORE` accept either form; `ADD`/`SUB` take a register and
/// `ADDI`/`SUBI` an immediate. The executor resolves either form to a value,
/// so an unexpected combination still executes deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Read the value from the given register.
    Reg(usize),
    /// Use the value directly.
    Imm(i32),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(idx) => write!(f, "${idx}"),
            Operand::Imm(val) => write!(f, "{val}"),
        }
    }
}

/// One decoded instruction.
///
/// Instructions are plain `Copy` values. For `STORE`, `dst` names the base
/// address register and `src1` the value register, mirroring the operand
/// order of the other opcodes rather than their dataflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Destination register (base register for `STORE`).
    pub dst: usize,
    /// First source register (value register for `STORE`).
    pub src1: usize,
    /// Second source operand.
    pub src2: Operand,
}

impl Instruction {
    /// A `NOP` instruction.
    pub const NOP: Self = Self {
        opcode: Opcode::Nop,
        dst: 0,
        src1: 0,
        src2: Operand::Imm(0),
    };

    /// A `HALT` instruction.
    pub const HALT: Self = Self {
        opcode: Opcode::Halt,
        dst: 0,
        src1: 0,
        src2: Operand::Imm(0),
    };
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Nop | Opcode::Halt => write!(f, "{}", self.opcode.mnemonic()),
            _ => write!(
                f,
                "{} ${}, ${}, {}",
                self.opcode.mnemonic(),
                self.dst,
                self.src1,
                self.src2
            ),
        }
    }
}
