//! Architectural constants.
//!
//! Parameters of the modeled machine that are fixed by the architecture
//! rather than supplied per run through [`SimConfig`](crate::config::SimConfig).

/// Number of architectural registers in each thread's register file.
///
/// Every thread owns a private file of `REG_COUNT` signed 32-bit registers,
/// all cleared to zero when a simulation run starts.
pub const REG_COUNT: usize = 8;
