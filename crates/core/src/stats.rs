//! Run statistics collection and reporting.
//!
//! This module tracks the counters accumulated over one simulation run. It
//! provides:
//! 1. **Counters:** Elapsed cycles, retired instructions, context switches,
//!    and penalty cycles.
//! 2. **Derived metrics:** CPI, with an explicit error when undefined.
//! 3. **Reporting:** A plain-text summary printer.
//!
//! One `RunStats` instance belongs to exactly one policy run; nothing here
//! is shared across runs.

use serde::Serialize;

use crate::common::SimError;

/// Counters accumulated over one simulation run.
///
/// All counters are monotonically non-decreasing while the run is in
/// progress and are frozen once every thread has halted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Total simulated cycles elapsed, including idle and penalty cycles.
    pub cycles: u64,

    /// Instructions that completed issue. A cycle in which every thread was
    /// stalled elapses without incrementing this counter, and an issued
    /// `HALT` terminates its thread without retiring.
    pub instructions_retired: u64,

    /// Number of context switches the blocked policy performed.
    ///
    /// Always zero for fine-grained runs, which switch for free.
    pub context_switches: u64,

    /// All-threads-idle cycles spent paying context-switch penalties.
    ///
    /// These cycles are also included in [`RunStats::cycles`].
    pub penalty_cycles: u64,
}

impl RunStats {
    /// Cycles per retired instruction.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UndefinedCpi`] if no instruction has retired;
    /// the quotient would otherwise be a misleading infinity or NaN.
    pub fn cpi(&self) -> Result<f64, SimError> {
        if self.instructions_retired == 0 {
            return Err(SimError::UndefinedCpi);
        }
        Ok(self.cycles as f64 / self.instructions_retired as f64)
    }

    /// Prints a summary of this run to stdout.
    ///
    /// # Arguments
    ///
    /// * `label` - Heading for the summary block, e.g. a policy name.
    pub fn print(&self, label: &str) {
        println!("---------------------------------------------");
        println!("{label} run statistics");
        println!("---------------------------------------------");
        println!("  Cycles:               {}", self.cycles);
        println!("  Instructions retired: {}", self.instructions_retired);
        println!("  Context switches:     {}", self.context_switches);
        println!("  Penalty cycles:       {}", self.penalty_cycles);
        match self.cpi() {
            Ok(cpi) => println!("  CPI:                  {cpi:.3}"),
            Err(_) => println!("  CPI:                  undefined (nothing retired)"),
        }
    }
}
