//! Top-level simulator: drives both policies over one program image.
//!
//! A [`Simulator`] owns the configuration, the instruction streams, and the
//! initial data-memory image. Each policy run gets a fresh
//! [`Scheduler`](crate::core::Scheduler) and a fresh copy of the initial
//! data memory, so the blocked and fine-grained runs are fully independent:
//! neither observes the other's stores, and re-running a policy replaces
//! its previous results.

use tracing::info;

use crate::common::{Policy, RegisterFile, SimError};
use crate::config::SimConfig;
use crate::core::scheduler::{Blocked, FineGrained, Scheduler, SwitchPolicy};
use crate::mem::{ProgramImage, SparseMemory};
use crate::stats::RunStats;

/// Results of one completed policy run.
#[derive(Debug, Clone)]
struct CompletedRun {
    stats: RunStats,
    contexts: Vec<RegisterFile>,
    memory: SparseMemory,
}

/// Drives one program image under both multithreading disciplines and
/// exposes their results.
///
/// # Examples
///
/// ```
/// use mtsim_core::config::SimConfig;
/// use mtsim_core::isa::{Instruction, Opcode, Operand};
/// use mtsim_core::mem::{ProgramImage, SparseMemory};
/// use mtsim_core::{Policy, Simulator};
///
/// let addi = Instruction {
///     opcode: Opcode::Addi,
///     dst: 1,
///     src1: 0,
///     src2: Operand::Imm(7),
/// };
/// let program = ProgramImage::with_streams(vec![vec![addi, Instruction::HALT]]);
/// let config = SimConfig { threads: 1, ..SimConfig::default() };
///
/// let mut sim = Simulator::new(config, program, SparseMemory::new()).unwrap();
/// let stats = sim.run_finegrained();
/// assert_eq!(stats.instructions_retired, 1);
/// assert_eq!(sim.thread_context(Policy::FineGrained, 0).unwrap().read(1), 7);
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    program: ProgramImage,
    data: SparseMemory,
    blocked: Option<CompletedRun>,
    finegrained: Option<CompletedRun>,
}

impl Simulator {
    /// Creates a simulator over one program image.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine parameters; validated here, before any run.
    /// * `program` - Per-thread instruction streams. Threads beyond the
    ///   image's streams execute an implicit `HALT`.
    /// * `data` - Initial data memory; each run works on its own copy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the configuration is
    /// rejected by [`SimConfig::validate`].
    pub fn new(
        config: SimConfig,
        program: ProgramImage,
        data: SparseMemory,
    ) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            program,
            data,
            blocked: None,
            finegrained: None,
        })
    }

    /// The configuration driving both runs.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Drives a blocked-multithreading run to completion and returns its
    /// statistics. Replaces any previous blocked results.
    pub fn run_blocked(&mut self) -> RunStats {
        let mut policy = Blocked::new(self.config.switch_penalty);
        let run = self.drive(&mut policy, Policy::Blocked);
        let stats = run.stats;
        self.blocked = Some(run);
        stats
    }

    /// Drives a fine-grained-multithreading run to completion and returns
    /// its statistics. Replaces any previous fine-grained results.
    pub fn run_finegrained(&mut self) -> RunStats {
        let mut policy = FineGrained::new();
        let run = self.drive(&mut policy, Policy::FineGrained);
        let stats = run.stats;
        self.finegrained = Some(run);
        stats
    }

    /// Statistics of a completed run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RunNotCompleted`] if the policy has not been run.
    pub fn stats(&self, policy: Policy) -> Result<RunStats, SimError> {
        Ok(self.completed(policy)?.stats)
    }

    /// Cycles per instruction of a completed run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RunNotCompleted`] if the policy has not been
    /// run, or [`SimError::UndefinedCpi`] if the run retired nothing.
    pub fn cpi(&self, policy: Policy) -> Result<f64, SimError> {
        self.completed(policy)?.stats.cpi()
    }

    /// Snapshot of one thread's architectural registers after a completed
    /// run. A pure read: repeated extraction yields identical snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RunNotCompleted`] if the policy has not been
    /// run, or [`SimError::ThreadOutOfRange`] for a bad thread index.
    pub fn thread_context(&self, policy: Policy, tid: usize) -> Result<RegisterFile, SimError> {
        let run = self.completed(policy)?;
        run.contexts
            .get(tid)
            .copied()
            .ok_or(SimError::ThreadOutOfRange {
                tid,
                count: run.contexts.len(),
            })
    }

    /// Final data memory of a completed run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RunNotCompleted`] if the policy has not been run.
    pub fn final_memory(&self, policy: Policy) -> Result<&SparseMemory, SimError> {
        Ok(&self.completed(policy)?.memory)
    }

    fn completed(&self, policy: Policy) -> Result<&CompletedRun, SimError> {
        let run = match policy {
            Policy::Blocked => self.blocked.as_ref(),
            Policy::FineGrained => self.finegrained.as_ref(),
        };
        run.ok_or(SimError::RunNotCompleted(policy))
    }

    fn drive(&self, policy: &mut dyn SwitchPolicy, which: Policy) -> CompletedRun {
        let mut scheduler = Scheduler::new(&self.config);
        let mut memory = self.data.clone();

        scheduler.run(policy, &self.program, &mut memory);

        let stats = *scheduler.stats();
        info!(
            policy = %which,
            cycles = stats.cycles,
            retired = stats.instructions_retired,
            "run complete"
        );

        CompletedRun {
            stats,
            contexts: scheduler.contexts(),
            memory,
        }
    }
}
