//! Per-cycle thread scheduling.
//!
//! Both multithreading disciplines share the same per-cycle skeleton: tick
//! every thread once, pick the first ready thread in rotation order, issue
//! at most one instruction, and advance the cycle counter whether or not
//! anything issued. The disciplines differ only in what happens around the
//! selected thread, which is captured by the [`SwitchPolicy`] hook:
//!
//! - [`FineGrained`] issues with no switch cost and resumes the scan one
//!   past the issuer, giving strict round-robin rotation.
//! - [`Blocked`] stays on the issuing thread until it stalls and pays a
//!   fixed all-threads-idle penalty when the issuer changes.
//!
//! A [`Scheduler`] is the run-state object: it owns the thread vector, the
//! active-thread count, the rotation cursor, and the run's statistics. One
//! instance drives exactly one run; nothing is shared between runs.

use tracing::{debug, trace};

use crate::common::SimError;
use crate::config::SimConfig;
use crate::core::thread::Thread;
use crate::mem::{DataMemory, InstructionMemory};
use crate::stats::RunStats;

mod blocked;
mod finegrained;

pub use blocked::Blocked;
pub use finegrained::FineGrained;

/// Policy hook invoked around the shared rotation scan.
///
/// Implementations must not issue instructions themselves; they may tick
/// threads only inside [`SwitchPolicy::before_issue`], and then exactly
/// once per thread per penalty cycle they account for.
pub trait SwitchPolicy {
    /// Called after `candidate` was selected and before its instruction
    /// issues. A policy that charges switch cycles burns them here,
    /// ticking every thread once per burned cycle and accounting for the
    /// cycles in `stats`.
    fn before_issue(&mut self, candidate: usize, threads: &mut [Thread], stats: &mut RunStats) {
        let _ = (candidate, threads, stats);
    }

    /// Returns the rotation cursor for the cycle after `issued` ran: the
    /// thread to be considered first in the next scan.
    fn next_cursor(&mut self, issued: usize, thread_count: usize) -> usize;
}

/// Run state of one simulation: threads, rotation cursor, and counters.
pub struct Scheduler {
    threads: Vec<Thread>,
    active: usize,
    cursor: usize,
    stats: RunStats,
}

impl Scheduler {
    /// Creates the run state for one policy invocation: `config.threads`
    /// fresh threads, rotation cursor at thread 0, zeroed counters.
    ///
    /// The configuration is assumed validated; a zero-thread configuration
    /// produces a scheduler that is trivially complete.
    pub fn new(config: &SimConfig) -> Self {
        let threads = (0..config.threads)
            .map(|_| Thread::new(config.load_latency, config.store_latency))
            .collect::<Vec<_>>();
        let active = threads.len();
        Self {
            threads,
            active,
            cursor: 0,
            stats: RunStats::default(),
        }
    }

    /// Performs one scheduling step: one simulated cycle, plus any penalty
    /// cycles the policy inserts before the issue.
    ///
    /// Every thread ticks exactly once for the issue cycle (during the
    /// selection scan) and once per penalty cycle; at most one thread
    /// issues. The cycle counter advances even when every thread is idle —
    /// an all-stalled cycle is normal memory backpressure, not an error.
    pub fn step<P: SwitchPolicy + ?Sized>(
        &mut self,
        policy: &mut P,
        imem: &dyn InstructionMemory,
        dmem: &mut dyn DataMemory,
    ) {
        let count = self.threads.len();
        let mut candidate = None;

        // Selection scan: tick everyone, remember the first ready thread
        // in rotation order from the cursor.
        for offset in 0..count {
            let tid = (self.cursor + offset) % count;
            let idle = self.threads[tid].tick();
            if !idle && candidate.is_none() {
                candidate = Some(tid);
            }
        }

        if let Some(tid) = candidate {
            policy.before_issue(tid, &mut self.threads, &mut self.stats);

            let pc = self.threads[tid].pc();
            let inst = imem.fetch(tid, pc);
            trace!(tid, pc, %inst, "issue");

            let issued = self.threads[tid].execute(inst, dmem);
            debug_assert!(issued, "selected thread must be ready");

            if self.threads[tid].is_halted() {
                self.active -= 1;
                debug!(tid, remaining = self.active, "thread halted");
            } else {
                self.stats.instructions_retired += 1;
            }

            self.cursor = policy.next_cursor(tid, count);
        }

        self.stats.cycles += 1;
    }

    /// Drives the run until every thread has halted.
    pub fn run(
        &mut self,
        policy: &mut dyn SwitchPolicy,
        imem: &dyn InstructionMemory,
        dmem: &mut dyn DataMemory,
    ) {
        while !self.is_complete() {
            self.step(policy, imem, dmem);
        }
    }

    /// Returns `true` once every thread has halted.
    pub fn is_complete(&self) -> bool {
        self.active == 0
    }

    /// Number of threads in this run.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Number of threads that have not halted yet.
    pub fn active_threads(&self) -> usize {
        self.active
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Read-only view of a thread.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ThreadOutOfRange`] for an index outside the run.
    pub fn thread(&self, tid: usize) -> Result<&Thread, SimError> {
        self.threads.get(tid).ok_or(SimError::ThreadOutOfRange {
            tid,
            count: self.threads.len(),
        })
    }

    /// Snapshots every thread's register file, in thread order.
    pub fn contexts(&self) -> Vec<crate::common::RegisterFile> {
        self.threads.iter().map(Thread::context).collect()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("threads", &self.threads.len())
            .field("active", &self.active)
            .field("cursor", &self.cursor)
            .field("stats", &self.stats)
            .finish()
    }
}
