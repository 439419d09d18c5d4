//! Blocked multithreading policy.

use tracing::debug;

use crate::core::thread::Thread;
use crate::stats::RunStats;

use super::SwitchPolicy;

/// Run-until-stall issue with a fixed context-switch penalty.
///
/// The rotation cursor stays on the thread that issued, so the core keeps
/// issuing from the resident thread across consecutive ready cycles without
/// switching cost. When the selected thread differs from the last issuer,
/// the configured penalty is paid first: whole cycles in which every thread
/// ticks but nobody issues.
///
/// The very first issue of a run pays no penalty — there is no resident
/// thread to switch away from, so the last issuer starts as `None`.
#[derive(Debug, Clone, Copy)]
pub struct Blocked {
    penalty: u64,
    last_issued: Option<usize>,
}

impl Blocked {
    /// Creates the blocked policy with the given context-switch penalty.
    pub fn new(penalty: u64) -> Self {
        Self {
            penalty,
            last_issued: None,
        }
    }

    /// The thread that issued most recently, if any has.
    pub fn last_issued(&self) -> Option<usize> {
        self.last_issued
    }
}

impl SwitchPolicy for Blocked {
    fn before_issue(&mut self, candidate: usize, threads: &mut [Thread], stats: &mut RunStats) {
        let switching = self
            .last_issued
            .is_some_and(|last| last != candidate);
        if !switching {
            return;
        }

        debug!(
            from = self.last_issued,
            to = candidate,
            penalty = self.penalty,
            "context switch"
        );
        stats.context_switches += 1;

        // Penalty cycles are whole machine cycles: every thread ticks once
        // per cycle (stalled threads keep making latency progress, the
        // candidate stays ready) and nobody issues.
        for _ in 0..self.penalty {
            for thread in threads.iter_mut() {
                let _ = thread.tick();
            }
            stats.penalty_cycles += 1;
            stats.cycles += 1;
        }
    }

    fn next_cursor(&mut self, issued: usize, _thread_count: usize) -> usize {
        self.last_issued = Some(issued);
        issued
    }
}
