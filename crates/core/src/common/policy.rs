//! Scheduling-policy identifiers.

use std::fmt;

/// Identifies one of the two hardware multithreading disciplines.
///
/// A [`Simulator`](crate::sim::simulator::Simulator) drives one independent
/// run per policy; results are queried per policy with this identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Run one thread until it stalls, then pay a fixed penalty to switch.
    Blocked,
    /// Consider switching threads every cycle, with no switch penalty.
    FineGrained,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Blocked => write!(f, "blocked"),
            Policy::FineGrained => write!(f, "fine-grained"),
        }
    }
}
