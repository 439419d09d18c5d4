//! Multithreaded-core simulator library.
//!
//! This crate models the cycle-by-cycle behavior of a single-issue,
//! multi-threaded processor core under two competing hardware
//! multithreading disciplines, and reports the resulting CPI and final
//! register state of every thread. It provides:
//! 1. **Threads:** Per-thread register files, program counters, and the
//!    ready/stalled/halted state machine.
//! 2. **Scheduling:** Blocked multithreading (switch on stall, fixed
//!    penalty) and fine-grained multithreading (free round-robin), built
//!    on one shared rotation scan.
//! 3. **Memory:** Narrow instruction- and data-memory collaborator traits
//!    with in-crate stream and sparse-store implementations.
//! 4. **Simulation:** A top-level driver running both policies over one
//!    image, a text-image loader, and run statistics.
//!
//! # Examples
//!
//! ```
//! use mtsim_core::config::SimConfig;
//! use mtsim_core::sim::loader;
//! use mtsim_core::{Policy, Simulator};
//!
//! let image = loader::parse_image(
//!     "
//!     .load_latency 2
//!     .thread 0
//!         LOAD $1, $0, 0x10
//!         ADDI $2, $1, 1
//!         HALT
//!     .data
//!         0x10 41
//!     ",
//!     SimConfig::default(),
//! )
//! .unwrap();
//!
//! let mut sim = Simulator::new(image.config, image.program, image.data).unwrap();
//! let stats = sim.run_finegrained();
//! assert_eq!(stats.instructions_retired, 2);
//! assert_eq!(sim.thread_context(Policy::FineGrained, 0).unwrap().read(2), 42);
//! ```

/// Common types (registers, policies, errors, constants).
pub mod common;
/// Simulator configuration (defaults, validation, JSON).
pub mod config;
/// Cycle engine (ALU, threads, schedulers).
pub mod core;
/// Instruction set (opcodes, operands, formatting).
pub mod isa;
/// Memory collaborators (traits, program image, sparse store).
pub mod mem;
/// Simulation driving (top-level simulator, image loader).
pub mod sim;
/// Run statistics and CPI.
pub mod stats;

/// Scheduling-discipline identifier; selects which run's results to query.
pub use crate::common::Policy;
/// Simulator-wide error type.
pub use crate::common::SimError;
/// Per-run machine configuration.
pub use crate::config::SimConfig;
/// Top-level simulator; drives both policies over one program image.
pub use crate::sim::simulator::Simulator;
