//! Config/simulator constructors and tracing setup.

use mtsim_core::Simulator;
use mtsim_core::config::SimConfig;
use mtsim_core::isa::Instruction;
use mtsim_core::mem::{ProgramImage, SparseMemory};

/// Installs a tracing subscriber for the test binary, once.
pub fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a configuration with every field explicit.
pub fn config(threads: usize, load_latency: u64, store_latency: u64, switch_penalty: u64) -> SimConfig {
    SimConfig {
        threads,
        load_latency,
        store_latency,
        switch_penalty,
    }
}

/// Builds a simulator over per-thread streams with an empty data memory.
///
/// # Panics
///
/// Panics if the configuration is invalid; tests using this helper supply
/// valid configurations.
pub fn simulator(streams: Vec<Vec<Instruction>>, config: SimConfig) -> Simulator {
    trace_init();
    match Simulator::new(config, ProgramImage::with_streams(streams), SparseMemory::new()) {
        Ok(sim) => sim,
        Err(e) => panic!("test configuration rejected: {e}"),
    }
}
