//! Simulator configuration.
//!
//! This module defines the per-run configuration of the modeled core. It
//! provides:
//! 1. **Defaults:** Baseline machine parameters as named constants.
//! 2. **Structure:** [`SimConfig`], the values the configuration provider
//!    supplies once per run.
//! 3. **Validation:** Rejection of unusable configurations before a run
//!    starts.
//!
//! Configuration can be deserialized from JSON, filled in from image-file
//! directives by the loader, or built with [`SimConfig::default`].

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Default configuration constants for the simulator.
///
/// These values apply when neither an image directive nor an explicit
/// override supplies a parameter.
mod defaults {
    /// Default number of hardware threads.
    pub const THREADS: usize = 1;

    /// Default extra latency of a `LOAD`, in cycles.
    ///
    /// The issuing cycle itself is not included: a latency of 4 means the
    /// thread is stalled for the 4 cycles following the issue.
    pub const LOAD_LATENCY: u64 = 4;

    /// Default extra latency of a `STORE`, in cycles.
    pub const STORE_LATENCY: u64 = 4;

    /// Default context-switch penalty of the blocked policy, in cycles.
    pub const SWITCH_PENALTY: u64 = 1;
}

/// Per-run machine configuration.
///
/// All values are fixed for the duration of one run. The same configuration
/// drives both policy runs of a [`Simulator`](crate::sim::simulator::Simulator),
/// except that the switch penalty only matters to the blocked policy.
///
/// # Examples
///
/// Deserializing from JSON; omitted fields take their defaults:
///
/// ```
/// use mtsim_core::config::SimConfig;
///
/// let config = SimConfig::from_json(r#"{ "threads": 2, "load_latency": 3 }"#).unwrap();
/// assert_eq!(config.threads, 2);
/// assert_eq!(config.load_latency, 3);
/// assert_eq!(config.store_latency, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total number of hardware threads; must be at least 1.
    #[serde(default = "SimConfig::default_threads")]
    pub threads: usize,

    /// Cycles a thread stays stalled after issuing a `LOAD`.
    #[serde(default = "SimConfig::default_load_latency")]
    pub load_latency: u64,

    /// Cycles a thread stays stalled after issuing a `STORE`.
    #[serde(default = "SimConfig::default_store_latency")]
    pub store_latency: u64,

    /// All-threads-idle cycles the blocked policy pays on a thread switch.
    #[serde(default = "SimConfig::default_switch_penalty")]
    pub switch_penalty: u64,
}

impl SimConfig {
    fn default_threads() -> usize {
        defaults::THREADS
    }

    fn default_load_latency() -> u64 {
        defaults::LOAD_LATENCY
    }

    fn default_store_latency() -> u64 {
        defaults::STORE_LATENCY
    }

    fn default_switch_penalty() -> u64 {
        defaults::SWITCH_PENALTY
    }

    /// Parses a configuration from a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the document does not parse
    /// or the parsed configuration fails [`SimConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can drive a run.
    ///
    /// Latencies and the switch penalty may be zero (a zero-latency memory
    /// or free context switch is a legitimate machine to model); only the
    /// thread count has a hard lower bound.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the thread count is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.threads == 0 {
            return Err(SimError::InvalidConfig(
                "thread count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            threads: defaults::THREADS,
            load_latency: defaults::LOAD_LATENCY,
            store_latency: defaults::STORE_LATENCY,
            switch_penalty: defaults::SWITCH_PENALTY,
        }
    }
}
