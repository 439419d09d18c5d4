//! Configuration unit tests.

use mtsim_core::SimError;
use mtsim_core::config::SimConfig;

#[test]
fn default_values() {
    let config = SimConfig::default();
    assert_eq!(config.threads, 1);
    assert_eq!(config.load_latency, 4);
    assert_eq!(config.store_latency, 4);
    assert_eq!(config.switch_penalty, 1);
}

#[test]
fn default_validates() {
    assert!(SimConfig::default().validate().is_ok());
}

#[test]
fn zero_threads_rejected() {
    let config = SimConfig {
        threads: 0,
        ..SimConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(SimError::InvalidConfig(_))
    ));
}

#[test]
fn zero_latencies_and_penalty_accepted() {
    let config = SimConfig {
        threads: 1,
        load_latency: 0,
        store_latency: 0,
        switch_penalty: 0,
    };
    assert!(config.validate().is_ok());
}

#[test]
fn from_json_full_document() {
    let config = SimConfig::from_json(
        r#"{ "threads": 4, "load_latency": 2, "store_latency": 3, "switch_penalty": 8 }"#,
    )
    .unwrap();
    assert_eq!(config.threads, 4);
    assert_eq!(config.load_latency, 2);
    assert_eq!(config.store_latency, 3);
    assert_eq!(config.switch_penalty, 8);
}

#[test]
fn from_json_partial_document_uses_defaults() {
    let config = SimConfig::from_json(r#"{ "switch_penalty": 16 }"#).unwrap();
    assert_eq!(config.threads, 1);
    assert_eq!(config.load_latency, 4);
    assert_eq!(config.store_latency, 4);
    assert_eq!(config.switch_penalty, 16);
}

#[test]
fn from_json_rejects_malformed_document() {
    assert!(matches!(
        SimConfig::from_json("{ not json"),
        Err(SimError::InvalidConfig(_))
    ));
}

#[test]
fn from_json_rejects_zero_threads() {
    assert!(matches!(
        SimConfig::from_json(r#"{ "threads": 0 }"#),
        Err(SimError::InvalidConfig(_))
    ));
}
