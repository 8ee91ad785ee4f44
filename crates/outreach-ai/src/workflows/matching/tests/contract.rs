use super::common::StaticProvider;
use crate::workflows::matching::contract::{
    RegistryError, SignalProvider, SignalRegistry, SignalResult,
};
use crate::workflows::matching::providers::standard_registry;
use std::sync::Arc;

fn provider(name: &'static str, weight: f64) -> Arc<dyn SignalProvider> {
    Arc::new(StaticProvider {
        name,
        weight,
        score: 50.0,
        confidence: 0.5,
    })
}

#[test]
fn registry_accepts_weights_summing_to_one() {
    let registry = SignalRegistry::new(vec![provider("a", 0.6), provider("b", 0.4)])
        .expect("valid weight table");
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.weight_of("a"), Some(0.6));
    assert_eq!(registry.weight_of("missing"), None);
}

#[test]
fn registry_rejects_weight_sum_mismatch() {
    let err = SignalRegistry::new(vec![provider("a", 0.6), provider("b", 0.3)])
        .expect_err("0.9 total rejected");
    assert!(matches!(err, RegistryError::WeightSum { .. }));
}

#[test]
fn registry_tolerates_epsilon_rounding() {
    // Three thirds never sum to exactly 1.0 in floating point.
    let third = 1.0 / 3.0;
    SignalRegistry::new(vec![
        provider("a", third),
        provider("b", third),
        provider("c", third),
    ])
    .expect("within epsilon of 1.0");
}

#[test]
fn registry_rejects_empty_provider_set() {
    let err = SignalRegistry::new(Vec::new()).expect_err("empty set rejected");
    assert_eq!(err, RegistryError::Empty);
}

#[test]
fn registry_rejects_duplicate_names() {
    let err = SignalRegistry::new(vec![provider("dup", 0.5), provider("dup", 0.5)])
        .expect_err("duplicate rejected");
    assert!(matches!(err, RegistryError::DuplicateName { name: "dup" }));
}

#[test]
fn registry_rejects_out_of_range_weight() {
    let err = SignalRegistry::new(vec![provider("a", 1.2)]).expect_err("weight > 1 rejected");
    assert!(matches!(err, RegistryError::InvalidWeight { .. }));
}

#[test]
fn standard_registry_is_valid() {
    let registry = standard_registry().expect("production weights sum to 1.0");
    assert_eq!(registry.len(), 4);
}

#[test]
fn signal_result_clamps_score_and_confidence() {
    let high = SignalResult::scored(150.0, 2.0);
    assert_eq!(high.score, 100.0);
    assert_eq!(high.confidence, 1.0);

    let low = SignalResult::scored(-20.0, -0.5);
    assert_eq!(low.score, 0.0);
    assert_eq!(low.confidence, 0.0);
}

#[test]
fn unavailable_result_is_zero_with_error() {
    let result = SignalResult::unavailable("signal unavailable", "timed out");
    assert_eq!(result.score, 0.0);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.evidence, vec!["signal unavailable".to_string()]);
    assert_eq!(result.error.as_deref(), Some("timed out"));
}
