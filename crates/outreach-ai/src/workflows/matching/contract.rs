use super::domain::ScoringContext;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Tolerance for the registered-weight sum check.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Output of one provider invocation. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// Relevance score, clamped to 0-100.
    pub score: f64,
    /// How much data backed the score, clamped to 0.0-1.0.
    pub confidence: f64,
    /// Short human-readable notes explaining the score.
    pub evidence: Vec<String>,
    /// Opaque structured payload for audit/storage and flag derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    /// Non-fatal failure note; set when the score was synthesized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignalResult {
    pub fn scored(score: f64, confidence: f64) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            confidence: confidence.clamp(0.0, 1.0),
            evidence: Vec::new(),
            detail: None,
            error: None,
        }
    }

    /// "No data" is a true zero with zero confidence, never a baseline
    /// score. Unknown-ness travels in the confidence channel.
    pub fn no_data(note: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            confidence: 0.0,
            evidence: vec![note.into()],
            detail: None,
            error: None,
        }
    }

    /// Synthesized result for a provider that timed out or failed.
    pub fn unavailable(note: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            confidence: 0.0,
            evidence: vec![note.into()],
            detail: None,
            error: Some(error.into()),
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// One pluggable signal. Implementations may perform arbitrary I/O inside
/// `evaluate`; the orchestrator bounds them with a timeout either way.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Stable name, used as the component key in composite scores.
    fn name(&self) -> &'static str;

    /// Fixed share of the composite score. All registered weights must sum
    /// to 1.0.
    fn weight(&self) -> f64;

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult;
}

/// Fixed, ordered provider set. Validated once at startup and read-only
/// afterwards, so concurrent evaluations can share it freely.
#[derive(Clone)]
pub struct SignalRegistry {
    providers: Arc<Vec<Arc<dyn SignalProvider>>>,
}

impl SignalRegistry {
    pub fn new(providers: Vec<Arc<dyn SignalProvider>>) -> Result<Self, RegistryError> {
        if providers.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = BTreeSet::new();
        for provider in &providers {
            if !seen.insert(provider.name()) {
                return Err(RegistryError::DuplicateName {
                    name: provider.name(),
                });
            }
            let weight = provider.weight();
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(RegistryError::InvalidWeight {
                    name: provider.name(),
                    weight,
                });
            }
        }

        let total: f64 = providers.iter().map(|provider| provider.weight()).sum();
        if (total - 1.0).abs() > WEIGHT_EPSILON {
            return Err(RegistryError::WeightSum { total });
        }

        Ok(Self {
            providers: Arc::new(providers),
        })
    }

    pub fn providers(&self) -> &[Arc<dyn SignalProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn weight_of(&self, name: &str) -> Option<f64> {
        self.providers
            .iter()
            .find(|provider| provider.name() == name)
            .map(|provider| provider.weight())
    }
}

impl std::fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.providers
                    .iter()
                    .map(|provider| (provider.name(), provider.weight())),
            )
            .finish()
    }
}

/// Registry misconfiguration. Fatal at startup: a bad weight table makes
/// every composite score definitionally wrong.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("signal registry must contain at least one provider")]
    Empty,
    #[error("duplicate provider name '{name}' in signal registry")]
    DuplicateName { name: &'static str },
    #[error("provider '{name}' has weight {weight}; weights must be in (0, 1]")]
    InvalidWeight { name: &'static str, weight: f64 },
    #[error("provider weights sum to {total}, expected 1.0 +/- {WEIGHT_EPSILON}")]
    WeightSum { total: f64 },
}
