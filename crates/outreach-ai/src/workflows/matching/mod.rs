//! Signal-driven candidate matching.
//!
//! A registry of weighted signal providers is fanned out per candidate with
//! per-provider and per-candidate deadlines, combined into a weighted
//! composite score, batched with pacing between chunks, and finally ranked
//! through a two-tier threshold ladder that degrades gracefully when data
//! is sparse.

pub mod batch;
pub mod cache;
pub mod composite;
pub mod contract;
pub mod domain;
pub mod orchestrator;
pub mod providers;
pub mod selector;

#[cfg(test)]
mod tests;

pub use batch::{evaluate_batch, BatchConfig};
pub use cache::TtlCache;
pub use composite::{combine, CompositeScore, ConfidenceTier, FlagThresholds, SignalFlags};
pub use contract::{RegistryError, SignalProvider, SignalRegistry, SignalResult, WEIGHT_EPSILON};
pub use domain::{
    CandidateHints, ContactRecord, ContactSeniority, JobPostingHint, MatchRequest,
    OrganizationCandidate, OrganizationId, RelationshipKind, RelationshipRecord, ScoringContext,
};
pub use orchestrator::{evaluate_candidate, TimeoutBudget};
pub use selector::{select_top_candidates, FallbackConfig};

use crate::config::MatchingRuntimeConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything tunable about one engine instance.
#[derive(Debug, Clone, Default)]
pub struct MatchSettings {
    pub timeouts: TimeoutBudget,
    pub batch: BatchConfig,
    pub thresholds: FlagThresholds,
    pub fallback: FallbackConfig,
}

impl MatchSettings {
    /// Bridge from the env-driven application configuration.
    pub fn from_runtime(runtime: &MatchingRuntimeConfig) -> Self {
        Self {
            timeouts: TimeoutBudget {
                per_provider: runtime.provider_timeout,
                per_candidate: runtime.candidate_timeout,
            },
            batch: BatchConfig {
                chunk_size: runtime.chunk_size,
                chunk_pause: runtime.chunk_pause,
            },
            thresholds: FlagThresholds::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

/// Invalid engine configuration. Fatal at startup; a per-request override
/// that trips it is rejected back to the caller instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchConfigError {
    #[error("fallback_score_threshold {fallback} must not exceed min_score_threshold {min}")]
    ThresholdOrder { fallback: f64, min: f64 },
    #[error("min_results {min} must not exceed max_results {max}")]
    ResultBounds { min: usize, max: usize },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Ranked subset plus the full audit map; persisting the map is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub ranked: Vec<OrganizationCandidate>,
    pub scores: BTreeMap<OrganizationId, CompositeScore>,
}

/// Facade composing the registry, batch processor, and selector behind the
/// one inbound call collaborators use.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    registry: SignalRegistry,
    settings: MatchSettings,
}

impl MatchingEngine {
    /// The single startup validation point: the registry has already
    /// checked its weight table, this checks the fallback invariants.
    pub fn new(registry: SignalRegistry, settings: MatchSettings) -> Result<Self, MatchConfigError> {
        settings.fallback.validate()?;
        Ok(Self { registry, settings })
    }

    /// Engine over the standard four-provider registry.
    pub fn standard(settings: MatchSettings) -> Result<Self, MatchConfigError> {
        Self::new(providers::standard_registry()?, settings)
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// Score and rank `candidates` against `request`. An override replaces
    /// the configured fallback policy for this call only.
    pub async fn rank(
        &self,
        request: MatchRequest,
        candidates: Vec<OrganizationCandidate>,
        fallback_override: Option<FallbackConfig>,
    ) -> Result<MatchOutcome, MatchConfigError> {
        self.rank_with_cancellation(
            request,
            candidates,
            fallback_override,
            &CancellationToken::new(),
        )
        .await
    }

    pub async fn rank_with_cancellation(
        &self,
        request: MatchRequest,
        candidates: Vec<OrganizationCandidate>,
        fallback_override: Option<FallbackConfig>,
        cancel: &CancellationToken,
    ) -> Result<MatchOutcome, MatchConfigError> {
        let fallback = match fallback_override {
            Some(config) => {
                config.validate()?;
                config
            }
            None => self.settings.fallback.clone(),
        };

        let request = Arc::new(request);
        let scores = evaluate_batch(
            candidates.clone(),
            request,
            self.registry.clone(),
            &self.settings.batch,
            &self.settings.timeouts,
            &self.settings.thresholds,
            cancel,
        )
        .await;

        let ranked = select_top_candidates(&candidates, &scores, &fallback);
        Ok(MatchOutcome { ranked, scores })
    }
}
