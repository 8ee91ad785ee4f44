use super::composite::CompositeScore;
use super::domain::{OrganizationCandidate, OrganizationId};
use super::MatchConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two-tier threshold policy guaranteeing a bounded, non-empty result set
/// whenever any scored candidates exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub min_score_threshold: f64,
    pub fallback_score_threshold: f64,
    pub min_results: usize,
    pub max_results: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: 50.0,
            fallback_score_threshold: 30.0,
            min_results: 3,
            max_results: 10,
        }
    }
}

impl FallbackConfig {
    pub fn validate(&self) -> Result<(), MatchConfigError> {
        if self.fallback_score_threshold > self.min_score_threshold {
            return Err(MatchConfigError::ThresholdOrder {
                fallback: self.fallback_score_threshold,
                min: self.min_score_threshold,
            });
        }
        if self.min_results > self.max_results {
            return Err(MatchConfigError::ResultBounds {
                min: self.min_results,
                max: self.max_results,
            });
        }
        Ok(())
    }
}

/// Orders scored candidates best-first and applies the threshold ladder:
/// primary cutoff, then the fallback cutoff, then top-N regardless of
/// absolute score. Candidates without a score entry are dropped; ties keep
/// input order; the result never exceeds `max_results`.
pub fn select_top_candidates(
    candidates: &[OrganizationCandidate],
    scores: &BTreeMap<OrganizationId, CompositeScore>,
    config: &FallbackConfig,
) -> Vec<OrganizationCandidate> {
    let mut pool: Vec<(&OrganizationCandidate, u8)> = candidates
        .iter()
        .filter_map(|candidate| {
            scores
                .get(&candidate.id)
                .map(|score| (candidate, score.overall))
        })
        .collect();

    // Stable sort keeps input order among equal scores.
    pool.sort_by(|a, b| b.1.cmp(&a.1));

    let above = |threshold: f64| -> Vec<&OrganizationCandidate> {
        pool.iter()
            .filter(|(_, overall)| f64::from(*overall) >= threshold)
            .map(|(candidate, _)| *candidate)
            .collect()
    };

    let primary = above(config.min_score_threshold);
    let selected = if primary.len() >= config.min_results || pool.is_empty() {
        primary
    } else {
        let relaxed = above(config.fallback_score_threshold);
        if relaxed.len() >= config.min_results {
            relaxed
        } else {
            // Last rung: never return nothing just because scores are low.
            pool.iter()
                .take(config.min_results)
                .map(|(candidate, _)| *candidate)
                .collect()
        }
    };

    selected
        .into_iter()
        .take(config.max_results)
        .cloned()
        .collect()
}
