use super::skill_matches;
use crate::workflows::matching::contract::{SignalProvider, SignalResult};
use crate::workflows::matching::domain::{JobPostingHint, ScoringContext};
use async_trait::async_trait;
use serde_json::json;

/// Tuning for the hiring-activity signal. Windows are in days relative to
/// the request's `today`.
#[derive(Debug, Clone)]
pub struct MarketActivityConfig {
    pub lookback_days: i64,
    pub fresh_days: i64,
}

impl Default for MarketActivityConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            fresh_days: 30,
        }
    }
}

/// Scores hiring momentum from the candidate's recent job postings.
pub struct MarketActivityProvider {
    weight: f64,
    config: MarketActivityConfig,
}

impl MarketActivityProvider {
    pub const NAME: &'static str = "market_activity";
    pub const DEFAULT_WEIGHT: f64 = 0.30;

    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight,
            config: MarketActivityConfig::default(),
        }
    }

    pub fn with_config(weight: f64, config: MarketActivityConfig) -> Self {
        Self { weight, config }
    }
}

impl Default for MarketActivityProvider {
    fn default() -> Self {
        Self::with_weight(Self::DEFAULT_WEIGHT)
    }
}

#[async_trait]
impl SignalProvider for MarketActivityProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        score_market_activity(context, &self.config)
    }
}

const VOLUME_POINTS: f64 = 60.0;
const VOLUME_SATURATION: usize = 10;
const RELEVANCE_POINTS: f64 = 25.0;
const RELEVANCE_SATURATION: usize = 5;
const FRESHNESS_BONUS: f64 = 15.0;

pub(crate) fn score_market_activity(
    context: &ScoringContext,
    config: &MarketActivityConfig,
) -> SignalResult {
    let postings = &context.candidate.hints.postings;
    if postings.is_empty() {
        return SignalResult::no_data("no job posting data for organization");
    }

    let in_window: Vec<&JobPostingHint> = postings
        .iter()
        .filter(|posting| context.days_since(posting.posted_on) <= config.lookback_days)
        .collect();

    if in_window.is_empty() {
        // Postings exist but all predate the window; weak-but-known signal.
        return SignalResult::scored(0.0, 0.4)
            .with_evidence(vec![format!(
                "no postings within the last {} days",
                config.lookback_days
            )])
            .with_detail(json!({ "recent_postings": 0, "relevant_postings": 0 }));
    }

    let relevant = in_window
        .iter()
        .filter(|posting| posting_mentions_required(posting, &context.request.required_skills))
        .count();
    let fresh = in_window
        .iter()
        .any(|posting| context.days_since(posting.posted_on) <= config.fresh_days);

    let volume =
        VOLUME_POINTS * (in_window.len().min(VOLUME_SATURATION) as f64 / VOLUME_SATURATION as f64);
    let relevance = RELEVANCE_POINTS
        * (relevant.min(RELEVANCE_SATURATION) as f64 / RELEVANCE_SATURATION as f64);
    let mut score = volume + relevance;

    let mut evidence = vec![format!(
        "{} posting(s) within the last {} days",
        in_window.len(),
        config.lookback_days
    )];
    if relevant > 0 {
        evidence.push(format!("{relevant} posting(s) mention required skills"));
    }
    if fresh {
        score += FRESHNESS_BONUS;
        evidence.push(format!(
            "hiring activity within the last {} days",
            config.fresh_days
        ));
    }

    let confidence = activity_confidence(in_window.len());

    SignalResult::scored(score, confidence)
        .with_evidence(evidence)
        .with_detail(json!({
            "recent_postings": in_window.len(),
            "relevant_postings": relevant,
        }))
}

fn posting_mentions_required(posting: &JobPostingHint, required: &[String]) -> bool {
    required.iter().any(|skill| {
        skill_matches(skill, &posting.title)
            || posting
                .skills
                .iter()
                .any(|mention| skill_matches(skill, mention))
    })
}

fn activity_confidence(recent: usize) -> f64 {
    (0.4 + recent as f64 * 0.1).min(1.0)
}
