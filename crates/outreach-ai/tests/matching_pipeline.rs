//! End-to-end pipeline behavior with handcrafted providers: weighted
//! aggregation, timeout isolation, and the fallback ladder through the
//! public engine API.

use async_trait::async_trait;
use chrono::NaiveDate;
use outreach_ai::workflows::matching::{
    BatchConfig, CandidateHints, ConfidenceTier, FallbackConfig, MatchRequest, MatchSettings,
    MatchingEngine, OrganizationCandidate, OrganizationId, ScoringContext, SignalProvider,
    SignalRegistry, SignalResult, TimeoutBudget,
};
use std::sync::Arc;
use std::time::Duration;

/// Scores 90/0.9 for candidate 1 and 40/0.5 for candidate 2.
struct ProfileFit;

#[async_trait]
impl SignalProvider for ProfileFit {
    fn name(&self) -> &'static str {
        "profile_fit"
    }

    fn weight(&self) -> f64 {
        0.6
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        match context.candidate.id.0.as_str() {
            "org-1" => SignalResult::scored(90.0, 0.9),
            _ => SignalResult::scored(40.0, 0.5),
        }
    }
}

/// Scores 70/0.8 for candidate 1 and hangs forever for candidate 2.
struct PostingActivity;

#[async_trait]
impl SignalProvider for PostingActivity {
    fn name(&self) -> &'static str {
        "posting_activity"
    }

    fn weight(&self) -> f64 {
        0.4
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        if context.candidate.id.0 == "org-1" {
            SignalResult::scored(70.0, 0.8)
        } else {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            SignalResult::scored(100.0, 1.0)
        }
    }
}

fn engineering_request() -> MatchRequest {
    MatchRequest {
        required_skills: vec!["Python".to_string(), "SQL".to_string()],
        domain: "engineering".to_string(),
        today: NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date"),
    }
}

fn org(id: &str) -> OrganizationCandidate {
    OrganizationCandidate {
        id: OrganizationId(id.to_string()),
        name: id.to_string(),
        domain: "engineering".to_string(),
        technologies: Vec::new(),
        headcount: None,
        hints: CandidateHints::default(),
    }
}

fn fast_settings() -> MatchSettings {
    MatchSettings {
        timeouts: TimeoutBudget {
            per_provider: Duration::from_millis(100),
            per_candidate: Duration::from_secs(5),
        },
        batch: BatchConfig {
            chunk_size: 5,
            chunk_pause: Duration::ZERO,
        },
        ..MatchSettings::default()
    }
}

fn two_signal_engine() -> MatchingEngine {
    let registry = SignalRegistry::new(vec![
        Arc::new(ProfileFit) as Arc<dyn SignalProvider>,
        Arc::new(PostingActivity),
    ])
    .expect("weights sum to 1.0");
    MatchingEngine::new(registry, fast_settings()).expect("valid settings")
}

#[tokio::test(start_paused = true)]
async fn ranks_two_candidates_with_one_timed_out_signal() {
    let engine = two_signal_engine();

    let outcome = engine
        .rank(engineering_request(), vec![org("org-1"), org("org-2")], None)
        .await
        .expect("rank succeeds");

    let first = &outcome.scores[&OrganizationId("org-1".to_string())];
    // round(90 * 0.6 + 70 * 0.4) with mean confidence 0.85.
    assert_eq!(first.overall, 82);
    assert_eq!(first.confidence, ConfidenceTier::High);
    assert!(first.errors.is_empty());

    let second = &outcome.scores[&OrganizationId("org-2".to_string())];
    // round(40 * 0.6 + 0 * 0.4); mean confidence (0.5 + 0) / 2 = 0.25.
    assert_eq!(second.overall, 24);
    assert_eq!(second.confidence, ConfidenceTier::Low);
    assert_eq!(second.components["posting_activity"], 0.0);
    assert_eq!(second.errors.len(), 1);
    assert!(second.errors[0].contains("posting_activity"));

    // 24 misses both thresholds, but min_results keeps the candidate in.
    let ranked_ids: Vec<_> = outcome.ranked.iter().map(|c| c.id.0.as_str()).collect();
    assert_eq!(ranked_ids, vec!["org-1", "org-2"]);
}

#[tokio::test(start_paused = true)]
async fn per_call_fallback_override_is_applied() {
    let engine = two_signal_engine();
    let strict = FallbackConfig {
        min_score_threshold: 80.0,
        fallback_score_threshold: 80.0,
        min_results: 1,
        max_results: 1,
    };

    let outcome = engine
        .rank(
            engineering_request(),
            vec![org("org-1"), org("org-2")],
            Some(strict),
        )
        .await
        .expect("rank succeeds");

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.ranked[0].id.0, "org-1");
    // The audit map still covers everything evaluated.
    assert_eq!(outcome.scores.len(), 2);
}

#[tokio::test]
async fn invalid_fallback_override_is_rejected() {
    let engine = two_signal_engine();
    let inverted = FallbackConfig {
        min_score_threshold: 30.0,
        fallback_score_threshold: 50.0,
        min_results: 1,
        max_results: 5,
    };

    let err = engine
        .rank(engineering_request(), vec![org("org-1")], Some(inverted))
        .await
        .expect_err("inverted thresholds rejected");
    assert!(err.to_string().contains("fallback_score_threshold"));
}

#[tokio::test(start_paused = true)]
async fn empty_candidate_set_yields_empty_outcome() {
    let engine = two_signal_engine();

    let outcome = engine
        .rank(engineering_request(), Vec::new(), None)
        .await
        .expect("rank succeeds");

    assert!(outcome.ranked.is_empty());
    assert!(outcome.scores.is_empty());
}
