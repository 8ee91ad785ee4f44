use crate::workflows::matching::contract::{SignalProvider, SignalResult};
use crate::workflows::matching::domain::{
    CandidateHints, MatchRequest, OrganizationCandidate, OrganizationId, ScoringContext,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

pub(super) fn sample_request() -> MatchRequest {
    MatchRequest {
        required_skills: vec!["Python".to_string(), "SQL".to_string()],
        domain: "engineering".to_string(),
        today: today(),
    }
}

pub(super) fn candidate(id: &str) -> OrganizationCandidate {
    OrganizationCandidate {
        id: OrganizationId(id.to_string()),
        name: format!("org {id}"),
        domain: "engineering".to_string(),
        technologies: Vec::new(),
        headcount: None,
        hints: CandidateHints::default(),
    }
}

pub(super) fn context_for(candidate: OrganizationCandidate) -> Arc<ScoringContext> {
    Arc::new(ScoringContext::new(Arc::new(sample_request()), candidate))
}

/// Provider returning a fixed result, for arithmetic-focused tests.
pub(super) struct StaticProvider {
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
    pub confidence: f64,
}

#[async_trait]
impl SignalProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, _context: &ScoringContext) -> SignalResult {
        SignalResult::scored(self.score, self.confidence)
    }
}

/// Provider that sleeps before answering, for timeout tests.
pub(super) struct SlowProvider {
    pub name: &'static str,
    pub weight: f64,
    pub delay: Duration,
    pub score: f64,
}

#[async_trait]
impl SignalProvider for SlowProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, _context: &ScoringContext) -> SignalResult {
        tokio::time::sleep(self.delay).await;
        SignalResult::scored(self.score, 0.9)
    }
}

/// Provider that panics for one specific organization, for isolation tests.
pub(super) struct PanicsFor {
    pub name: &'static str,
    pub weight: f64,
    pub target: &'static str,
    pub score: f64,
}

#[async_trait]
impl SignalProvider for PanicsFor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        if context.candidate.id.0 == self.target {
            panic!("provider blew up on {}", self.target);
        }
        SignalResult::scored(self.score, 0.8)
    }
}
