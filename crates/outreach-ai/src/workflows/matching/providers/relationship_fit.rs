use crate::workflows::matching::contract::{SignalProvider, SignalResult};
use crate::workflows::matching::domain::{RelationshipKind, ScoringContext};
use async_trait::async_trait;

/// Scores how warm the door already is: prior placements beat partnerships
/// beat alumni ties beat a single event conversation.
pub struct RelationshipFitProvider {
    weight: f64,
}

impl RelationshipFitProvider {
    pub const NAME: &'static str = "relationship_fit";
    pub const DEFAULT_WEIGHT: f64 = 0.20;

    pub fn with_weight(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for RelationshipFitProvider {
    fn default() -> Self {
        Self::with_weight(Self::DEFAULT_WEIGHT)
    }
}

#[async_trait]
impl SignalProvider for RelationshipFitProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        score_relationship_fit(context)
    }
}

const RECENT_DAYS: i64 = 180;
const STALE_DAYS: i64 = 365;
const BREADTH_POINTS: f64 = 4.0;
const BREADTH_SATURATION: usize = 5;

fn kind_base(kind: RelationshipKind) -> (f64, &'static str) {
    match kind {
        RelationshipKind::PriorPlacement => (50.0, "prior graduate placement"),
        RelationshipKind::Partnership => (40.0, "active partnership"),
        RelationshipKind::AlumniEmployee => (25.0, "alumni on staff"),
        RelationshipKind::EventContact => (10.0, "met at an event"),
    }
}

pub(crate) fn score_relationship_fit(context: &ScoringContext) -> SignalResult {
    let records = &context.candidate.hints.relationships;
    if records.is_empty() {
        return SignalResult::no_data("no relationship history with organization");
    }

    let (base, strongest_label) = records
        .iter()
        .map(|record| kind_base(record.kind))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, "none"));

    let newest_age = records
        .iter()
        .map(|record| context.days_since(record.last_interaction))
        .min()
        .unwrap_or(i64::MAX);

    let (recency_points, recency_note) = if newest_age <= RECENT_DAYS {
        (20.0, format!("last interaction {newest_age} days ago"))
    } else if newest_age <= STALE_DAYS {
        (10.0, format!("last interaction {newest_age} days ago"))
    } else {
        (
            0.0,
            format!("relationship dormant for {newest_age} days"),
        )
    };

    let breadth = BREADTH_POINTS * records.len().min(BREADTH_SATURATION) as f64;
    let score = base + recency_points + breadth;

    let evidence = vec![
        format!("strongest tie: {strongest_label}"),
        recency_note,
        format!("{} relationship record(s) on file", records.len()),
    ];

    let confidence = if newest_age <= STALE_DAYS { 0.9 } else { 0.6 };

    SignalResult::scored(score, confidence).with_evidence(evidence)
}
