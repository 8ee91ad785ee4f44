use super::contract::{SignalRegistry, SignalResult};
use super::providers::{
    ContactAccessibilityProvider, MarketActivityProvider, RelationshipFitProvider,
    SkillRelevanceProvider,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregate confidence tier derived from mean per-signal confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// The exact legacy mapping: mean > 0.7 high, > 0.4 medium, else low.
    pub fn from_mean(mean: f64) -> Self {
        if mean > 0.7 {
            Self::High
        } else if mean > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Component-score cutoffs for flag derivation. A configuration surface,
/// deliberately not buried as constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagThresholds {
    pub strong_skill_alignment_min: f64,
    pub active_market_min: f64,
    pub established_relationship_min: f64,
    pub reachable_contact_min: f64,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            strong_skill_alignment_min: 75.0,
            active_market_min: 60.0,
            established_relationship_min: 50.0,
            reachable_contact_min: 55.0,
        }
    }
}

/// Named indicators derived from component scores and provider detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalFlags {
    pub strong_skill_alignment: bool,
    pub active_market: bool,
    pub established_relationship: bool,
    pub reachable_contact: bool,
    /// From the market provider's detail payload, not a score threshold.
    pub actively_hiring: bool,
}

impl SignalFlags {
    fn fired(&self) -> Vec<&'static str> {
        let mut fired = Vec::new();
        if self.strong_skill_alignment {
            fired.push("strong_skill_alignment");
        }
        if self.active_market {
            fired.push("active_market");
        }
        if self.established_relationship {
            fired.push("established_relationship");
        }
        if self.reachable_contact {
            fired.push("reachable_contact");
        }
        if self.actively_hiring {
            fired.push("actively_hiring");
        }
        fired
    }
}

/// Weighted aggregation of all signals for one candidate. Serialized as a
/// flat record so caller-side storage stays stable as providers are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub overall: u8,
    pub confidence: ConfidenceTier,
    /// Raw score per registered provider; missing signals recorded as 0.
    pub components: BTreeMap<String, f64>,
    pub flags: SignalFlags,
    pub breakdown: String,
    pub errors: Vec<String>,
}

impl CompositeScore {
    /// Candidate-level failure record: every component zeroed, one error.
    pub fn failed(registry: &SignalRegistry, error: impl Into<String>) -> Self {
        let components: BTreeMap<String, f64> = registry
            .providers()
            .iter()
            .map(|provider| (provider.name().to_string(), 0.0))
            .collect();
        let flags = SignalFlags::default();
        let breakdown = render_breakdown(&components, registry, &flags);

        Self {
            overall: 0,
            confidence: ConfidenceTier::Low,
            components,
            flags,
            breakdown,
            errors: vec![error.into()],
        }
    }
}

/// Combine per-signal results into one composite score.
///
/// A provider missing from `results` contributes a true zero to both the
/// weighted sum and the confidence mean; absence is never "neutral."
pub fn combine(
    results: &BTreeMap<String, SignalResult>,
    registry: &SignalRegistry,
    thresholds: &FlagThresholds,
) -> CompositeScore {
    let mut components = BTreeMap::new();
    let mut weighted_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut errors = Vec::new();

    for provider in registry.providers() {
        let name = provider.name();
        let (score, confidence) = match results.get(name) {
            Some(result) => {
                if let Some(error) = &result.error {
                    errors.push(error.clone());
                }
                (result.score, result.confidence)
            }
            None => (0.0, 0.0),
        };

        weighted_sum += score * provider.weight();
        confidence_sum += confidence;
        components.insert(name.to_string(), score);
    }

    let overall = weighted_sum.round().clamp(0.0, 100.0) as u8;
    let mean_confidence = confidence_sum / registry.len() as f64;
    let flags = derive_flags(&components, results, thresholds);
    let breakdown = render_breakdown(&components, registry, &flags);

    CompositeScore {
        overall,
        confidence: ConfidenceTier::from_mean(mean_confidence),
        components,
        flags,
        breakdown,
        errors,
    }
}

fn derive_flags(
    components: &BTreeMap<String, f64>,
    results: &BTreeMap<String, SignalResult>,
    thresholds: &FlagThresholds,
) -> SignalFlags {
    let component = |name: &str| components.get(name).copied().unwrap_or(0.0);

    let actively_hiring = results
        .get(MarketActivityProvider::NAME)
        .and_then(|result| result.detail.as_ref())
        .and_then(|detail| detail.get("relevant_postings"))
        .and_then(|value| value.as_u64())
        .map(|relevant| relevant > 0)
        .unwrap_or(false);

    SignalFlags {
        strong_skill_alignment: component(SkillRelevanceProvider::NAME)
            >= thresholds.strong_skill_alignment_min,
        active_market: component(MarketActivityProvider::NAME) >= thresholds.active_market_min,
        established_relationship: component(RelationshipFitProvider::NAME)
            >= thresholds.established_relationship_min,
        reachable_contact: component(ContactAccessibilityProvider::NAME)
            >= thresholds.reachable_contact_min,
        actively_hiring,
    }
}

/// Purely presentational; rebuilt from components and flags alone.
fn render_breakdown(
    components: &BTreeMap<String, f64>,
    registry: &SignalRegistry,
    flags: &SignalFlags,
) -> String {
    let mut breakdown = String::new();
    for provider in registry.providers() {
        let score = components.get(provider.name()).copied().unwrap_or(0.0);
        let _ = writeln!(
            breakdown,
            "{}: {:.1} (weight {:.0}%)",
            provider.name(),
            score,
            provider.weight() * 100.0
        );
    }

    let fired = flags.fired();
    if fired.is_empty() {
        breakdown.push_str("flags: none");
    } else {
        let _ = write!(breakdown, "flags: {}", fired.join(", "));
    }
    breakdown
}
