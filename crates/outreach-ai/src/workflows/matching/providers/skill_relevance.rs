use super::{domain_aligns, skill_matches};
use crate::workflows::matching::contract::{SignalProvider, SignalResult};
use crate::workflows::matching::domain::ScoringContext;
use async_trait::async_trait;

/// Scores how well the organization's known stack covers the required
/// skills, with bonuses for domain alignment and posting-level evidence.
pub struct SkillRelevanceProvider {
    weight: f64,
}

impl SkillRelevanceProvider {
    pub const NAME: &'static str = "skill_relevance";
    pub const DEFAULT_WEIGHT: f64 = 0.35;

    pub fn with_weight(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for SkillRelevanceProvider {
    fn default() -> Self {
        Self::with_weight(Self::DEFAULT_WEIGHT)
    }
}

#[async_trait]
impl SignalProvider for SkillRelevanceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        score_skill_relevance(context)
    }
}

const MATCH_POINTS: f64 = 70.0;
const DOMAIN_BONUS: f64 = 15.0;
const POSTING_BONUS: f64 = 15.0;

pub(crate) fn score_skill_relevance(context: &ScoringContext) -> SignalResult {
    let candidate = &context.candidate;
    let required = &context.request.required_skills;

    if candidate.technologies.is_empty() && candidate.hints.postings.is_empty() {
        return SignalResult::no_data("no technology or posting data for organization");
    }
    if required.is_empty() {
        return SignalResult::no_data("request lists no required skills");
    }

    let mut matched: Vec<&str> = Vec::new();
    let mut posting_backed = 0usize;

    for skill in required {
        let in_stack = candidate
            .technologies
            .iter()
            .any(|known| skill_matches(skill, known));
        let in_postings = candidate.hints.postings.iter().any(|posting| {
            skill_matches(skill, &posting.title)
                || posting
                    .skills
                    .iter()
                    .any(|mention| skill_matches(skill, mention))
        });

        if in_stack || in_postings {
            matched.push(skill.as_str());
        }
        if in_postings {
            posting_backed += 1;
        }
    }

    let fraction = matched.len() as f64 / required.len() as f64;
    let mut score = MATCH_POINTS * fraction;
    let mut evidence = vec![format!(
        "matched {}/{} required skills{}",
        matched.len(),
        required.len(),
        if matched.is_empty() {
            String::new()
        } else {
            format!(": {}", matched.join(", "))
        }
    )];

    if domain_aligns(&candidate.domain, &context.request.domain) {
        score += DOMAIN_BONUS;
        evidence.push(format!(
            "organization domain '{}' aligns with requested '{}'",
            candidate.domain, context.request.domain
        ));
    }

    if posting_backed > 0 {
        score += POSTING_BONUS * (posting_backed as f64 / required.len() as f64);
        evidence.push(format!(
            "{posting_backed} required skill(s) appear in live postings"
        ));
    }

    let confidence = relevance_confidence(
        !candidate.technologies.is_empty(),
        !candidate.hints.postings.is_empty(),
        !matched.is_empty(),
    );

    SignalResult::scored(score, confidence).with_evidence(evidence)
}

/// More independent data sources behind the score, more confidence.
fn relevance_confidence(has_stack: bool, has_postings: bool, any_match: bool) -> f64 {
    let mut confidence: f64 = 0.3;
    if has_stack {
        confidence += 0.3;
    }
    if has_postings {
        confidence += 0.3;
    }
    if any_match {
        confidence += 0.1;
    }
    confidence.min(1.0)
}
