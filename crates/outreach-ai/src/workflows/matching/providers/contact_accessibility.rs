use crate::workflows::matching::contract::{SignalProvider, SignalResult};
use crate::workflows::matching::domain::{ContactSeniority, ScoringContext};
use async_trait::async_trait;

/// Scores whether outreach can actually reach a decision maker.
pub struct ContactAccessibilityProvider {
    weight: f64,
}

impl ContactAccessibilityProvider {
    pub const NAME: &'static str = "contact_accessibility";
    pub const DEFAULT_WEIGHT: f64 = 0.15;

    pub fn with_weight(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for ContactAccessibilityProvider {
    fn default() -> Self {
        Self::with_weight(Self::DEFAULT_WEIGHT)
    }
}

#[async_trait]
impl SignalProvider for ContactAccessibilityProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    async fn evaluate(&self, context: &ScoringContext) -> SignalResult {
        score_contact_accessibility(context)
    }
}

const VERIFIED_EMAIL_POINTS: f64 = 30.0;
const PHONE_POINTS: f64 = 10.0;
const EXTRA_CONTACT_POINTS: f64 = 5.0;
const EXTRA_CONTACT_SATURATION: usize = 3;

fn seniority_points(seniority: ContactSeniority) -> f64 {
    match seniority {
        ContactSeniority::Executive => 40.0,
        ContactSeniority::Director => 30.0,
        ContactSeniority::Manager => 20.0,
        ContactSeniority::IndividualContributor => 10.0,
    }
}

pub(crate) fn score_contact_accessibility(context: &ScoringContext) -> SignalResult {
    let contacts = &context.candidate.hints.contacts;
    if contacts.is_empty() {
        return SignalResult::no_data("no contacts on file for organization");
    }

    let best = contacts
        .iter()
        .max_by_key(|contact| (contact.seniority, contact.has_verified_email))
        .expect("non-empty contact list has a maximum");

    let any_verified_email = contacts.iter().any(|contact| contact.has_verified_email);
    let any_phone = contacts.iter().any(|contact| contact.has_phone);

    let mut score = seniority_points(best.seniority);
    let mut evidence = vec![format!(
        "best contact: {} ({:?})",
        best.role_title, best.seniority
    )];

    if any_verified_email {
        score += VERIFIED_EMAIL_POINTS;
        evidence.push("verified email address available".to_string());
    }
    if any_phone {
        score += PHONE_POINTS;
        evidence.push("direct phone number available".to_string());
    }
    if contacts.len() > 1 {
        let extras = (contacts.len() - 1).min(EXTRA_CONTACT_SATURATION);
        score += EXTRA_CONTACT_POINTS * extras as f64;
        evidence.push(format!("{} contact(s) on file", contacts.len()));
    }

    let confidence = if any_verified_email { 0.9 } else { 0.5 };

    SignalResult::scored(score, confidence).with_evidence(evidence)
}
