//! Concrete signal providers for the standard outreach registry.
//!
//! Each provider reads collaborator-fetched hints off the scoring context
//! and turns them into a 0-100 score with confidence and evidence notes.
//! The arithmetic lives in plain functions so it can be unit tested without
//! async machinery.

mod contact_accessibility;
mod market_activity;
mod relationship_fit;
mod skill_relevance;

pub use contact_accessibility::ContactAccessibilityProvider;
pub use market_activity::{MarketActivityConfig, MarketActivityProvider};
pub use relationship_fit::RelationshipFitProvider;
pub use skill_relevance::SkillRelevanceProvider;

use super::contract::{RegistryError, SignalRegistry};
use std::sync::Arc;

/// The production provider set. Weights sum to 1.0; the registry
/// constructor re-checks that at startup.
pub fn standard_registry() -> Result<SignalRegistry, RegistryError> {
    SignalRegistry::new(vec![
        Arc::new(SkillRelevanceProvider::default()),
        Arc::new(MarketActivityProvider::default()),
        Arc::new(RelationshipFitProvider::default()),
        Arc::new(ContactAccessibilityProvider::default()),
    ])
}

/// Case-insensitive skill comparison: a required skill counts as present
/// when either string contains the other ("postgres" matches "PostgreSQL").
pub(crate) fn skill_matches(required: &str, known: &str) -> bool {
    let required = required.trim().to_ascii_lowercase();
    let known = known.trim().to_ascii_lowercase();
    if required.is_empty() || known.is_empty() {
        return false;
    }
    known.contains(&required) || required.contains(&known)
}

pub(crate) fn domain_aligns(candidate_domain: &str, requested_domain: &str) -> bool {
    skill_matches(requested_domain, candidate_domain)
}
