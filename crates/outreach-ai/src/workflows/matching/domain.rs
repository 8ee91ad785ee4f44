use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier for a partner organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One organization under consideration for outreach, together with any
/// collaborator-fetched hints the caller already has on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationCandidate {
    pub id: OrganizationId,
    pub name: String,
    /// Industry label, compared against the request's domain.
    pub domain: String,
    /// Technology keywords known for the organization (stack pages,
    /// enrichment exports, prior notes).
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub headcount: Option<u32>,
    #[serde(default)]
    pub hints: CandidateHints,
}

/// Pre-fetched external data carried into scoring. Fetching it is the
/// collaborators' job; the engine only reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateHints {
    #[serde(default)]
    pub postings: Vec<JobPostingHint>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
}

/// A job posting attributed to the candidate organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPostingHint {
    pub title: String,
    /// Skill strings mentioned in the posting body.
    #[serde(default)]
    pub skills: Vec<String>,
    pub posted_on: NaiveDate,
}

/// How the outreach team already knows this organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub kind: RelationshipKind,
    pub last_interaction: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    PriorPlacement,
    Partnership,
    AlumniEmployee,
    EventContact,
}

/// A reachable person at the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub role_title: String,
    pub seniority: ContactSeniority,
    #[serde(default)]
    pub has_verified_email: bool,
    #[serde(default)]
    pub has_phone: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSeniority {
    IndividualContributor,
    Manager,
    Director,
    Executive,
}

/// What the caller is recruiting for. `today` is explicit so recency
/// arithmetic stays deterministic under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub required_skills: Vec<String>,
    pub domain: String,
    pub today: NaiveDate,
}

/// Immutable per-candidate scoring input. Built once per candidate per
/// request and shared read-only across all providers.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub request: Arc<MatchRequest>,
    pub candidate: OrganizationCandidate,
}

impl ScoringContext {
    pub fn new(request: Arc<MatchRequest>, candidate: OrganizationCandidate) -> Self {
        Self { request, candidate }
    }

    /// Days since `date`, saturating at zero for future-dated records.
    pub fn days_since(&self, date: NaiveDate) -> i64 {
        (self.request.today - date).num_days().max(0)
    }
}
