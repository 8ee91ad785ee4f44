use chrono::{NaiveDate, ParseError};
use metrics_exporter_prometheus::PrometheusHandle;
use outreach_ai::config::MatchingRuntimeConfig;
use outreach_ai::workflows::matching::{
    CandidateHints, ContactRecord, ContactSeniority, JobPostingHint, MatchConfigError,
    MatchSettings, MatchingEngine, OrganizationCandidate, OrganizationId, RelationshipKind,
    RelationshipRecord, TtlCache,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_engine(runtime: &MatchingRuntimeConfig) -> Result<MatchingEngine, MatchConfigError> {
    MatchingEngine::standard(MatchSettings::from_runtime(runtime))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

pub(crate) fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

/// Hint lookup with an injected TTL cache, standing in for the enrichment
/// collaborators that would otherwise memoize in ad-hoc globals.
pub(crate) struct CachedHintSource {
    cache: TtlCache<OrganizationId, CandidateHints>,
    today: NaiveDate,
}

impl CachedHintSource {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            cache: TtlCache::new(64, Duration::from_secs(300)),
            today,
        }
    }

    pub(crate) fn hints_for(&self, id: &OrganizationId) -> CandidateHints {
        self.cache
            .get_or_insert_with(id, || sample_hints(&id.0, self.today))
    }
}

/// Demo fixtures: a warm fintech partner, a hiring-heavy logistics shop,
/// and an organization nobody has data on.
pub(crate) fn sample_candidates(today: NaiveDate) -> Vec<OrganizationCandidate> {
    let hints = CachedHintSource::new(today);
    let mut candidates = vec![
        OrganizationCandidate {
            id: OrganizationId("ledgerworks".to_string()),
            name: "Ledgerworks".to_string(),
            domain: "fintech".to_string(),
            technologies: vec![
                "Python".to_string(),
                "PostgreSQL".to_string(),
                "Kafka".to_string(),
            ],
            headcount: Some(240),
            hints: CandidateHints::default(),
        },
        OrganizationCandidate {
            id: OrganizationId("freightline".to_string()),
            name: "Freightline Systems".to_string(),
            domain: "logistics".to_string(),
            technologies: vec!["Python".to_string(), "Go".to_string()],
            headcount: Some(900),
            hints: CandidateHints::default(),
        },
        OrganizationCandidate {
            id: OrganizationId("opaque-co".to_string()),
            name: "Opaque Co".to_string(),
            domain: "consulting".to_string(),
            technologies: Vec::new(),
            headcount: None,
            hints: CandidateHints::default(),
        },
    ];

    for candidate in &mut candidates {
        candidate.hints = hints.hints_for(&candidate.id);
    }
    candidates
}

fn sample_hints(id: &str, today: NaiveDate) -> CandidateHints {
    let days_ago = |days: i64| today - chrono::Duration::days(days);
    match id {
        "ledgerworks" => CandidateHints {
            postings: vec![JobPostingHint {
                title: "Backend Engineer".to_string(),
                skills: vec!["Python".to_string(), "PostgreSQL".to_string()],
                posted_on: days_ago(12),
            }],
            relationships: vec![RelationshipRecord {
                kind: RelationshipKind::PriorPlacement,
                last_interaction: days_ago(45),
                note: Some("placed two graduates in the spring cohort".to_string()),
            }],
            contacts: vec![ContactRecord {
                role_title: "VP Engineering".to_string(),
                seniority: ContactSeniority::Executive,
                has_verified_email: true,
                has_phone: false,
            }],
        },
        "freightline" => CandidateHints {
            postings: (0..5)
                .map(|n| JobPostingHint {
                    title: "Software Engineer".to_string(),
                    skills: vec!["Go".to_string(), "Python".to_string()],
                    posted_on: days_ago(5 + n),
                })
                .collect(),
            relationships: Vec::new(),
            contacts: vec![ContactRecord {
                role_title: "Engineering Manager".to_string(),
                seniority: ContactSeniority::Manager,
                has_verified_email: false,
                has_phone: true,
            }],
        },
        _ => CandidateHints::default(),
    }
}
