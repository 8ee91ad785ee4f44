//! Ranking behavior of the standard four-signal registry over realistic
//! hint data.

use chrono::{Duration as ChronoDuration, NaiveDate};
use outreach_ai::workflows::matching::{
    BatchConfig, CandidateHints, ConfidenceTier, ContactRecord, ContactSeniority, JobPostingHint,
    MatchRequest, MatchSettings, MatchingEngine, OrganizationCandidate, OrganizationId,
    RelationshipKind, RelationshipRecord,
};
use std::time::Duration;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

fn request() -> MatchRequest {
    MatchRequest {
        required_skills: vec!["Python".to_string(), "PostgreSQL".to_string()],
        domain: "fintech".to_string(),
        today: today(),
    }
}

fn engine() -> MatchingEngine {
    let settings = MatchSettings {
        batch: BatchConfig {
            chunk_size: 5,
            chunk_pause: Duration::ZERO,
        },
        ..MatchSettings::default()
    };
    MatchingEngine::standard(settings).expect("standard registry is valid")
}

fn strong_org() -> OrganizationCandidate {
    OrganizationCandidate {
        id: OrganizationId("strong".to_string()),
        name: "Ledgerworks".to_string(),
        domain: "fintech".to_string(),
        technologies: vec!["Python".to_string(), "PostgreSQL".to_string()],
        headcount: Some(250),
        hints: CandidateHints {
            postings: (0..3)
                .map(|n| JobPostingHint {
                    title: format!("Python Engineer {n}"),
                    skills: vec!["Python".to_string()],
                    posted_on: today() - ChronoDuration::days(10 + n),
                })
                .collect(),
            relationships: vec![RelationshipRecord {
                kind: RelationshipKind::PriorPlacement,
                last_interaction: today() - ChronoDuration::days(30),
                note: Some("two graduates placed last cohort".to_string()),
            }],
            contacts: vec![ContactRecord {
                role_title: "VP Engineering".to_string(),
                seniority: ContactSeniority::Executive,
                has_verified_email: true,
                has_phone: true,
            }],
        },
    }
}

fn middling_org() -> OrganizationCandidate {
    OrganizationCandidate {
        id: OrganizationId("middling".to_string()),
        name: "Partial Corp".to_string(),
        domain: "logistics".to_string(),
        technologies: vec!["Python".to_string()],
        headcount: None,
        hints: CandidateHints::default(),
    }
}

fn unknown_org() -> OrganizationCandidate {
    OrganizationCandidate {
        id: OrganizationId("unknown".to_string()),
        name: "Mystery Ltd".to_string(),
        domain: "unknown".to_string(),
        technologies: Vec::new(),
        headcount: None,
        hints: CandidateHints::default(),
    }
}

#[tokio::test]
async fn richer_evidence_ranks_higher() {
    let outcome = engine()
        .rank(
            request(),
            vec![unknown_org(), middling_org(), strong_org()],
            None,
        )
        .await
        .expect("rank succeeds");

    let ranked_ids: Vec<_> = outcome.ranked.iter().map(|c| c.id.0.as_str()).collect();
    // All three survive via min_results, ordered by evidence strength.
    assert_eq!(ranked_ids, vec!["strong", "middling", "unknown"]);

    let strong = &outcome.scores[&OrganizationId("strong".to_string())];
    let middling = &outcome.scores[&OrganizationId("middling".to_string())];
    let unknown = &outcome.scores[&OrganizationId("unknown".to_string())];

    assert!(strong.overall > middling.overall);
    assert!(middling.overall > unknown.overall);
    assert_eq!(unknown.overall, 0);
    assert_eq!(unknown.confidence, ConfidenceTier::Low);
}

#[tokio::test]
async fn strong_candidate_fires_expected_flags() {
    let outcome = engine()
        .rank(request(), vec![strong_org()], None)
        .await
        .expect("rank succeeds");

    let score = &outcome.scores[&OrganizationId("strong".to_string())];
    assert!(score.flags.strong_skill_alignment);
    assert!(score.flags.established_relationship);
    assert!(score.flags.reachable_contact);
    assert!(score.flags.actively_hiring);
    assert_eq!(score.confidence, ConfidenceTier::High);
    assert!(score.errors.is_empty());
}

#[tokio::test]
async fn every_component_is_present_for_every_candidate() {
    let outcome = engine()
        .rank(request(), vec![strong_org(), unknown_org()], None)
        .await
        .expect("rank succeeds");

    for score in outcome.scores.values() {
        assert_eq!(score.components.len(), 4);
        assert!(score
            .components
            .keys()
            .any(|name| name == "skill_relevance"));
        assert!(!score.breakdown.is_empty());
    }
}
