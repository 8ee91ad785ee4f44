use crate::infra::{build_engine, parse_date, sample_candidates};
use chrono::{Local, NaiveDate};
use clap::Args;
use outreach_ai::config::MatchingRuntimeConfig;
use outreach_ai::error::AppError;
use outreach_ai::workflows::matching::MatchRequest;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct RankDemoArgs {
    /// Required skills, comma separated (e.g. "Python,PostgreSQL")
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,
    /// Industry domain to match against
    #[arg(long, default_value = "fintech")]
    domain: String,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_demo_date)]
    today: Option<NaiveDate>,
}

fn parse_demo_date(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) async fn run_rank_demo(args: RankDemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let skills = if args.skills.is_empty() {
        vec!["Python".to_string(), "PostgreSQL".to_string()]
    } else {
        args.skills
    };

    // No pacing needed against bundled fixtures.
    let runtime = MatchingRuntimeConfig {
        chunk_pause: Duration::ZERO,
        ..MatchingRuntimeConfig::default()
    };
    let engine = build_engine(&runtime)?;

    let request = MatchRequest {
        required_skills: skills.clone(),
        domain: args.domain.clone(),
        today,
    };
    let candidates = sample_candidates(today);

    let outcome = engine.rank(request, candidates, None).await?;

    println!("Placement outreach ranking demo");
    println!(
        "Request: skills [{}], domain {}, evaluated {}",
        skills.join(", "),
        args.domain,
        today
    );

    println!("\nRanked organizations");
    for (position, candidate) in outcome.ranked.iter().enumerate() {
        let score = outcome
            .scores
            .get(&candidate.id)
            .expect("ranked candidates carry a score");
        println!(
            "{}. {} - {} ({} confidence)",
            position + 1,
            candidate.name,
            score.overall,
            score.confidence.label()
        );
        for line in score.breakdown.lines() {
            println!("   {line}");
        }
        if !score.errors.is_empty() {
            println!("   errors: {}", score.errors.join("; "));
        }
    }

    Ok(())
}
