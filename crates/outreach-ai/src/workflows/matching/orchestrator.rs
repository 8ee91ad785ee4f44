use super::contract::{SignalRegistry, SignalResult};
use super::domain::ScoringContext;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::warn;

/// Per-provider and collective deadlines for one candidate evaluation.
#[derive(Debug, Clone)]
pub struct TimeoutBudget {
    pub per_provider: Duration,
    pub per_candidate: Duration,
}

impl Default for TimeoutBudget {
    fn default() -> Self {
        Self {
            per_provider: Duration::from_secs(8),
            per_candidate: Duration::from_secs(20),
        }
    }
}

const UNAVAILABLE_NOTE: &str = "signal unavailable";

/// Runs every registered provider concurrently against one candidate.
///
/// The returned map always holds one entry per registered provider: a slow,
/// panicking, or deadline-crossed provider is synthesized as a zero-score,
/// zero-confidence result instead of failing the evaluation.
pub async fn evaluate_candidate(
    context: Arc<ScoringContext>,
    registry: &SignalRegistry,
    budget: &TimeoutBudget,
) -> BTreeMap<String, SignalResult> {
    let mut tasks: JoinSet<(&'static str, SignalResult)> = JoinSet::new();
    let mut names_by_task = HashMap::new();

    for provider in registry.providers() {
        let provider = Arc::clone(provider);
        let context = Arc::clone(&context);
        let per_provider = budget.per_provider;
        let name = provider.name();
        let handle = tasks.spawn(async move {
            match timeout(per_provider, provider.evaluate(&context)).await {
                Ok(result) => (name, result),
                Err(_) => {
                    warn!(
                        provider = name,
                        organization = %context.candidate.id,
                        timeout_ms = per_provider.as_millis() as u64,
                        "signal provider timed out"
                    );
                    (
                        name,
                        SignalResult::unavailable(
                            UNAVAILABLE_NOTE,
                            format!(
                                "provider '{name}' timed out after {}ms",
                                per_provider.as_millis()
                            ),
                        ),
                    )
                }
            }
        });
        names_by_task.insert(handle.id(), name);
    }

    let deadline = Instant::now() + budget.per_candidate;
    let mut results = BTreeMap::new();

    while !tasks.is_empty() {
        match timeout_at(deadline, tasks.join_next_with_id()).await {
            Ok(Some(Ok((task_id, (name, result))))) => {
                names_by_task.remove(&task_id);
                if let Some(error) = &result.error {
                    warn!(provider = name, error = %error, "signal provider failed");
                }
                results.insert(name.to_string(), result);
            }
            Ok(Some(Err(join_error))) => {
                let name = names_by_task
                    .remove(&join_error.id())
                    .unwrap_or("unknown_provider");
                warn!(provider = name, error = %join_error, "signal provider panicked");
                results.insert(
                    name.to_string(),
                    SignalResult::unavailable(
                        UNAVAILABLE_NOTE,
                        format!("provider '{name}' panicked: {join_error}"),
                    ),
                );
            }
            Ok(None) => break,
            Err(_) => {
                // Ceiling reached: abandon in-flight work, keep what landed.
                warn!(
                    organization = %context.candidate.id,
                    ceiling_ms = budget.per_candidate.as_millis() as u64,
                    "candidate evaluation ceiling reached; abandoning pending signals"
                );
                tasks.abort_all();
                break;
            }
        }
    }

    for provider in registry.providers() {
        results.entry(provider.name().to_string()).or_insert_with(|| {
            SignalResult::unavailable(
                UNAVAILABLE_NOTE,
                format!(
                    "provider '{}' missed the {}ms evaluation ceiling",
                    provider.name(),
                    budget.per_candidate.as_millis()
                ),
            )
        });
    }

    results
}
