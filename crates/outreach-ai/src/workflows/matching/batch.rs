use super::composite::{combine, CompositeScore, FlagThresholds};
use super::contract::SignalRegistry;
use super::domain::{MatchRequest, OrganizationCandidate, OrganizationId, ScoringContext};
use super::orchestrator::{evaluate_candidate, TimeoutBudget};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Chunking and pacing for batch evaluation. The inter-chunk pause is a
/// rate-limit courtesy to the collaborators behind the providers, not a
/// correctness requirement; `Duration::ZERO` disables it.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub chunk_size: usize,
    pub chunk_pause: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 5,
            chunk_pause: Duration::from_millis(500),
        }
    }
}

/// Evaluates every candidate, chunk by chunk.
///
/// Chunks run strictly in sequence; candidates inside a chunk run
/// concurrently. A candidate whose task dies is recorded as a zero-score
/// composite carrying the error, so one bad candidate never aborts the
/// batch. Cancellation stops new chunks from starting; the chunk already
/// in flight finishes and keeps its scores.
pub async fn evaluate_batch(
    candidates: Vec<OrganizationCandidate>,
    request: Arc<MatchRequest>,
    registry: SignalRegistry,
    batch: &BatchConfig,
    budget: &TimeoutBudget,
    thresholds: &FlagThresholds,
    cancel: &CancellationToken,
) -> BTreeMap<OrganizationId, CompositeScore> {
    let mut scores = BTreeMap::new();
    let chunk_size = batch.chunk_size.max(1);
    let mut remaining = candidates.into_iter().peekable();
    let mut chunk_index = 0usize;

    while remaining.peek().is_some() {
        if cancel.is_cancelled() {
            warn!(chunk = chunk_index, "batch cancelled; not starting further chunks");
            break;
        }

        if chunk_index > 0 && !batch.chunk_pause.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!(chunk = chunk_index, "batch cancelled during pacing pause");
                    break;
                }
                _ = tokio::time::sleep(batch.chunk_pause) => {}
            }
        }

        let chunk: Vec<OrganizationCandidate> = remaining.by_ref().take(chunk_size).collect();
        debug!(chunk = chunk_index, size = chunk.len(), "evaluating candidate chunk");

        let mut handles: Vec<(OrganizationId, JoinHandle<CompositeScore>)> =
            Vec::with_capacity(chunk.len());
        for candidate in chunk {
            let id = candidate.id.clone();
            let request = Arc::clone(&request);
            let registry = registry.clone();
            let budget = budget.clone();
            let thresholds = thresholds.clone();
            let handle = tokio::spawn(async move {
                let context = Arc::new(ScoringContext::new(request, candidate));
                let results = evaluate_candidate(context, &registry, &budget).await;
                combine(&results, &registry, &thresholds)
            });
            handles.push((id, handle));
        }

        for (id, handle) in handles {
            let score = match handle.await {
                Ok(score) => score,
                Err(join_error) => {
                    warn!(organization = %id, error = %join_error, "candidate evaluation died");
                    CompositeScore::failed(
                        &registry,
                        format!("candidate evaluation failed: {join_error}"),
                    )
                }
            };
            scores.insert(id, score);
        }

        chunk_index += 1;
    }

    scores
}
