//! Pipeline orchestration
//!
//! Drives catalog enumeration, per-batch metadata fetches through the
//! rate limiter, normalization, and merging into the single aggregate.
//! Batches are dispatched sequentially in enumeration order; with the
//! limiter's concurrency cap of 1 this matches concurrent dispatch
//! observationally and keeps merge order deterministic.

use crate::rate_limiter::RateLimiter;

use super::enumerator::{self, CHUNK_SIZE};
use super::error::PipelineError;
use super::merge;
use super::normalizer;
use super::types::{CatalogSource, MetadataSource, TokenMetadataMap};

/// Outcome of one dropped batch
#[derive(Debug)]
pub struct BatchFailure {
    pub batch_index: usize,
    pub batch_len: usize,
    pub error: PipelineError,
}

/// Result of a full aggregation run
///
/// The run is successful even when some batches failed; the caller
/// decides whether the failure list is acceptable.
#[derive(Debug)]
pub struct RunReport {
    pub tokens: TokenMetadataMap,
    pub batches_total: usize,
    pub failures: Vec<BatchFailure>,
}

/// Run the full aggregation pipeline
///
/// Catalog failure aborts the run before any aggregate exists. An
/// oversized batch is a programming-contract violation and also aborts.
/// A batch whose fetch or normalization fails is logged, recorded in the
/// report, and dropped; the remaining batches still contribute.
pub async fn run(
    catalog: &dyn CatalogSource,
    metadata: &dyn MetadataSource,
    limiter: &RateLimiter,
) -> Result<RunReport, PipelineError> {
    let batches = enumerator::token_id_batches(catalog, limiter).await?;
    let batches_total = batches.len();

    log::info!(
        "📦 {} batches to fetch ({} token ids)",
        batches_total,
        batches.iter().map(Vec::len).sum::<usize>()
    );

    let mut tokens = TokenMetadataMap::new();
    let mut failures = Vec::new();

    for (batch_index, batch) in batches.into_iter().enumerate() {
        match fetch_batch(metadata, limiter, &batch).await {
            Ok(partial) => {
                log::debug!(
                    "✅ Batch {}/{} merged {} tokens",
                    batch_index + 1,
                    batches_total,
                    partial.len()
                );
                merge::merge_map(&mut tokens, partial);
            }
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                log::warn!("⚠️  Batch {}/{} dropped: {}", batch_index + 1, batches_total, error);
                failures.push(BatchFailure {
                    batch_index,
                    batch_len: batch.len(),
                    error,
                });
            }
        }
    }

    Ok(RunReport {
        tokens,
        batches_total,
        failures,
    })
}

/// Fetch and normalize one batch of at most [`CHUNK_SIZE`] ids
pub async fn fetch_batch(
    metadata: &dyn MetadataSource,
    limiter: &RateLimiter,
    ids: &[u64],
) -> Result<TokenMetadataMap, PipelineError> {
    if ids.len() > CHUNK_SIZE {
        return Err(PipelineError::BatchSize { len: ids.len() });
    }

    let response = limiter.schedule(metadata.fetch_metadata(ids)).await?;
    normalizer::normalize(response)
}
