//! Catalog enumeration and chunking
//!
//! Fetches the full id map once, keeps only tokens deployed on a
//! platform (native coins have no contract addresses to collect), and
//! partitions the retained ids into batches of at most [`CHUNK_SIZE`]
//! preserving catalog order. For a given catalog snapshot the partition
//! is deterministic.

use crate::rate_limiter::RateLimiter;

use super::error::PipelineError;
use super::types::{CatalogResponse, CatalogSource};

/// Maximum number of ids per metadata request
pub const CHUNK_SIZE: usize = 100;

/// Fetch the catalog through the limiter and partition it into id batches
pub async fn token_id_batches(
    source: &dyn CatalogSource,
    limiter: &RateLimiter,
) -> Result<Vec<Vec<u64>>, PipelineError> {
    let response = limiter.schedule(source.fetch_catalog()).await?;
    chunk_catalog(response)
}

/// Partition a catalog response into batches of platform-token ids
pub fn chunk_catalog(response: CatalogResponse) -> Result<Vec<Vec<u64>>, PipelineError> {
    if !response.status.is_success() {
        return Err(PipelineError::CatalogFetch(response.status.describe()));
    }

    let mut batches: Vec<Vec<u64>> = Vec::new();

    for entry in response.data {
        // ignore native coins
        if entry.platform.is_none() {
            continue;
        }

        match batches.last_mut() {
            Some(batch) if batch.len() < CHUNK_SIZE => batch.push(entry.id),
            _ => batches.push(vec![entry.id]),
        }
    }

    Ok(batches)
}
