//! Aggregator Core - Batch Metadata Aggregation Pipeline
//!
//! This module drives the collection of token metadata from the
//! CoinMarketCap catalog into one merged, symbol-keyed map.
//!
//! # Architecture
//!
//! ```text
//! CatalogSource → enumerator (platform filter + chunks of 100)
//!     ↓
//! orchestrator (per batch, paced by RateLimiter, failures isolated)
//!     ↓
//! MetadataSource → normalizer (symbol -> TokenRecord)
//!     ↓
//! merge (addresses union key-by-key, scalars last-write-wins)
//!     ↓
//! TokenMetadataMap + per-batch failure report
//! ```

pub mod enumerator;
pub mod error;
pub mod merge;
pub mod normalizer;
pub mod orchestrator;
pub mod types;

pub use enumerator::{chunk_catalog, token_id_batches, CHUNK_SIZE};
pub use error::PipelineError;
pub use merge::{merge_map, merge_maps};
pub use normalizer::normalize;
pub use orchestrator::{run, BatchFailure, RunReport};
pub use types::{
    ApiStatus, CatalogEntry, CatalogPlatform, CatalogResponse, CatalogSource, ContractAddress,
    ContractPlatform, MetadataResponse, MetadataSource, RawTokenMetadata, TokenMetadataMap,
    TokenRecord, TokenUrls,
};
