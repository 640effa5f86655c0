//! Typed CoinMarketCap payloads and the fetch capability seams
//!
//! Raw API shapes are deserialized into explicit structs at the fetch
//! boundary; untyped JSON never reaches the normalizer or merge logic.
//! The two `*Source` traits are the seam the orchestrator consumes, so
//! tests substitute in-memory sources for the HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::error::PipelineError;

/// Status envelope returned by every CoinMarketCap endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }

    pub fn describe(&self) -> String {
        match &self.error_message {
            Some(msg) => format!("{} (code {})", msg, self.error_code),
            None => format!("error code {}", self.error_code),
        }
    }
}

/// One row of the /v1/cryptocurrency/map listing
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(default)]
    pub platform: Option<CatalogPlatform>,
}

/// Chain a token is deployed on; native coins carry no platform
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPlatform {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Vec<CatalogEntry>,
}

/// Fixed-shape grouping of the URL lists attached to a token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUrls {
    #[serde(default)]
    pub website: Vec<String>,
    #[serde(default)]
    pub technical_doc: Vec<String>,
    #[serde(default)]
    pub explorer: Vec<String>,
    #[serde(default)]
    pub source_code: Vec<String>,
    #[serde(default)]
    pub message_board: Vec<String>,
    #[serde(default)]
    pub chat: Vec<String>,
    #[serde(default)]
    pub announcement: Vec<String>,
    #[serde(default)]
    pub reddit: Vec<String>,
    #[serde(default)]
    pub twitter: Vec<String>,
}

/// One declared contract deployment of a token
#[derive(Debug, Clone, Deserialize)]
pub struct ContractAddress {
    pub platform: ContractPlatform,
    pub contract_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractPlatform {
    pub name: String,
}

/// One token's raw record from /v2/cryptocurrency/info
#[derive(Debug, Clone, Deserialize)]
pub struct RawTokenMetadata {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub urls: TokenUrls,
    #[serde(default)]
    pub contract_address: Vec<ContractAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: HashMap<String, RawTokenMetadata>,
}

/// Normalized token record keyed by symbol in the aggregate map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub urls: TokenUrls,
    pub addresses: BTreeMap<String, String>,
}

/// Aggregate of all batches: symbol -> normalized record
///
/// BTreeMap keeps the serialized output deterministic for a given
/// catalog snapshot.
pub type TokenMetadataMap = BTreeMap<String, TokenRecord>;

/// Catalog fetch capability, pre-configured by the caller
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, PipelineError>;
}

/// Metadata fetch capability for one batch of ids
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_metadata(&self, ids: &[u64]) -> Result<MetadataResponse, PipelineError>;
}
