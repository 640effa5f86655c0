//! CoinMarketCap API client
//!
//! Implements the catalog and metadata fetch capabilities over
//! /v1/cryptocurrency/map and /v2/cryptocurrency/info. Base URL and the
//! X-CMC_PRO_API_KEY header are fixed at construction; nothing is
//! configured globally.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

use crate::aggregator_core::{
    CatalogResponse, CatalogSource, MetadataResponse, MetadataSource, PipelineError,
};

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

pub struct CmcClient {
    client: reqwest::Client,
    base_url: String,
}

impl CmcClient {
    /// Build a client for the given API host and key
    pub fn new(host: &str, api_key: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut key_value = HeaderValue::from_str(api_key)?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("https://{}", host),
        })
    }
}

#[async_trait]
impl CatalogSource for CmcClient {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, PipelineError> {
        let url = format!(
            "{}/v1/cryptocurrency/map?aux=platform&sort=cmc_rank",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::CatalogFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::CatalogFetch(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json::<CatalogResponse>()
            .await
            .map_err(|e| PipelineError::CatalogFetch(e.to_string()))
    }
}

#[async_trait]
impl MetadataSource for CmcClient {
    async fn fetch_metadata(&self, ids: &[u64]) -> Result<MetadataResponse, PipelineError> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/v2/cryptocurrency/info?aux=urls,logo,description&id={}",
            self.base_url, joined
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::MetadataFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::MetadataFetch(format!(
                "HTTP {}",
                response.status()
            )));
        }

        // Typed deserialization is the validation boundary: a body that
        // does not match the schema is a normalization failure for this
        // batch, not untyped data passed downstream
        response
            .json::<MetadataResponse>()
            .await
            .map_err(|e| PipelineError::Normalization(e.to_string()))
    }
}
