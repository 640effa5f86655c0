//! Batch response normalization
//!
//! Converts one raw /v2/cryptocurrency/info response into the
//! symbol-keyed record shape used by the aggregate map. The `addresses`
//! mapping is built from the record's declared contract deployments,
//! one entry per platform name.

use std::collections::BTreeMap;

use super::error::PipelineError;
use super::types::{MetadataResponse, TokenMetadataMap, TokenRecord};

/// Normalize one batch response into symbol -> [`TokenRecord`]
pub fn normalize(response: MetadataResponse) -> Result<TokenMetadataMap, PipelineError> {
    if !response.status.is_success() {
        return Err(PipelineError::MetadataFetch(response.status.describe()));
    }

    let mut tokens = TokenMetadataMap::new();

    for raw in response.data.into_values() {
        let mut addresses = BTreeMap::new();
        for contract in &raw.contract_address {
            addresses.insert(
                contract.platform.name.clone(),
                contract.contract_address.clone(),
            );
        }

        tokens.insert(
            raw.symbol,
            TokenRecord {
                name: raw.name,
                logo: raw.logo,
                description: raw.description,
                urls: raw.urls,
                addresses,
            },
        );
    }

    Ok(tokens)
}
