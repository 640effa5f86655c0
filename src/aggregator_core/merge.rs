//! Structural merge of partial token maps
//!
//! The aggregate has exactly two nested map shapes: the symbol -> record
//! map itself and each record's `addresses` map. Merge unions those
//! key-by-key with the later source winning per key. Scalar fields and
//! the URL lists are leaves: a later source replaces them wholesale
//! (lists are never concatenated).

use super::types::{TokenMetadataMap, TokenRecord};

/// Merge `source` into `target`; later values win at the scalar level
pub fn merge_map(target: &mut TokenMetadataMap, source: TokenMetadataMap) {
    for (symbol, record) in source {
        match target.get_mut(&symbol) {
            Some(existing) => merge_record(existing, record),
            None => {
                target.insert(symbol, record);
            }
        }
    }
}

/// Apply several sources left to right; later sources win conflicts
///
/// Sequential application is associative: merging A then B then C one at
/// a time leaves `target` identical to one `merge_maps` call.
pub fn merge_maps<I>(target: &mut TokenMetadataMap, sources: I)
where
    I: IntoIterator<Item = TokenMetadataMap>,
{
    for source in sources {
        merge_map(target, source);
    }
}

fn merge_record(target: &mut TokenRecord, source: TokenRecord) {
    target.name = source.name;
    target.logo = source.logo;
    target.description = source.description;
    target.urls = source.urls;
    target.addresses.extend(source.addresses);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator_core::types::TokenUrls;
    use std::collections::BTreeMap;

    fn record(name: &str, addresses: &[(&str, &str)], website: &[&str]) -> TokenRecord {
        TokenRecord {
            name: name.to_string(),
            logo: None,
            description: None,
            urls: TokenUrls {
                website: website.iter().map(|s| s.to_string()).collect(),
                ..TokenUrls::default()
            },
            addresses: addresses
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn map(entries: Vec<(&str, TokenRecord)>) -> TokenMetadataMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_merge_into_empty_is_identity() {
        let source = map(vec![
            ("UNI", record("Uniswap", &[("ethereum", "0xABC")], &["https://uniswap.org"])),
            ("CAKE", record("PancakeSwap", &[("bsc", "0xDEF")], &[])),
        ]);

        let mut target = TokenMetadataMap::new();
        merge_map(&mut target, source.clone());

        assert_eq!(target, source);
    }

    #[test]
    fn test_sequential_merges_equal_one_variadic_merge() {
        let a = map(vec![("A", record("Alpha", &[("ethereum", "0x1")], &[]))]);
        let b = map(vec![
            ("A", record("Alpha v2", &[("bsc", "0x2")], &[])),
            ("B", record("Beta", &[], &[])),
        ]);
        let c = map(vec![("C", record("Gamma", &[("solana", "So1")], &[]))]);

        let mut sequential = TokenMetadataMap::new();
        merge_map(&mut sequential, a.clone());
        merge_map(&mut sequential, b.clone());
        merge_map(&mut sequential, c.clone());

        let mut variadic = TokenMetadataMap::new();
        merge_maps(&mut variadic, [a, b, c]);

        assert_eq!(sequential, variadic);
    }

    #[test]
    fn test_reused_symbol_unions_addresses() {
        let mut target = map(vec![("UNI", record("Uniswap", &[("ethereum", "0xABC")], &[]))]);
        let source = map(vec![("UNI", record("Uniswap", &[("bsc", "0xDEF")], &[]))]);

        merge_map(&mut target, source);

        let addresses = &target["UNI"].addresses;
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses["ethereum"], "0xABC");
        assert_eq!(addresses["bsc"], "0xDEF");
    }

    #[test]
    fn test_later_source_wins_per_address_key_and_scalar() {
        let mut target = map(vec![("UNI", record("Old name", &[("ethereum", "0xOLD")], &[]))]);
        let source = map(vec![("UNI", record("New name", &[("ethereum", "0xNEW")], &[]))]);

        merge_map(&mut target, source);

        assert_eq!(target["UNI"].name, "New name");
        assert_eq!(target["UNI"].addresses["ethereum"], "0xNEW");
    }

    #[test]
    fn test_url_lists_replaced_not_concatenated() {
        let mut target = map(vec![("UNI", record("Uniswap", &[], &["https://old.example"]))]);
        let source = map(vec![("UNI", record("Uniswap", &[], &["https://new.example"]))]);

        merge_map(&mut target, source);

        assert_eq!(target["UNI"].urls.website, vec!["https://new.example"]);
    }

    #[test]
    fn test_disjoint_symbols_accumulate() {
        let mut target = map(vec![("A", record("Alpha", &[], &[]))]);
        merge_map(&mut target, map(vec![("B", record("Beta", &[], &[]))]));
        merge_map(&mut target, map(vec![("C", record("Gamma", &[], &[]))]));

        assert_eq!(
            target.keys().cloned().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_untouched_record_fields_survive_address_union() {
        let mut logo_record = record("Uniswap", &[("ethereum", "0xABC")], &[]);
        logo_record.logo = Some("https://example.com/uni.png".to_string());
        let mut target = map(vec![("UNI", logo_record)]);

        // Later batch for the same symbol carries no logo: scalar
        // replacement applies, logo becomes None (last write wins)
        let source = map(vec![("UNI", record("Uniswap", &[("bsc", "0xDEF")], &[]))]);
        merge_map(&mut target, source);

        assert!(target["UNI"].logo.is_none());
        assert_eq!(target["UNI"].addresses.len(), 2);
    }

    #[test]
    fn test_record_without_addresses_merges_cleanly() {
        let mut bare = BTreeMap::new();
        bare.insert("X".to_string(), record("X", &[], &[]));

        let mut target = TokenMetadataMap::new();
        merge_map(&mut target, bare);

        assert!(target["X"].addresses.is_empty());
    }
}
