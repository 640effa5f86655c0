//! Aggregate output writer
//!
//! Writes the final token map as tab-indented JSON, the layout downstream
//! consumers of tokens.json already parse.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::aggregator_core::TokenMetadataMap;

/// Write the aggregate map to `path` as tab-indented JSON
pub fn write_token_map(
    path: &Path,
    tokens: &TokenMetadataMap,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    tokens.serialize(&mut serializer)?;
    writer.flush()?;

    Ok(())
}
