//! JSON rendering of the block structure.

use crate::error::{Error, Result};
use crate::model::Block;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without whitespace
    Compact,
}

/// Serialize blocks to a JSON array.
pub fn to_json(blocks: &[Block], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(blocks),
        JsonFormat::Compact => serde_json::to_string(blocks),
    };

    result.map_err(|e| Error::Other(format!("JSON serialization failed: {}", e)))
}
