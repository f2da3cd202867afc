//! Effects overlay loader.

use std::path::Path;

use sheet_core::EffectsOverlay;

use crate::loaders::{LoadResult, read_file};

/// Loader for effects overlays from JSON or RON files.
pub struct OverlayLoader;

impl OverlayLoader {
    /// Load an overlay, choosing the format from the file extension.
    ///
    /// `.ron` files are parsed as RON, everything else as JSON.
    pub fn load(path: &Path) -> LoadResult<EffectsOverlay> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::parse_ron(&content),
            _ => Self::parse_json(&content),
        }
    }

    pub fn parse_json(content: &str) -> LoadResult<EffectsOverlay> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse overlay JSON: {}", e))
    }

    pub fn parse_ron(content: &str) -> LoadResult<EffectsOverlay> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse overlay RON: {}", e))
    }
}
