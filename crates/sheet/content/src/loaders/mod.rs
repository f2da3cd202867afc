//! Content loaders for reading sheet data from files.
//!
//! Rulesets are TOML, characters are JSON (the host document format), and
//! overlays are JSON or RON depending on the file extension.

pub mod character;
pub mod factory;
pub mod overlay;
pub mod ruleset;

pub use character::CharacterLoader;
pub use factory::ContentFactory;
pub use overlay::OverlayLoader;
pub use ruleset::RulesetLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    tracing::debug!(path = %path.display(), "reading content file");
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to write file contents.
pub(crate) fn write_file(path: &Path, content: &str) -> LoadResult<()> {
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}
