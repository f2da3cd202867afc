//! Content factory for loading sheets, overlays and rulesets from a data directory.

use std::path::{Path, PathBuf};

use sheet_core::{Character, EffectsOverlay, Ruleset};

use crate::loaders::{CharacterLoader, LoadResult, OverlayLoader, RulesetLoader};

/// Content factory that loads sheet content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── ruleset.toml          (optional, standard ruleset otherwise)
/// ├── characters/
/// │   └── vex.json
/// └── overlays/
///     ├── vex.ron
///     └── wounded.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load `ruleset.toml`, falling back to the standard ruleset when absent.
    pub fn load_ruleset(&self) -> LoadResult<Ruleset> {
        let path = self.data_dir.join("ruleset.toml");
        if path.exists() {
            RulesetLoader::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no ruleset file, using standard ruleset");
            Ok(Ruleset::standard().clone())
        }
    }

    /// Load `characters/{name}.json`.
    pub fn load_character(&self, name: &str) -> LoadResult<Character> {
        let path = self
            .data_dir
            .join("characters")
            .join(format!("{}.json", name));
        CharacterLoader::load(&path)
    }

    /// Write `characters/{name}.json`.
    pub fn save_character(&self, name: &str, character: &Character) -> LoadResult<()> {
        let dir = self.data_dir.join("characters");
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", dir.display(), e))?;
        CharacterLoader::save(&dir.join(format!("{}.json", name)), character)
    }

    /// Load `overlays/{name}.ron` or `overlays/{name}.json`, or an empty overlay if neither exists.
    pub fn load_overlay(&self, name: &str) -> LoadResult<EffectsOverlay> {
        let dir = self.data_dir.join("overlays");
        for extension in ["ron", "json"] {
            let path = dir.join(format!("{}.{}", name, extension));
            if path.exists() {
                return OverlayLoader::load(&path);
            }
        }
        Ok(EffectsOverlay::new())
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
