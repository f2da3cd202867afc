//! Character record loader.

use std::path::Path;

use sheet_core::Character;

use crate::loaders::{LoadResult, read_file, write_file};

/// Loader for character records in the host's JSON document format.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character record from a JSON file.
    pub fn load(path: &Path) -> LoadResult<Character> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Character> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character JSON: {}", e))
    }

    /// Write a character record back as pretty-printed JSON.
    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        let content = serde_json::to_string_pretty(character)
            .map_err(|e| anyhow::anyhow!("Failed to serialize character JSON: {}", e))?;
        write_file(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::{Ability, Ruleset, StepDie};

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.json");
        let character =
            Character::new(Ruleset::standard()).with_die(Ability::Willpower, StepDie::D12);

        CharacterLoader::save(&path, &character).unwrap();
        let loaded = CharacterLoader::load(&path).unwrap();

        assert_eq!(loaded, character);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = CharacterLoader::load(Path::new("/nonexistent/hero.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hero.json"));
    }
}
