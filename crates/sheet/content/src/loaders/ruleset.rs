//! Ruleset loader.

use std::path::Path;

use sheet_core::{Ruleset, RulesetSpec};

use crate::loaders::{LoadResult, read_file};

/// Loader for rulesets from TOML files.
pub struct RulesetLoader;

impl RulesetLoader {
    /// Load and validate a ruleset from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing a RulesetSpec
    ///
    /// # Returns
    ///
    /// Returns a validated Ruleset.
    pub fn load(path: &Path) -> LoadResult<Ruleset> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a ruleset from TOML text.
    pub fn parse(content: &str) -> LoadResult<Ruleset> {
        let spec: RulesetSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ruleset TOML: {}", e))?;

        Ruleset::from_spec(spec).map_err(|e| anyhow::anyhow!("Invalid ruleset: {}", e))
    }

    /// Render a ruleset back into TOML.
    pub fn to_toml(ruleset: &Ruleset) -> LoadResult<String> {
        toml::to_string_pretty(&ruleset.to_spec())
            .map_err(|e| anyhow::anyhow!("Failed to serialize ruleset TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ruleset_round_trips_through_toml() {
        let text = RulesetLoader::to_toml(Ruleset::standard()).unwrap();
        let parsed = RulesetLoader::parse(&text).unwrap();
        assert_eq!(&parsed, Ruleset::standard());
    }

    #[test]
    fn invalid_ruleset_is_rejected() {
        let mut text = RulesetLoader::to_toml(Ruleset::standard()).unwrap();
        text = text.replace("meleeDefense", "meleeDefence");
        let err = RulesetLoader::parse(&text).unwrap_err();
        assert!(err.to_string().contains("meleeDefence"), "{err}");
    }
}
