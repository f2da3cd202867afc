//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod new_character;
mod recompute;
mod ruleset;

pub use new_character::NewCharacter;
pub use recompute::Recompute;
pub use ruleset::ShowRuleset;

use std::path::PathBuf;

use anyhow::Result;
use sheet_content::{ContentFactory, RulesetLoader};
use sheet_core::Ruleset;

/// Load the ruleset from an explicit file, or from the data directory.
pub(crate) fn load_ruleset(file: Option<&PathBuf>, factory: &ContentFactory) -> Result<Ruleset> {
    match file {
        Some(path) => RulesetLoader::load(path),
        None => factory.load_ruleset(),
    }
}
