//! Create a blank character sheet
//!
//! Every ability starts at d4 and every ruleset entry is present, so the record
//! recomputes cleanly before anything is edited.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use sheet_content::ContentFactory;
use sheet_core::{Character, EffectsOverlay, Engine};

use crate::dirs;

/// Write a blank character sheet
#[derive(Parser)]
pub struct NewCharacter {
    /// Name of the record under `characters/`
    #[arg(value_name = "NAME")]
    name: String,

    /// Ruleset TOML file (defaults to `ruleset.toml` in the data directory)
    #[arg(short, long, value_name = "FILE")]
    ruleset: Option<PathBuf>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Overwrite an existing record
    #[arg(short, long)]
    force: bool,
}

impl NewCharacter {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::resolve(self.data_dir));
        let ruleset = super::load_ruleset(self.ruleset.as_ref(), &factory)?;

        let path = factory
            .data_dir()
            .join("characters")
            .join(format!("{}.json", self.name));
        if path.exists() && !self.force {
            anyhow::bail!(
                "Character already exists: {}\n\nHint: pass --force to overwrite",
                path.display()
            );
        }

        let character = Engine::new(&ruleset)
            .recomputed(Character::new(&ruleset), &EffectsOverlay::new())?;
        factory.save_character(&self.name, &character)?;

        println!("{} {}", style("Created").green().bold(), path.display());
        Ok(())
    }
}
