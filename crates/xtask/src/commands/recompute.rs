//! Recompute a character sheet
//!
//! Loads a character record and its effects overlay, runs the derived stat
//! engine, and prints the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use strum::IntoEnumIterator;

use sheet_content::{CharacterLoader, ContentFactory, OverlayLoader};
use sheet_core::{Character, EffectsOverlay, Engine, SkillFamily};

use crate::dirs;

/// Recompute a character's derived stats
#[derive(Parser)]
pub struct Recompute {
    /// Character name under `characters/`, or a path to a JSON record
    #[arg(value_name = "CHARACTER")]
    character: String,

    /// Overlay name under `overlays/`, or a path to a JSON/RON overlay.
    /// Defaults to the overlay named after the character, if any.
    #[arg(short, long, value_name = "OVERLAY")]
    overlay: Option<String>,

    /// Ruleset TOML file (defaults to `ruleset.toml` in the data directory)
    #[arg(short, long, value_name = "FILE")]
    ruleset: Option<PathBuf>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write the recomputed record back to its source
    #[arg(short, long)]
    write: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Abilities, derived values, pools and trained skills
    Summary,
    /// Full host document as JSON
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Recompute {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::resolve(self.data_dir.clone()));
        let ruleset = super::load_ruleset(self.ruleset.as_ref(), &factory)?;

        let source = Source::resolve(&self.character);
        let character = source.load(&factory)?;
        let overlay = self.load_overlay(&source, &factory)?;
        tracing::debug!(
            %source,
            augmentations = ?overlay.augmentations(),
            "loaded character and overlay"
        );

        let character = Engine::new(&ruleset)
            .recomputed(character, &overlay)
            .with_context(|| format!("Failed to recompute {}", self.character))?;

        match self.format {
            OutputFormat::Summary => print_summary(&self.character, &character, &overlay),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&character)?),
            OutputFormat::Debug => println!("{:#?}", character),
        }

        if self.write {
            source.save(&factory, &character)?;
            tracing::info!(%source, cur_stability = character.cur_stability, "saved recomputed record");
        }

        Ok(())
    }

    fn load_overlay(&self, source: &Source, factory: &ContentFactory) -> Result<EffectsOverlay> {
        match &self.overlay {
            Some(overlay) if Path::new(overlay).is_file() => OverlayLoader::load(Path::new(overlay)),
            Some(name) => factory.load_overlay(name),
            None => match source {
                Source::Named(name) => factory.load_overlay(name),
                Source::File(_) => Ok(EffectsOverlay::new()),
            },
        }
    }
}

/// Where a character record came from, so `--write` puts it back there.
enum Source {
    Named(String),
    File(PathBuf),
}

impl Source {
    fn resolve(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            Source::File(path.to_path_buf())
        } else {
            Source::Named(arg.to_string())
        }
    }

    fn load(&self, factory: &ContentFactory) -> Result<Character> {
        match self {
            Source::Named(name) => factory.load_character(name),
            Source::File(path) => CharacterLoader::load(path),
        }
    }

    fn save(&self, factory: &ContentFactory, character: &Character) -> Result<()> {
        match self {
            Source::Named(name) => factory.save_character(name, character),
            Source::File(path) => CharacterLoader::save(path, character),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Named(name) => write!(f, "characters/{}.json", name),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn print_summary(name: &str, character: &Character, overlay: &EffectsOverlay) {
    println!("{} {}", style("Character:").bold().cyan(), name);
    let augmentations = overlay.augmentations();
    if !augmentations.is_empty() {
        println!("  {} {:?}", style("Augmentations:").dim(), augmentations);
    }
    println!();

    println!("{}", style("Abilities").bold());
    for (ability, score) in &character.abilities {
        println!(
            "  {:<12} {:>4} {:>+4}",
            ability.to_string(),
            score.die.to_string(),
            score.total_bonus
        );
    }

    println!();
    println!("{}", style("Derived Values").bold());
    for (kind, value) in &character.derived_ability_values {
        println!("  {:<14} {:>+4}", kind.to_string(), value.total_bonus);
    }

    let stability = if character.cur_stability < 0 {
        style(character.cur_stability).red().bold()
    } else {
        style(character.cur_stability).green()
    };
    println!("  {:<14} {:>4}", "curStability", stability);

    println!();
    println!("{}", style("Pools").bold());
    for (kind, pool) in &character.derived_ability_pools {
        let current = pool
            .current_die
            .map(|die| die.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} calc {:>3}  {:>4} / {}",
            kind.to_string(),
            pool.calc,
            current,
            pool.die
        );
    }

    for family in SkillFamily::iter() {
        let table = character.family(family);
        if table.is_empty() {
            continue;
        }
        println!();
        println!("{}", style(family.to_string()).bold());
        for (id, entry) in table {
            let total = if entry.negative_bonus {
                style(format!("{:>+4}", entry.total_bonus)).red()
            } else {
                style(format!("{:>+4}", entry.total_bonus))
            };
            println!(
                "  {:<16} {}  {:<12} (max {})",
                id, total, entry.training_status, entry.max_training_status
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_file_resolves_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.json");
        std::fs::write(&path, "{}").unwrap();

        let source = Source::resolve(path.to_str().unwrap());
        assert!(matches!(&source, Source::File(found) if *found == path));
        assert_eq!(source.to_string(), path.display().to_string());
    }

    #[test]
    fn bare_name_resolves_to_data_dir_record() {
        let source = Source::resolve("vex");
        assert!(matches!(&source, Source::Named(name) if name == "vex"));
        assert_eq!(source.to_string(), "characters/vex.json");
    }

    #[test]
    fn named_source_round_trips_through_factory() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        let source = Source::resolve("blank");
        let character = Character::new(sheet_core::Ruleset::standard());

        source.save(&factory, &character).unwrap();
        assert_eq!(source.load(&factory).unwrap(), character);
    }
}
