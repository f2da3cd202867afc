//! Inspect a ruleset
//!
//! Prints which abilities govern every derived value, pool, skill and magic word.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use strum::IntoEnumIterator;

use sheet_content::{ContentFactory, RulesetLoader};
use sheet_core::{DerivedValueKind, PoolKind, SkillFamily};

use crate::dirs;

/// Print the governing-ability tables of a ruleset
#[derive(Parser)]
pub struct ShowRuleset {
    /// Ruleset TOML file (defaults to `ruleset.toml` in the data directory)
    #[arg(short, long, value_name = "FILE")]
    ruleset: Option<PathBuf>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the ruleset as TOML instead of a table
    #[arg(long)]
    toml: bool,
}

impl ShowRuleset {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(dirs::resolve(self.data_dir));
        let ruleset = super::load_ruleset(self.ruleset.as_ref(), &factory)?;

        if self.toml {
            print!("{}", RulesetLoader::to_toml(&ruleset)?);
            return Ok(());
        }

        println!("{}", style("Derived Values").bold().cyan());
        for kind in DerivedValueKind::iter() {
            let [first, second] = ruleset.value_pair(kind)?;
            println!(
                "  {:<16} {:<11} {:<11} {:>+2}",
                kind.to_string(),
                first.to_string(),
                second.to_string(),
                kind.flat_offset()
            );
        }

        println!();
        println!("{}", style("Pools").bold().cyan());
        for kind in PoolKind::iter() {
            let [first, second] = ruleset.pool_pair(kind)?;
            println!(
                "  {:<16} {:<11} {:<11} {:>+2}",
                kind.to_string(),
                first.to_string(),
                second.to_string(),
                kind.base()
            );
        }

        for family in SkillFamily::iter() {
            println!();
            println!("{}", style(family.to_string()).bold().cyan());
            for (id, governing) in ruleset.entries(family) {
                println!(
                    "  {:<16} {:<11} {}",
                    id,
                    governing.attr1.to_string(),
                    governing.attr2.to_string()
                );
            }
        }

        let bounds = ruleset.bounds();
        println!();
        println!("{}", style("Bounds").bold().cyan());
        for (label, range) in [
            ("modifier", bounds.modifier),
            ("hindrance", bounds.hindrance),
            ("stabilityCost", bounds.stability_cost),
            ("limbPenalty", bounds.limb_penalty),
            ("curStability", bounds.cur_stability),
        ] {
            println!("  {:<16} [{}, {}]", label, range.min, range.max);
        }

        Ok(())
    }
}
