//! Derived stat engine.
//!
//! [`Engine::recompute`] is a pure transform over one character record: stored
//! fields plus an [`EffectsOverlay`] in, every derived field rewritten out. It
//! performs no I/O, reads nothing beyond its arguments and the bound
//! [`Ruleset`], and is idempotent for an unchanged overlay.
//!
//! Input is validated before the first stage runs and the stages work on a
//! copy, so a failed recompute leaves the caller's record untouched.

mod stages;
mod validate;

use crate::config::Ruleset;
use crate::effects::EffectsOverlay;
use crate::error::EngineResult;
use crate::stats::Character;

/// Derived stat engine bound to one ruleset.
#[derive(Clone, Copy, Debug)]
pub struct Engine<'r> {
    ruleset: &'r Ruleset,
}

impl Engine<'static> {
    /// Engine over [`Ruleset::standard`].
    pub fn standard() -> Self {
        Self::new(Ruleset::standard())
    }
}

impl<'r> Engine<'r> {
    pub fn new(ruleset: &'r Ruleset) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &'r Ruleset {
        self.ruleset
    }

    /// Recompute every derived field of `character` in place.
    ///
    /// # Errors
    ///
    /// - `SchemaViolation` if the record or overlay names something the
    ///   ruleset does not define
    /// - `OutOfRangeInput` if a stored or incoming value is outside its bounds,
    ///   or if the resulting `curStability` falls outside its range
    pub fn recompute(&self, character: &mut Character, overlay: &EffectsOverlay) -> EngineResult<()> {
        let span = tracing::debug_span!("recompute", effects = !overlay.is_empty());
        let _guard = span.enter();

        let mut next = character.clone();
        match self.run_stages(&mut next, overlay) {
            Ok(()) => {
                *character = next;
                tracing::debug!(cur_stability = character.cur_stability, "recompute finished");
                Ok(())
            }
            Err(err) => {
                tracing::debug!(code = err.error_code(), %err, "recompute rejected");
                Err(err)
            }
        }
    }

    /// By-value form of [`Engine::recompute`].
    pub fn recomputed(
        &self,
        mut character: Character,
        overlay: &EffectsOverlay,
    ) -> EngineResult<Character> {
        self.recompute(&mut character, overlay)?;
        Ok(character)
    }

    fn run_stages(&self, character: &mut Character, overlay: &EffectsOverlay) -> EngineResult<()> {
        validate::normalize_record(self.ruleset, character)?;
        validate::check_overlay(self.ruleset, overlay)?;

        stages::fold_effects(self.ruleset, character, overlay)?;
        stages::apply_replacement(character, overlay.augmentations())?;
        stages::ability_totals(character);
        stages::derived_values(self.ruleset, character)?;
        stages::current_stability(self.ruleset, character, overlay)?;
        stages::derived_pools(self.ruleset, character, overlay)?;
        stages::training_tiers(character)?;

        tracing::trace!("all stages applied");
        Ok(())
    }
}
