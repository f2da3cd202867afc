//! The recompute stages, in execution order.
//!
//! Later stages read what earlier ones wrote:
//!
//! ```text
//! 1. fold_effects          overlay → stored modifiers
//! 2. apply_replacement     full replacement voids biological limb bonuses
//! 3. ability_totals        abilities.*.totalBonus
//! 4. derived_values        derivedAbilityValues.*
//! 5. current_stability     curStability
//! 6. derived_pools         derivedAbilityPools.*
//! 7. training_tiers        skills/words maxTrainingStatus, totalBonus
//! ```

use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::config::Ruleset;
use crate::dice::TrainingTier;
use crate::effects::{Augmentations, EffectDomain, EffectsOverlay, StabilityKey};
use crate::error::{EngineError, EngineResult, SchemaDomain};
use crate::stats::character::lookup_ability;
use crate::stats::{Ability, Character, DerivedValueKind, PoolKind, SkillFamily};

/// Stage 1: fold every overlay entry into the stored modifier it names.
pub(super) fn fold_effects(
    ruleset: &Ruleset,
    character: &mut Character,
    overlay: &EffectsOverlay,
) -> EngineResult<()> {
    for entry in overlay.field_entries(EffectDomain::Abilities) {
        let (_, path, value) = entry?;
        let ability = Ability::from_str(path.target)
            .map_err(|_| EngineError::schema(SchemaDomain::Abilities, path.target))?;
        character
            .ability_mut(ability)?
            .modifiers
            .fold(path.field, value);
    }

    for entry in overlay.field_entries(EffectDomain::DerivedAbilityValues) {
        let (_, path, value) = entry?;
        let unknown = || EngineError::schema(SchemaDomain::DerivedAbilityValues, path.target);
        let kind = DerivedValueKind::from_str(path.target).map_err(|_| unknown())?;
        let slot = character
            .derived_ability_values
            .entry(kind)
            .or_default()
            .modifier_mut(path.field)
            .ok_or_else(unknown)?;
        *slot = path.field.fold(*slot, value);
    }

    for entry in overlay.field_entries(EffectDomain::DerivedAbilityPools) {
        let (_, path, value) = entry?;
        let unknown = || EngineError::schema(SchemaDomain::DerivedAbilityPools, path.target);
        let kind = PoolKind::from_str(path.target).map_err(|_| unknown())?;
        let slot = character
            .derived_ability_pools
            .entry(kind)
            .or_default()
            .modifier_mut(path.field)
            .ok_or_else(unknown)?;
        *slot = path.field.fold(*slot, value);
    }

    for entry in overlay.field_entries(EffectDomain::Skills) {
        let (_, path, value) = entry?;
        let family = ruleset.governing(path.target)?.family;
        character
            .family_mut(family)
            .get_mut(path.target)
            .ok_or_else(|| EngineError::schema(SchemaDomain::Skills, path.target))?
            .modifiers
            .fold(path.field, value);
    }

    Ok(())
}

/// Stage 2: a full torso/head replacement voids biological limb augmentations.
pub(super) fn apply_replacement(
    character: &mut Character,
    augmentations: Augmentations,
) -> EngineResult<()> {
    for ability in augmentations.voided_abilities() {
        tracing::trace!(%ability, "bioMod voided by full replacement");
        character.ability_mut(ability)?.modifiers.bio_mod = 0;
    }
    Ok(())
}

/// Stage 3
pub(super) fn ability_totals(character: &mut Character) {
    for score in character.abilities.values_mut() {
        score.refresh_total();
    }
}

/// Stage 4
pub(super) fn derived_values(ruleset: &Ruleset, character: &mut Character) -> EngineResult<()> {
    for kind in DerivedValueKind::iter() {
        let [first, second] = ruleset.value_pair(kind)?;
        let first = character.ability(first)?.total_bonus;
        let second = character.ability(second)?.total_bonus;
        character
            .derived_ability_values
            .entry(kind)
            .or_default()
            .refresh(kind, first, second);
    }
    Ok(())
}

/// Stage 5: stability minus every cybernetic surcharge.
///
/// No floor is applied, but the result must stay inside the ruleset's
/// `curStability` bounds. A stability total above the cap is rejected rather
/// than truncated.
pub(super) fn current_stability(
    ruleset: &Ruleset,
    character: &mut Character,
    overlay: &EffectsOverlay,
) -> EngineResult<()> {
    let stability = character
        .value(DerivedValueKind::Stability)
        .map(|value| value.total_bonus)
        .ok_or_else(|| {
            EngineError::schema(
                SchemaDomain::DerivedAbilityValues,
                DerivedValueKind::Stability.as_ref(),
            )
        })?;
    let costs = overlay.stability_total(StabilityKey::StabilityCost)?;
    let cur_stability = stability - costs;
    ruleset
        .bounds()
        .cur_stability
        .check(cur_stability, || "curStability".to_string())?;
    character.cur_stability = cur_stability;
    if character.cur_stability < 0 {
        tracing::debug!(
            cur_stability = character.cur_stability,
            "stability overloaded by cybernetics"
        );
    }
    Ok(())
}

/// Stage 6
pub(super) fn derived_pools(
    ruleset: &Ruleset,
    character: &mut Character,
    overlay: &EffectsOverlay,
) -> EngineResult<()> {
    let limb_penalty = overlay.stability_total(StabilityKey::LimbPenalty)?;
    for kind in PoolKind::iter() {
        let [first, second] = ruleset.pool_pair(kind)?;
        let first = character.ability(first)?.total_bonus;
        let second = character.ability(second)?.total_bonus;
        character
            .derived_ability_pools
            .entry(kind)
            .or_default()
            .refresh(kind, first, second, limb_penalty);
    }
    Ok(())
}

/// Stage 7: training tier cap and totals for every skill and magic word.
pub(super) fn training_tiers(character: &mut Character) -> EngineResult<()> {
    let Character {
        abilities,
        skills,
        action_words,
        power_words,
        target_words,
        ..
    } = character;

    for (family, table) in SkillFamily::iter().zip([skills, action_words, power_words, target_words])
    {
        for (id, entry) in table.iter_mut() {
            let first = lookup_ability(abilities, entry.attr1)?.die;
            let second = lookup_ability(abilities, entry.attr2)?.die;
            entry.max_training_status = TrainingTier::from_governing(first, second);
            entry.refresh_total();
            if entry.negative_bonus {
                tracing::trace!(%family, id = id.as_str(), total = entry.total_bonus, "negative bonus");
            }
        }
    }
    Ok(())
}
