//! Input checks run before any stage mutates the record.
//!
//! After these pass, every name a stage looks up is known to exist and every
//! stored or incoming number is inside its bounds.

use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::config::Ruleset;
use crate::effects::{EffectDomain, EffectsOverlay, FieldPath, StabilityKey};
use crate::error::{EngineError, EngineResult, SchemaDomain};
use crate::stats::{
    Ability, Character, DerivedValueKind, ModifierField, Modifiers, PoolKind, SkillEntry,
    SkillFamily,
};

/// Check the stored record and fill in entries the ruleset defines but the record lacks.
///
/// Skill and word governing abilities are rewritten from the ruleset table.
pub(super) fn normalize_record(ruleset: &Ruleset, character: &mut Character) -> EngineResult<()> {
    let bounds = ruleset.bounds();

    for ability in Ability::iter() {
        let score = character.ability(ability)?;
        check_modifiers(ruleset, &score.modifiers, ability.as_ref())?;
    }

    for kind in DerivedValueKind::iter() {
        let value = character.derived_ability_values.entry(kind).or_default();
        bounds
            .hindrance
            .check(value.hindrance_mod, || format!("{kind}.hindranceMod"))?;
        bounds
            .modifier
            .check(value.trait_mod, || format!("{kind}.traitMod"))?;
    }

    for kind in PoolKind::iter() {
        let pool = character.derived_ability_pools.entry(kind).or_default();
        bounds
            .hindrance
            .check(pool.hindrance_mod, || format!("{kind}.hindranceMod"))?;
        bounds
            .modifier
            .check(pool.trait_mod, || format!("{kind}.traitMod"))?;
    }

    for family in SkillFamily::iter() {
        let table = character.family_mut(family);

        for (id, entry) in table.iter_mut() {
            let governing = ruleset.governing(id)?;
            if governing.family != family {
                return Err(EngineError::schema(SchemaDomain::Skills, id.as_str()));
            }
            check_modifiers(ruleset, &entry.modifiers, id)?;
            entry.attr1 = governing.attr1;
            entry.attr2 = governing.attr2;
        }

        for (id, governing) in ruleset.entries(family) {
            if !table.contains_key(id) {
                table.insert(
                    id.to_string(),
                    SkillEntry::new(governing.attr1, governing.attr2),
                );
            }
        }
    }

    Ok(())
}

fn check_modifiers(ruleset: &Ruleset, modifiers: &Modifiers, owner: &str) -> EngineResult<()> {
    for field in ModifierField::iter() {
        ruleset
            .bounds()
            .for_field(field)
            .check(modifiers.get(field), || format!("{owner}.{field}"))?;
    }
    Ok(())
}

/// Check every overlay entry: target names, field names and values.
pub(super) fn check_overlay(ruleset: &Ruleset, overlay: &EffectsOverlay) -> EngineResult<()> {
    for domain in [
        EffectDomain::Abilities,
        EffectDomain::DerivedAbilityValues,
        EffectDomain::DerivedAbilityPools,
        EffectDomain::Skills,
    ] {
        for (effect, path, value) in overlay.entries(domain) {
            let parsed = FieldPath::parse(domain, path)?;
            check_target(ruleset, domain, &parsed, path)?;
            ruleset
                .bounds()
                .for_field(parsed.field)
                .check(value, || format!("{domain}.{effect}.{path}"))?;
        }
    }

    for entry in overlay.stability_entries() {
        let (effect, key, value) = entry?;
        let bounds = match key {
            StabilityKey::StabilityCost => ruleset.bounds().stability_cost,
            StabilityKey::LimbPenalty => ruleset.bounds().limb_penalty,
        };
        bounds.check(value, || {
            format!("{}.{effect}.{}", EffectDomain::StabilityCosts, key.as_ref())
        })?;
    }

    Ok(())
}

fn check_target(
    ruleset: &Ruleset,
    domain: EffectDomain,
    path: &FieldPath<'_>,
    raw: &str,
) -> EngineResult<()> {
    let unknown = || EngineError::schema(domain.into(), raw);
    let stored_only = matches!(
        path.field,
        ModifierField::HindranceMod | ModifierField::TraitMod
    );

    match domain {
        EffectDomain::Abilities => {
            Ability::from_str(path.target).map_err(|_| unknown())?;
        }
        EffectDomain::DerivedAbilityValues => {
            DerivedValueKind::from_str(path.target).map_err(|_| unknown())?;
            if !stored_only {
                return Err(unknown());
            }
        }
        EffectDomain::DerivedAbilityPools => {
            PoolKind::from_str(path.target).map_err(|_| unknown())?;
            if !stored_only {
                return Err(unknown());
            }
        }
        EffectDomain::Skills => {
            ruleset.governing(path.target)?;
        }
        EffectDomain::StabilityCosts => return Err(unknown()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatBounds;

    fn overlay_error(overlay: EffectsOverlay) -> EngineError {
        check_overlay(Ruleset::standard(), &overlay).unwrap_err()
    }

    #[test]
    fn unknown_targets_fail_fast() {
        let err = overlay_error(EffectsOverlay::new().with(
            EffectDomain::Abilities,
            "ring",
            "luck.bonusMod",
            1,
        ));
        assert_eq!(err, EngineError::schema(SchemaDomain::Abilities, "luck.bonusMod"));

        let err = overlay_error(EffectsOverlay::new().with(
            EffectDomain::Skills,
            "book",
            "juggling.bonusMod",
            1,
        ));
        assert_eq!(err, EngineError::schema(SchemaDomain::Skills, "juggling"));
    }

    #[test]
    fn computed_fields_are_not_targetable() {
        let err = overlay_error(EffectsOverlay::new().with(
            EffectDomain::DerivedAbilityValues,
            "shield",
            "meleeDefense.bonusMod",
            1,
        ));
        assert_eq!(err.error_code(), "SCHEMA_VIOLATION");
    }

    #[test]
    fn out_of_range_values_are_errors() {
        let err = overlay_error(EffectsOverlay::new().with(
            EffectDomain::Abilities,
            "curse",
            "strength.hindranceMod",
            2,
        ));
        assert_eq!(
            err,
            EngineError::out_of_range(
                "abilities.curse.strength.hindranceMod",
                2,
                StatBounds::HINDRANCE.min,
                StatBounds::HINDRANCE.max
            )
        );

        let err = overlay_error(EffectsOverlay::new().with(
            EffectDomain::StabilityCosts,
            "cyberArm",
            "stabilityCost",
            -1,
        ));
        assert_eq!(err.error_code(), "OUT_OF_RANGE_INPUT");
    }

    #[test]
    fn record_is_normalized() {
        let ruleset = Ruleset::standard();
        let mut character = Character::new(ruleset);
        character.skills.remove("medicine");
        character.derived_ability_pools.clear();
        if let Some(entry) = character.skills.get_mut("stealth") {
            entry.attr1 = Ability::Charisma;
        }

        normalize_record(ruleset, &mut character).unwrap();

        assert!(character.skills.contains_key("medicine"));
        assert_eq!(character.derived_ability_pools.len(), 7);
        assert_eq!(character.skills["stealth"].attr1, Ability::Agility);
    }

    #[test]
    fn entry_in_wrong_family_is_rejected() {
        let ruleset = Ruleset::standard();
        let mut character = Character::new(ruleset);
        let fire = character.power_words["fire"].clone();
        character.skills.insert("fire".into(), fire);

        assert_eq!(
            normalize_record(ruleset, &mut character).unwrap_err(),
            EngineError::schema(SchemaDomain::Skills, "fire")
        );
    }

    #[test]
    fn stored_modifiers_are_bounded() {
        let ruleset = Ruleset::standard();
        let mut character = Character::new(ruleset);
        character
            .ability_mut(Ability::Strength)
            .unwrap()
            .modifiers
            .bonus_mod = 21;

        assert_eq!(
            normalize_record(ruleset, &mut character).unwrap_err(),
            EngineError::out_of_range("strength.bonusMod", 21, -20, 20)
        );
    }
}
