//! Effects overlay - transient modifier deltas supplied for one recompute.
//!
//! The overlay is grouped by domain. Each domain maps an effect name (the item,
//! condition or augmentation contributing it) to field paths and values:
//!
//! ```text
//! abilities:            { "gorillaAugmentation": { "strength.bioMod": 2 } }
//! derivedAbilityValues: { "shieldTraining":      { "meleeDefense.traitMod": 1 } }
//! derivedAbilityPools:  { "wounded":             { "health.hindranceMod": -2 } }
//! skills:               { "thievesTools":        { "stealth.bonusMod": 1 } }
//! stabilityCosts:       { "cyberArm":            { "stabilityCost": 2, "limbPenalty": 1 } }
//! ```
//!
//! Missing domains and effects are empty maps, so consumers only iterate keys
//! that exist.

use std::collections::BTreeMap;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{EngineError, EngineResult, SchemaDomain};
use crate::stats::{Ability, ModifierField};

/// Field path → value for one effect.
pub type EffectFields = BTreeMap<String, i32>;

/// Effect name → fields, for one domain.
pub type EffectMap = BTreeMap<String, EffectFields>;

/// The domains an overlay groups its effects by.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum EffectDomain {
    Abilities,
    DerivedAbilityValues,
    DerivedAbilityPools,
    Skills,
    StabilityCosts,
}

impl From<EffectDomain> for SchemaDomain {
    fn from(domain: EffectDomain) -> Self {
        match domain {
            EffectDomain::Abilities => SchemaDomain::Abilities,
            EffectDomain::DerivedAbilityValues => SchemaDomain::DerivedAbilityValues,
            EffectDomain::DerivedAbilityPools => SchemaDomain::DerivedAbilityPools,
            EffectDomain::Skills => SchemaDomain::Skills,
            EffectDomain::StabilityCosts => SchemaDomain::StabilityCosts,
        }
    }
}

/// Keys a stability-cost effect may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum StabilityKey {
    /// Subtracted from stability to produce current stability.
    StabilityCost,
    /// Subtracted from health pool capacity.
    LimbPenalty,
}

/// A parsed `"<target>.<field>"` path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldPath<'a> {
    pub target: &'a str,
    pub field: ModifierField,
}

impl<'a> FieldPath<'a> {
    pub fn parse(domain: EffectDomain, path: &'a str) -> EngineResult<Self> {
        let invalid = || EngineError::schema(domain.into(), path);
        let (target, field) = path.split_once('.').ok_or_else(invalid)?;
        let field = ModifierField::from_str(field).map_err(|_| invalid())?;
        if target.is_empty() {
            return Err(invalid());
        }
        Ok(Self { target, field })
    }
}

bitflags! {
    /// Augmentation slots relevant to the cybernetic-replacement override.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Augmentations: u8 {
        const TORSO_HEAD_REPLACEMENT = 1 << 0;
        const CHEETAH = 1 << 1;
        const GORILLA = 1 << 2;
        const LEOPARD = 1 << 3;
        const OSTRICH = 1 << 4;
    }
}

impl Augmentations {
    /// Effect name flagging a full torso/head replacement (in `stabilityCosts`).
    pub const TORSO_HEAD_REPLACEMENT_EFFECT: &'static str = "torsoHeadReplacement";

    /// Biological limb augmentations (in `abilities`) and the ability each one boosts.
    pub const LIMB_EFFECTS: [(Augmentations, &'static str, Ability); 4] = [
        (Self::CHEETAH, "cheetahAugmentation", Ability::Quickness),
        (Self::GORILLA, "gorillaAugmentation", Ability::Strength),
        (Self::LEOPARD, "leopardAugmentation", Ability::Agility),
        (Self::OSTRICH, "ostrichAugmentation", Ability::Endurance),
    ];

    /// Abilities whose `bioMod` a full replacement voids.
    pub fn voided_abilities(self) -> impl Iterator<Item = Ability> {
        let replaced = self.contains(Self::TORSO_HEAD_REPLACEMENT);
        Self::LIMB_EFFECTS
            .into_iter()
            .filter(move |(flag, _, _)| replaced && self.contains(*flag))
            .map(|(_, _, ability)| ability)
    }
}

/// Grouped modifier deltas for one recompute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EffectsOverlay {
    pub abilities: EffectMap,
    pub derived_ability_values: EffectMap,
    pub derived_ability_pools: EffectMap,
    pub skills: EffectMap,
    pub stability_costs: EffectMap,
}

impl EffectsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self, domain: EffectDomain) -> &EffectMap {
        match domain {
            EffectDomain::Abilities => &self.abilities,
            EffectDomain::DerivedAbilityValues => &self.derived_ability_values,
            EffectDomain::DerivedAbilityPools => &self.derived_ability_pools,
            EffectDomain::Skills => &self.skills,
            EffectDomain::StabilityCosts => &self.stability_costs,
        }
    }

    pub fn domain_mut(&mut self, domain: EffectDomain) -> &mut EffectMap {
        match domain {
            EffectDomain::Abilities => &mut self.abilities,
            EffectDomain::DerivedAbilityValues => &mut self.derived_ability_values,
            EffectDomain::DerivedAbilityPools => &mut self.derived_ability_pools,
            EffectDomain::Skills => &mut self.skills,
            EffectDomain::StabilityCosts => &mut self.stability_costs,
        }
    }

    /// Builder: add one `effect → path → value` entry.
    pub fn with(
        mut self,
        domain: EffectDomain,
        effect: impl Into<String>,
        path: impl Into<String>,
        value: i32,
    ) -> Self {
        self.domain_mut(domain)
            .entry(effect.into())
            .or_default()
            .insert(path.into(), value);
        self
    }

    /// Builder: add an effect with no fields (a flag).
    pub fn with_flag(mut self, domain: EffectDomain, effect: impl Into<String>) -> Self {
        self.domain_mut(domain).entry(effect.into()).or_default();
        self
    }

    /// Every `(effect, path, value)` entry of a domain.
    pub fn entries(&self, domain: EffectDomain) -> impl Iterator<Item = (&str, &str, i32)> {
        self.domain(domain).iter().flat_map(|(effect, fields)| {
            fields
                .iter()
                .map(move |(path, value)| (effect.as_str(), path.as_str(), *value))
        })
    }

    /// Every parsed `(effect, path, value)` entry of a modifier domain.
    pub fn field_entries(
        &self,
        domain: EffectDomain,
    ) -> impl Iterator<Item = EngineResult<(&str, FieldPath<'_>, i32)>> {
        self.entries(domain).map(move |(effect, path, value)| {
            FieldPath::parse(domain, path).map(|path| (effect, path, value))
        })
    }

    /// Every parsed `(effect, key, value)` entry of the stability-cost domain.
    pub fn stability_entries(
        &self,
    ) -> impl Iterator<Item = EngineResult<(&str, StabilityKey, i32)>> {
        self.entries(EffectDomain::StabilityCosts)
            .map(|(effect, key, value)| {
                StabilityKey::from_str(key)
                    .map(|key| (effect, key, value))
                    .map_err(|_| EngineError::schema(SchemaDomain::StabilityCosts, key))
            })
    }

    /// Sum of one stability key across every effect.
    pub fn stability_total(&self, wanted: StabilityKey) -> EngineResult<i32> {
        self.stability_entries().try_fold(0, |total, entry| {
            let (_, key, value) = entry?;
            Ok(if key == wanted { total + value } else { total })
        })
    }

    /// Augmentation flags derived from which effect names are present.
    pub fn augmentations(&self) -> Augmentations {
        let mut flags = Augmentations::empty();
        if self
            .stability_costs
            .contains_key(Augmentations::TORSO_HEAD_REPLACEMENT_EFFECT)
        {
            flags |= Augmentations::TORSO_HEAD_REPLACEMENT;
        }
        for (flag, effect, _) in Augmentations::LIMB_EFFECTS {
            if self.abilities.contains_key(effect) {
                flags |= flag;
            }
        }
        flags
    }

    pub fn is_empty(&self) -> bool {
        use strum::IntoEnumIterator;
        EffectDomain::iter().all(|domain| self.domain(domain).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths() {
        let path = FieldPath::parse(EffectDomain::Abilities, "strength.bioMod").unwrap();
        assert_eq!(path.target, "strength");
        assert_eq!(path.field, ModifierField::BioMod);

        for bad in ["strength", "strength.totalBonus", ".bonusMod", "strength.bonus_mod"] {
            assert_eq!(
                FieldPath::parse(EffectDomain::Abilities, bad).unwrap_err(),
                EngineError::schema(SchemaDomain::Abilities, bad)
            );
        }
    }

    #[test]
    fn flags_follow_effect_names() {
        let overlay = EffectsOverlay::new()
            .with(EffectDomain::Abilities, "cheetahAugmentation", "quickness.bioMod", 2)
            .with_flag(EffectDomain::Abilities, "ostrichAugmentation");
        let flags = overlay.augmentations();
        assert!(flags.contains(Augmentations::CHEETAH | Augmentations::OSTRICH));
        assert!(!flags.contains(Augmentations::TORSO_HEAD_REPLACEMENT));
        assert_eq!(flags.voided_abilities().count(), 0);

        let replaced = overlay.with(
            EffectDomain::StabilityCosts,
            "torsoHeadReplacement",
            "stabilityCost",
            3,
        );
        let voided: Vec<_> = replaced.augmentations().voided_abilities().collect();
        assert_eq!(voided, vec![Ability::Quickness, Ability::Endurance]);
    }

    #[test]
    fn stability_totals() {
        let overlay = EffectsOverlay::new()
            .with(EffectDomain::StabilityCosts, "cyberArm", "stabilityCost", 2)
            .with(EffectDomain::StabilityCosts, "cyberArm", "limbPenalty", 1)
            .with(EffectDomain::StabilityCosts, "cyberEye", "stabilityCost", 1);
        assert_eq!(overlay.stability_total(StabilityKey::StabilityCost), Ok(3));
        assert_eq!(overlay.stability_total(StabilityKey::LimbPenalty), Ok(1));

        let bad = overlay.with(EffectDomain::StabilityCosts, "cyberLeg", "weight", 4);
        assert_eq!(
            bad.stability_total(StabilityKey::StabilityCost),
            Err(EngineError::schema(SchemaDomain::StabilityCosts, "weight"))
        );
    }

    #[test]
    fn empty_overlay() {
        assert!(EffectsOverlay::new().is_empty());
        assert_eq!(EffectsOverlay::new().entries(EffectDomain::Skills).count(), 0);
    }
}
