//! Ruleset - the immutable configuration the engine is bound to.
//!
//! A ruleset names which two abilities govern every derived value, pool, skill
//! and magic word, plus the valid range of each modifier. The standard ruleset
//! is built once on first use; custom rulesets come from a [`RulesetSpec`]
//! (usually loaded from TOML by `sheet-content`).

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{EngineError, EngineResult, SchemaDomain};
use crate::stats::{Ability, DerivedValueKind, ModifierField, PoolKind, SkillFamily};

/// Inclusive range for one kind of stored number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Bonus-type modifiers (bonus, trait, cyber, bio) [-20, 20]
    pub const MODIFIER: Self = Self { min: -20, max: 20 };

    /// Hindrances never improve a stat [-20, 0]
    pub const HINDRANCE: Self = Self { min: -20, max: 0 };

    /// Stability surcharge of a single cybernetic effect [0, 20]
    pub const STABILITY_COST: Self = Self { min: 0, max: 20 };

    /// Health reduction of a single cybernetic limb [0, 20]
    pub const LIMB_PENALTY: Self = Self { min: 0, max: 20 };

    /// Stability left after surcharges [-99, 20]
    pub const CUR_STABILITY: Self = Self { min: -99, max: 20 };

    pub const fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject `value` if it is outside the range. `field` is only built on failure.
    pub fn check(&self, value: i32, field: impl FnOnce() -> String) -> EngineResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(EngineError::out_of_range(field(), value, self.min, self.max))
        }
    }
}

/// Bounds applied to stored fields and overlay values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ModifierBounds {
    pub modifier: StatBounds,
    pub hindrance: StatBounds,
    pub stability_cost: StatBounds,
    pub limb_penalty: StatBounds,
    pub cur_stability: StatBounds,
}

impl ModifierBounds {
    pub fn for_field(&self, field: ModifierField) -> StatBounds {
        if field.is_hindrance() {
            self.hindrance
        } else {
            self.modifier
        }
    }
}

impl Default for ModifierBounds {
    fn default() -> Self {
        Self {
            modifier: StatBounds::MODIFIER,
            hindrance: StatBounds::HINDRANCE,
            stability_cost: StatBounds::STABILITY_COST,
            limb_penalty: StatBounds::LIMB_PENALTY,
            cur_stability: StatBounds::CUR_STABILITY,
        }
    }
}

/// Governing abilities of one skill or magic word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Governing {
    pub family: SkillFamily,
    pub attr1: Ability,
    pub attr2: Ability,
}

/// Unvalidated ruleset, in document form.
///
/// Derived value and pool keys are plain strings so that a typo surfaces as a
/// [`EngineError::SchemaViolation`] naming the offending key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RulesetSpec {
    pub derived_values: BTreeMap<String, [Ability; 2]>,
    pub derived_pools: BTreeMap<String, [Ability; 2]>,
    pub skills: BTreeMap<String, [Ability; 2]>,
    pub action_words: BTreeMap<String, [Ability; 2]>,
    pub power_words: BTreeMap<String, [Ability; 2]>,
    pub target_words: BTreeMap<String, [Ability; 2]>,
    pub bounds: ModifierBounds,
}

impl RulesetSpec {
    fn family(&self, family: SkillFamily) -> &BTreeMap<String, [Ability; 2]> {
        match family {
            SkillFamily::Skills => &self.skills,
            SkillFamily::ActionWords => &self.action_words,
            SkillFamily::PowerWords => &self.power_words,
            SkillFamily::TargetWords => &self.target_words,
        }
    }

    fn family_mut(&mut self, family: SkillFamily) -> &mut BTreeMap<String, [Ability; 2]> {
        match family {
            SkillFamily::Skills => &mut self.skills,
            SkillFamily::ActionWords => &mut self.action_words,
            SkillFamily::PowerWords => &mut self.power_words,
            SkillFamily::TargetWords => &mut self.target_words,
        }
    }
}

/// Validated, immutable ruleset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ruleset {
    values: BTreeMap<DerivedValueKind, [Ability; 2]>,
    pools: BTreeMap<PoolKind, [Ability; 2]>,
    governing: BTreeMap<String, Governing>,
    bounds: ModifierBounds,
}

static STANDARD: LazyLock<Ruleset> = LazyLock::new(|| {
    let mut spec = RulesetSpec::default();
    for (kind, pair) in STANDARD_VALUES {
        spec.derived_values.insert(kind.to_string(), pair);
    }
    for (kind, pair) in STANDARD_POOLS {
        spec.derived_pools.insert(kind.to_string(), pair);
    }
    for (family, id, attr1, attr2) in STANDARD_TABLE {
        spec.family_mut(*family).insert((*id).to_string(), [*attr1, *attr2]);
    }
    Ruleset::from_spec(spec).unwrap_or_else(|err| panic!("standard ruleset is invalid: {err}"))
});

impl Ruleset {
    /// The built-in ruleset.
    pub fn standard() -> &'static Ruleset {
        &STANDARD
    }

    /// The built-in ruleset in document form, as a starting point for custom rulesets.
    pub fn standard_spec() -> RulesetSpec {
        Self::standard().to_spec()
    }

    /// Validate a ruleset document.
    ///
    /// Every derived value and pool must have a pairing, and skill/word
    /// identifiers must be unique across all four families.
    pub fn from_spec(spec: RulesetSpec) -> EngineResult<Self> {
        let mut values = BTreeMap::new();
        for (name, pair) in &spec.derived_values {
            let kind = DerivedValueKind::from_str(name)
                .map_err(|_| EngineError::schema(SchemaDomain::DerivedAbilityValues, name))?;
            values.insert(kind, *pair);
        }

        let mut pools = BTreeMap::new();
        for (name, pair) in &spec.derived_pools {
            let kind = PoolKind::from_str(name)
                .map_err(|_| EngineError::schema(SchemaDomain::DerivedAbilityPools, name))?;
            pools.insert(kind, *pair);
        }

        use strum::IntoEnumIterator;
        if let Some(missing) = DerivedValueKind::iter().find(|kind| !values.contains_key(kind)) {
            return Err(EngineError::schema(SchemaDomain::Ruleset, missing.as_ref()));
        }
        if let Some(missing) = PoolKind::iter().find(|kind| !pools.contains_key(kind)) {
            return Err(EngineError::schema(SchemaDomain::Ruleset, missing.as_ref()));
        }

        let mut governing = BTreeMap::new();
        for family in SkillFamily::iter() {
            for (id, [attr1, attr2]) in spec.family(family) {
                let entry = Governing {
                    family,
                    attr1: *attr1,
                    attr2: *attr2,
                };
                if governing.insert(id.clone(), entry).is_some() {
                    return Err(EngineError::schema(SchemaDomain::Ruleset, id));
                }
            }
        }

        Ok(Self {
            values,
            pools,
            governing,
            bounds: spec.bounds,
        })
    }

    /// Convert back into document form.
    pub fn to_spec(&self) -> RulesetSpec {
        let mut spec = RulesetSpec {
            bounds: self.bounds,
            ..Default::default()
        };
        for (kind, pair) in &self.values {
            spec.derived_values.insert(kind.to_string(), *pair);
        }
        for (kind, pair) in &self.pools {
            spec.derived_pools.insert(kind.to_string(), *pair);
        }
        for (id, entry) in &self.governing {
            spec.family_mut(entry.family)
                .insert(id.clone(), [entry.attr1, entry.attr2]);
        }
        spec
    }

    pub fn value_pair(&self, kind: DerivedValueKind) -> EngineResult<[Ability; 2]> {
        self.values
            .get(&kind)
            .copied()
            .ok_or_else(|| EngineError::schema(SchemaDomain::DerivedAbilityValues, kind.as_ref()))
    }

    pub fn pool_pair(&self, kind: PoolKind) -> EngineResult<[Ability; 2]> {
        self.pools
            .get(&kind)
            .copied()
            .ok_or_else(|| EngineError::schema(SchemaDomain::DerivedAbilityPools, kind.as_ref()))
    }

    /// Governing abilities of a skill or magic word, by identifier.
    pub fn governing(&self, id: &str) -> EngineResult<&Governing> {
        self.governing
            .get(id)
            .ok_or_else(|| EngineError::schema(SchemaDomain::Skills, id))
    }

    /// Every identifier of one family, in sorted order.
    pub fn entries(&self, family: SkillFamily) -> impl Iterator<Item = (&str, &Governing)> {
        self.governing
            .iter()
            .filter(move |(_, entry)| entry.family == family)
            .map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn bounds(&self) -> &ModifierBounds {
        &self.bounds
    }
}

// ============================================================================
// Standard tables
// ============================================================================

const STANDARD_VALUES: [(DerivedValueKind, [Ability; 2]); 6] = [
    (DerivedValueKind::MeleeDefense, [Ability::Agility, Ability::Strength]),
    (DerivedValueKind::RangedDefense, [Ability::Agility, Ability::Perception]),
    (DerivedValueKind::Fatigue, [Ability::Endurance, Ability::Strength]),
    (DerivedValueKind::Initiative, [Ability::Perception, Ability::Quickness]),
    (DerivedValueKind::Pace, [Ability::Agility, Ability::Quickness]),
    (DerivedValueKind::Stability, [Ability::Endurance, Ability::Willpower]),
];

const STANDARD_POOLS: [(PoolKind, [Ability; 2]); 7] = [
    (PoolKind::Cybernetic, [Ability::Endurance, Ability::Intellect]),
    (PoolKind::Faith, [Ability::Charisma, Ability::Willpower]),
    (PoolKind::Health, [Ability::Endurance, Ability::Strength]),
    (PoolKind::Mana, [Ability::Intellect, Ability::Willpower]),
    (PoolKind::Psychic, [Ability::Intellect, Ability::Perception]),
    (PoolKind::PaceDie, [Ability::Agility, Ability::Quickness]),
    (PoolKind::Resource, [Ability::Charisma, Ability::Intellect]),
];

use Ability::*;
use SkillFamily::*;

const STANDARD_TABLE: &[(SkillFamily, &str, Ability, Ability)] = &[
    (Skills, "acrobatics", Agility, Quickness),
    (Skills, "athletics", Strength, Endurance),
    (Skills, "brawling", Strength, Agility),
    (Skills, "deception", Charisma, Intellect),
    (Skills, "firearms", Perception, Agility),
    (Skills, "intimidation", Charisma, Strength),
    (Skills, "investigation", Intellect, Perception),
    (Skills, "medicine", Intellect, Willpower),
    (Skills, "melee", Strength, Quickness),
    (Skills, "persuasion", Charisma, Willpower),
    (Skills, "piloting", Quickness, Perception),
    (Skills, "stealth", Agility, Perception),
    (Skills, "survival", Endurance, Perception),
    (Skills, "technology", Intellect, Quickness),
    (ActionWords, "control", Willpower, Charisma),
    (ActionWords, "create", Intellect, Willpower),
    (ActionWords, "destroy", Strength, Willpower),
    (ActionWords, "move", Quickness, Willpower),
    (ActionWords, "sense", Perception, Willpower),
    (ActionWords, "transform", Intellect, Charisma),
    (PowerWords, "air", Quickness, Agility),
    (PowerWords, "earth", Endurance, Strength),
    (PowerWords, "fire", Willpower, Strength),
    (PowerWords, "life", Endurance, Charisma),
    (PowerWords, "light", Perception, Charisma),
    (PowerWords, "mind", Intellect, Perception),
    (PowerWords, "shadow", Agility, Perception),
    (PowerWords, "water", Willpower, Endurance),
    (TargetWords, "area", Willpower, Intellect),
    (TargetWords, "creature", Charisma, Perception),
    (TargetWords, "self", Willpower, Endurance),
    (TargetWords, "sight", Perception, Intellect),
    (TargetWords, "touch", Agility, Strength),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ruleset_covers_every_kind() {
        let ruleset = Ruleset::standard();
        use strum::IntoEnumIterator;
        for kind in DerivedValueKind::iter() {
            assert!(ruleset.value_pair(kind).is_ok());
        }
        for kind in PoolKind::iter() {
            assert!(ruleset.pool_pair(kind).is_ok());
        }
        assert_eq!(ruleset.entries(SkillFamily::Skills).count(), 14);
        assert_eq!(ruleset.entries(SkillFamily::TargetWords).count(), 5);
    }

    #[test]
    fn governing_lookup() {
        let ruleset = Ruleset::standard();
        let athletics = ruleset.governing("athletics").unwrap();
        assert_eq!(athletics.family, SkillFamily::Skills);
        assert_eq!((athletics.attr1, athletics.attr2), (Strength, Endurance));

        let err = ruleset.governing("juggling").unwrap_err();
        assert_eq!(err, EngineError::schema(SchemaDomain::Skills, "juggling"));
    }

    #[test]
    fn spec_round_trip() {
        let spec = Ruleset::standard_spec();
        let rebuilt = Ruleset::from_spec(spec).unwrap();
        assert_eq!(&rebuilt, Ruleset::standard());
    }

    #[test]
    fn duplicate_identifier_across_families_is_rejected() {
        let mut spec = Ruleset::standard_spec();
        spec.power_words.insert("stealth".into(), [Agility, Agility]);
        let err = Ruleset::from_spec(spec).unwrap_err();
        assert_eq!(err, EngineError::schema(SchemaDomain::Ruleset, "stealth"));
    }

    #[test]
    fn unknown_or_missing_pairings_are_rejected() {
        let mut spec = Ruleset::standard_spec();
        spec.derived_pools.insert("luck".into(), [Charisma, Perception]);
        assert_eq!(
            Ruleset::from_spec(spec).unwrap_err(),
            EngineError::schema(SchemaDomain::DerivedAbilityPools, "luck")
        );

        let mut spec = Ruleset::standard_spec();
        spec.derived_values.remove("pace");
        assert_eq!(
            Ruleset::from_spec(spec).unwrap_err(),
            EngineError::schema(SchemaDomain::Ruleset, "pace")
        );
    }

    #[test]
    fn bounds() {
        let bounds = ModifierBounds::default();
        assert_eq!(bounds.for_field(ModifierField::HindranceMod), StatBounds::HINDRANCE);
        assert_eq!(bounds.for_field(ModifierField::BioMod), StatBounds::MODIFIER);
        assert!(StatBounds::HINDRANCE.check(1, || "x".into()).is_err());
        assert!(StatBounds::HINDRANCE.check(-3, || "x".into()).is_ok());
    }
}
