//! The character record - every stored and derived field of one sheet.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::ability::{Ability, AbilityScore};
use super::derived::{DerivedValue, DerivedValueKind};
use super::pools::{DerivedPool, PoolKind};
use super::skills::{SkillEntry, SkillFamily};
use crate::config::Ruleset;
use crate::dice::StepDie;
use crate::error::{EngineError, EngineResult, SchemaDomain};

/// Skill or word entries keyed by identifier.
pub type SkillTable = BTreeMap<String, SkillEntry>;

/// One character sheet.
///
/// The host persists this record; the engine overwrites the derived fields
/// (`totalBonus`, `curStability`, pool capacity, training tiers) in place.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Character {
    pub abilities: BTreeMap<Ability, AbilityScore>,
    pub derived_ability_values: BTreeMap<DerivedValueKind, DerivedValue>,
    pub derived_ability_pools: BTreeMap<PoolKind, DerivedPool>,
    pub skills: SkillTable,
    pub action_words: SkillTable,
    pub power_words: SkillTable,
    pub target_words: SkillTable,

    /// Stability left after cybernetic surcharges. May be negative (overloaded).
    pub cur_stability: i32,
}

impl Character {
    /// `curStability` before the first recompute.
    pub const STABILITY_NOT_COMPUTED: i32 = -99;

    /// A blank sheet with every ability, derived value, pool and ruleset entry
    /// present. Abilities start at `d4`; derived fields hold their defaults
    /// until the first recompute.
    pub fn new(ruleset: &Ruleset) -> Self {
        let mut character = Self {
            abilities: Ability::iter()
                .map(|ability| (ability, AbilityScore::new(StepDie::D4)))
                .collect(),
            derived_ability_values: DerivedValueKind::iter()
                .map(|kind| (kind, DerivedValue::default()))
                .collect(),
            derived_ability_pools: PoolKind::iter()
                .map(|kind| (kind, DerivedPool::default()))
                .collect(),
            ..Default::default()
        };
        for family in SkillFamily::iter() {
            let table = character.family_mut(family);
            for (id, governing) in ruleset.entries(family) {
                table.insert(
                    id.to_string(),
                    SkillEntry::new(governing.attr1, governing.attr2),
                );
            }
        }
        character
    }

    /// Builder: set one ability's die.
    pub fn with_die(mut self, ability: Ability, die: StepDie) -> Self {
        self.abilities.entry(ability).or_default().die = die;
        self
    }

    pub fn family(&self, family: SkillFamily) -> &SkillTable {
        match family {
            SkillFamily::Skills => &self.skills,
            SkillFamily::ActionWords => &self.action_words,
            SkillFamily::PowerWords => &self.power_words,
            SkillFamily::TargetWords => &self.target_words,
        }
    }

    pub fn family_mut(&mut self, family: SkillFamily) -> &mut SkillTable {
        match family {
            SkillFamily::Skills => &mut self.skills,
            SkillFamily::ActionWords => &mut self.action_words,
            SkillFamily::PowerWords => &mut self.power_words,
            SkillFamily::TargetWords => &mut self.target_words,
        }
    }

    pub fn ability(&self, ability: Ability) -> EngineResult<&AbilityScore> {
        lookup_ability(&self.abilities, ability)
    }

    pub fn ability_mut(&mut self, ability: Ability) -> EngineResult<&mut AbilityScore> {
        self.abilities
            .get_mut(&ability)
            .ok_or_else(|| EngineError::schema(SchemaDomain::Abilities, ability.as_ref()))
    }

    pub fn value(&self, kind: DerivedValueKind) -> Option<&DerivedValue> {
        self.derived_ability_values.get(&kind)
    }

    pub fn pool(&self, kind: PoolKind) -> Option<&DerivedPool> {
        self.derived_ability_pools.get(&kind)
    }

    pub fn pool_mut(&mut self, kind: PoolKind) -> Option<&mut DerivedPool> {
        self.derived_ability_pools.get_mut(&kind)
    }

    /// Find a skill or word in any family.
    pub fn skill(&self, id: &str) -> Option<&SkillEntry> {
        SkillFamily::iter().find_map(|family| self.family(family).get(id))
    }
}

impl Default for Character {
    fn default() -> Self {
        Self {
            abilities: BTreeMap::new(),
            derived_ability_values: BTreeMap::new(),
            derived_ability_pools: BTreeMap::new(),
            skills: SkillTable::new(),
            action_words: SkillTable::new(),
            power_words: SkillTable::new(),
            target_words: SkillTable::new(),
            cur_stability: Self::STABILITY_NOT_COMPUTED,
        }
    }
}

/// Ability lookup usable while other fields of the record are borrowed mutably.
pub(crate) fn lookup_ability(
    abilities: &BTreeMap<Ability, AbilityScore>,
    ability: Ability,
) -> EngineResult<&AbilityScore> {
    abilities
        .get(&ability)
        .ok_or_else(|| EngineError::schema(SchemaDomain::Abilities, ability.as_ref()))
}
