//! Abilities - the eight base attributes every other stat reads from.

use super::modifiers::Modifiers;
use crate::dice::StepDie;

/// The eight base attributes of a character.
///
/// Physical: agility, endurance, quickness, strength.
/// Mental: charisma, intellect, perception, willpower.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum Ability {
    Agility,
    Charisma,
    Endurance,
    Intellect,
    Perception,
    Quickness,
    Strength,
    Willpower,
}

/// Stored state of one ability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct AbilityScore {
    pub die: StepDie,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub modifiers: Modifiers,

    /// Derived: `bonusMod + hindranceMod + traitMod + max(cyberMod, bioMod)`
    pub total_bonus: i32,
}

impl AbilityScore {
    pub fn new(die: StepDie) -> Self {
        Self {
            die,
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub(crate) fn refresh_total(&mut self) {
        self.total_bonus = self.modifiers.ability_total();
    }
}
