//! Skills and magic words.
//!
//! Four structurally identical families. Each entry is governed by two
//! abilities; the better of their dice caps the training tier.

use super::ability::Ability;
use super::modifiers::Modifiers;
use crate::dice::TrainingTier;

/// Which family an entry belongs to.
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
pub enum SkillFamily {
    Skills,
    ActionWords,
    PowerWords,
    TargetWords,
}

/// Stored state of one skill or magic word.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SkillEntry {
    pub attr1: Ability,
    pub attr2: Ability,

    #[cfg_attr(feature = "serde", serde(flatten))]
    pub modifiers: Modifiers,

    /// Free-form, set by the player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub training_status: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub max_training_status: TrainingTier,

    #[cfg_attr(feature = "serde", serde(default))]
    pub total_bonus: i32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub negative_bonus: bool,
}

impl SkillEntry {
    pub fn new(attr1: Ability, attr2: Ability) -> Self {
        Self {
            attr1,
            attr2,
            modifiers: Modifiers::default(),
            training_status: String::new(),
            max_training_status: TrainingTier::default(),
            total_bonus: 0,
            negative_bonus: false,
        }
    }

    pub(crate) fn refresh_total(&mut self) {
        self.total_bonus = self.modifiers.skill_total();
        self.negative_bonus = self.total_bonus < 0;
    }
}
