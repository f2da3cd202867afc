//! Modifier components shared by abilities, skills and magic words.
//!
//! Five additive components feed every total:
//!
//! ```text
//! bonusMod + hindranceMod + traitMod + (cyberMod, bioMod)
//! ```
//!
//! Abilities take the better of the cyber/bio pair, skills add both.

/// One of the five modifier components an effect can target.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase")]
pub enum ModifierField {
    BonusMod,
    HindranceMod,
    TraitMod,
    CyberMod,
    BioMod,
}

impl ModifierField {
    /// Combine a stored value with an incoming effect value.
    ///
    /// Hindrances only ever worsen (min); every other component only ever
    /// improves (max). Both are commutative, so overlay order never matters.
    pub fn fold(self, current: i32, incoming: i32) -> i32 {
        match self {
            ModifierField::HindranceMod => current.min(incoming),
            _ => current.max(incoming),
        }
    }

    pub const fn is_hindrance(self) -> bool {
        matches!(self, ModifierField::HindranceMod)
    }
}

/// The five stored modifier components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Modifiers {
    pub bonus_mod: i32,
    pub hindrance_mod: i32,
    pub trait_mod: i32,
    pub cyber_mod: i32,
    pub bio_mod: i32,
}

impl Modifiers {
    pub fn get(&self, field: ModifierField) -> i32 {
        match field {
            ModifierField::BonusMod => self.bonus_mod,
            ModifierField::HindranceMod => self.hindrance_mod,
            ModifierField::TraitMod => self.trait_mod,
            ModifierField::CyberMod => self.cyber_mod,
            ModifierField::BioMod => self.bio_mod,
        }
    }

    pub fn get_mut(&mut self, field: ModifierField) -> &mut i32 {
        match field {
            ModifierField::BonusMod => &mut self.bonus_mod,
            ModifierField::HindranceMod => &mut self.hindrance_mod,
            ModifierField::TraitMod => &mut self.trait_mod,
            ModifierField::CyberMod => &mut self.cyber_mod,
            ModifierField::BioMod => &mut self.bio_mod,
        }
    }

    /// Fold an incoming effect value into one component.
    pub fn fold(&mut self, field: ModifierField, incoming: i32) {
        let slot = self.get_mut(field);
        *slot = field.fold(*slot, incoming);
    }

    /// Ability total: cyber and bio augmentations do not stack.
    pub fn ability_total(&self) -> i32 {
        self.bonus_mod + self.hindrance_mod + self.trait_mod + self.cyber_mod.max(self.bio_mod)
    }

    /// Skill/word total: every component adds.
    pub fn skill_total(&self) -> i32 {
        self.bonus_mod + self.hindrance_mod + self.trait_mod + self.cyber_mod + self.bio_mod
    }
}
