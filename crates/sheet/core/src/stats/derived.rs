//! Derived ability values - defenses and other scores computed from ability pairs.
//!
//! ```text
//! bonusMod   = max(0, floor((A.totalBonus + B.totalBonus) / 2)) + offset
//! totalBonus = bonusMod + hindranceMod + traitMod
//! ```
//!
//! Stability skips the `max(0, _)` on the average and floors its total at zero
//! instead. Current stability is tracked on the character record.

use super::modifiers::ModifierField;

/// Which derived value a record describes.
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
pub enum DerivedValueKind {
    MeleeDefense,
    RangedDefense,
    Fatigue,
    Initiative,
    Pace,
    Stability,
}

impl DerivedValueKind {
    /// Flat amount added on top of the ability average.
    pub const fn flat_offset(self) -> i32 {
        match self {
            DerivedValueKind::MeleeDefense
            | DerivedValueKind::RangedDefense
            | DerivedValueKind::Stability => 0,
            DerivedValueKind::Fatigue | DerivedValueKind::Initiative => 1,
            DerivedValueKind::Pace => 2,
        }
    }

    /// Compute `bonusMod` from the two governing ability totals.
    pub fn base_bonus(self, first: i32, second: i32) -> i32 {
        let average = (first + second).div_euclid(2);
        match self {
            DerivedValueKind::Stability => average,
            _ => average.max(0) + self.flat_offset(),
        }
    }
}

/// Stored state of one derived value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DerivedValue {
    pub bonus_mod: i32,
    pub hindrance_mod: i32,
    pub trait_mod: i32,
    pub total_bonus: i32,
}

impl DerivedValue {
    /// Externally settable component. `bonusMod` is computed, so effects cannot target it.
    pub fn modifier_mut(&mut self, field: ModifierField) -> Option<&mut i32> {
        match field {
            ModifierField::HindranceMod => Some(&mut self.hindrance_mod),
            ModifierField::TraitMod => Some(&mut self.trait_mod),
            _ => None,
        }
    }

    pub(crate) fn refresh(&mut self, kind: DerivedValueKind, first: i32, second: i32) {
        self.bonus_mod = kind.base_bonus(first, second);
        let total = self.bonus_mod + self.hindrance_mod + self.trait_mod;
        self.total_bonus = match kind {
            DerivedValueKind::Stability => total.max(0),
            _ => total,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_per_kind() {
        assert_eq!(DerivedValueKind::MeleeDefense.base_bonus(3, 4), 3);
        assert_eq!(DerivedValueKind::Fatigue.base_bonus(3, 4), 4);
        assert_eq!(DerivedValueKind::Initiative.base_bonus(2, 2), 3);
        assert_eq!(DerivedValueKind::Pace.base_bonus(2, 2), 4);
    }

    #[test]
    fn negative_average_floors_before_offset() {
        assert_eq!(DerivedValueKind::RangedDefense.base_bonus(-3, -2), 0);
        assert_eq!(DerivedValueKind::Pace.base_bonus(-3, -2), 2);
        // floor(-5 / 2) = -3, not -2
        assert_eq!(DerivedValueKind::Stability.base_bonus(-3, -2), -3);
    }

    #[test]
    fn stability_total_never_negative() {
        let mut value = DerivedValue {
            hindrance_mod: -2,
            ..Default::default()
        };
        value.refresh(DerivedValueKind::Stability, 1, 0);
        assert_eq!(value.bonus_mod, 0);
        assert_eq!(value.total_bonus, 0);

        let mut defense = DerivedValue {
            hindrance_mod: -2,
            ..Default::default()
        };
        defense.refresh(DerivedValueKind::MeleeDefense, 1, 0);
        assert_eq!(defense.total_bonus, -2);
    }

    #[test]
    fn computed_bonus_is_not_targetable() {
        let mut value = DerivedValue::default();
        assert!(value.modifier_mut(ModifierField::BonusMod).is_none());
        assert!(value.modifier_mut(ModifierField::CyberMod).is_none());
        assert!(value.modifier_mut(ModifierField::TraitMod).is_some());
    }
}
