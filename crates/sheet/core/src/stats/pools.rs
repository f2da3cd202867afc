//! Derived ability pools - resources expressed as a step die.
//!
//! Pools are partially stored:
//! - `calc` and `die`: computed from the governing abilities (capacity)
//! - `currentDie`: game state, spent and refilled by the player
//!
//! Formula: `calc = floor((A + B) / 2) + hindranceMod + traitMod + adjustments`

use super::modifiers::ModifierField;
use crate::dice::StepDie;

/// Which pool a record describes.
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
pub enum PoolKind {
    Cybernetic,
    Faith,
    Health,
    Mana,
    Psychic,
    PaceDie,
    Resource,
}

impl PoolKind {
    /// Flat base added to the capacity score.
    pub const fn base(self) -> i32 {
        match self {
            PoolKind::Resource => 2,
            _ => 0,
        }
    }

    /// Whether cybernetic limbs reduce this pool's capacity.
    pub const fn takes_limb_penalty(self) -> bool {
        matches!(self, PoolKind::Health)
    }

    /// Whether `currentDie` is recomputed every time instead of tracked.
    pub const fn always_resets(self) -> bool {
        matches!(self, PoolKind::PaceDie)
    }

    pub fn die_for(self, calc: i32) -> StepDie {
        match self {
            PoolKind::Cybernetic => StepDie::from_cybernetic_capacity(calc),
            _ => StepDie::from_capacity(calc),
        }
    }
}

/// Stored state of one pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct DerivedPool {
    pub hindrance_mod: i32,
    pub trait_mod: i32,
    pub calc: i32,
    pub die: StepDie,

    /// Remaining value. `None` (or `""` in host documents) resets to `die`.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "blank_die::deserialize"))]
    pub current_die: Option<StepDie>,
}

impl DerivedPool {
    pub fn modifier_mut(&mut self, field: ModifierField) -> Option<&mut i32> {
        match field {
            ModifierField::HindranceMod => Some(&mut self.hindrance_mod),
            ModifierField::TraitMod => Some(&mut self.trait_mod),
            _ => None,
        }
    }

    /// Spend one step of the pool. Returns the new current die.
    pub fn spend_step(&mut self) -> StepDie {
        let next = self.current_die.unwrap_or(self.die).step_down();
        self.current_die = Some(next);
        next
    }

    /// Refill the pool to capacity.
    pub fn refill(&mut self) {
        self.current_die = Some(self.die);
    }

    pub(crate) fn refresh(&mut self, kind: PoolKind, first: i32, second: i32, limb_penalty: i32) {
        let mut calc = (first + second).div_euclid(2) + self.hindrance_mod + self.trait_mod;
        if kind.takes_limb_penalty() {
            calc -= limb_penalty;
        }
        self.calc = calc + kind.base();
        self.die = kind.die_for(self.calc);

        self.current_die = match self.current_die {
            Some(current) if !kind.always_resets() => Some(current.min(self.die)),
            _ => Some(self.die),
        };
    }
}

#[cfg(feature = "serde")]
mod blank_die {
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};

    use crate::dice::StepDie;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<StepDie>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(token) if token.trim().is_empty() => Ok(None),
            Some(token) => StepDie::from_str(token.trim())
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("unknown step die `{token}`"))),
        }
    }
}
