//! Character data model.
//!
//! # Layout
//!
//! ```text
//! [ Abilities ]            die + five modifiers → totalBonus
//!      ↓
//! [ Derived Values ]       ability pair → defenses, fatigue, pace, stability
//! [ Derived Pools ]        ability pair → capacity die + current die
//! [ Skills / Magic Words ] ability pair dice → training tier
//! ```
//!
//! Stored fields are edited by the player or folded in from effects; derived
//! fields are only written by [`crate::Engine`].

pub mod ability;
pub mod character;
pub mod derived;
pub mod modifiers;
pub mod pools;
pub mod skills;

pub use ability::{Ability, AbilityScore};
pub use character::{Character, SkillTable};
pub use derived::{DerivedValue, DerivedValueKind};
pub use modifiers::{ModifierField, Modifiers};
pub use pools::{DerivedPool, PoolKind};
pub use skills::{SkillEntry, SkillFamily};
