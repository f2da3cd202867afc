//! Character sheet data model and derived stat engine.
//!
//! `sheet-core` defines the character record (abilities, derived values,
//! pools, skills and magic words), the transient effects overlay, and the
//! pure recompute that rewrites every derived field. The host application
//! persists records and supplies overlays; nothing here performs I/O.
//! All derived state flows through [`engine::Engine`].
pub mod config;
pub mod dice;
pub mod effects;
pub mod engine;
pub mod error;
pub mod stats;

pub use config::{Governing, ModifierBounds, Ruleset, RulesetSpec, StatBounds};
pub use dice::{StepDie, TrainingTier};
pub use effects::{Augmentations, EffectDomain, EffectsOverlay, FieldPath, StabilityKey};
pub use engine::Engine;
pub use error::{EngineError, EngineResult, ErrorSeverity, SchemaDomain};
pub use stats::{
    Ability, AbilityScore, Character, DerivedPool, DerivedValue, DerivedValueKind, ModifierField,
    Modifiers, PoolKind, SkillEntry, SkillFamily, SkillTable,
};
