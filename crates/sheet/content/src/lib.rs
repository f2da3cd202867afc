//! Data-driven content for character sheets.
//!
//! This crate reads the files the host or the developer tools hand to the engine:
//! - Rulesets (governing-ability tables, modifier bounds) via TOML
//! - Character records (host document format) via JSON
//! - Effects overlays via JSON or RON
//!
//! Everything loaded here is validated by `sheet-core` types; nothing in this
//! crate computes derived stats.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, ContentFactory, OverlayLoader, RulesetLoader};
