//! Step dice - the shared rank ladder used by abilities, pools and training tiers.
//!
//! Every stage that compares or derives a die goes through this module:
//!
//! ```text
//! d0 < d1 < d2 < d4 < d6 < d8 < d10 < d12
//! ```
//!
//! - Pool capacity (`calc`) maps to a die through [`StepDie::from_capacity`]
//! - Training tiers read [`StepDie::training_ordinal`] (0 = d12 ... 5 = d2)

/// A step die rank.
///
/// The declaration order is the rank order, so `Ord` compares dice by size.
/// `d0` and `d1` only appear on pools at zero or one capacity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StepDie {
    D0,
    D1,
    D2,
    #[default]
    D4,
    D6,
    D8,
    D10,
    D12,
}

/// Capacity thresholds shared by every pool: `calc < bound` selects the die.
const CAPACITY_LADDER: [(i32, StepDie); 4] = [
    (3, StepDie::D4),
    (5, StepDie::D6),
    (7, StepDie::D8),
    (9, StepDie::D10),
];

impl StepDie {
    /// All dice from smallest to largest.
    pub const LADDER: [StepDie; 8] = [
        StepDie::D0,
        StepDie::D1,
        StepDie::D2,
        StepDie::D4,
        StepDie::D6,
        StepDie::D8,
        StepDie::D10,
        StepDie::D12,
    ];

    /// Position on the ladder, 0 for d0 up to 7 for d12.
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Number of faces (0 for the d0 sentinel).
    pub const fn faces(self) -> u8 {
        match self {
            StepDie::D0 => 0,
            StepDie::D1 => 1,
            StepDie::D2 => 2,
            StepDie::D4 => 4,
            StepDie::D6 => 6,
            StepDie::D8 => 8,
            StepDie::D10 => 10,
            StepDie::D12 => 12,
        }
    }

    /// Map a pool capacity score to its die.
    ///
    /// `calc < 3 → d4, < 5 → d6, < 7 → d8, < 9 → d10, else d12`
    pub fn from_capacity(calc: i32) -> Self {
        CAPACITY_LADDER
            .iter()
            .find(|(bound, _)| calc < *bound)
            .map(|(_, die)| *die)
            .unwrap_or(StepDie::D12)
    }

    /// Capacity mapping for the cybernetic pool: exactly zero capacity is `d0`.
    ///
    /// Negative capacities follow the standard thresholds like any other pool.
    pub fn from_cybernetic_capacity(calc: i32) -> Self {
        if calc == 0 {
            StepDie::D0
        } else {
            Self::from_capacity(calc)
        }
    }

    /// Ordinal used for training tiers: 0 = d12 (best) ... 5 = d2, 6 = d1, 7 = d0.
    pub const fn training_ordinal(self) -> usize {
        StepDie::D12.rank() - self.rank()
    }

    /// Next larger die, saturating at d12.
    pub fn step_up(self) -> Self {
        Self::LADDER
            .get(self.rank() + 1)
            .copied()
            .unwrap_or(StepDie::D12)
    }

    /// Next smaller die, saturating at d0.
    pub fn step_down(self) -> Self {
        match self.rank() {
            0 => StepDie::D0,
            rank => Self::LADDER[rank - 1],
        }
    }
}

/// Named training tier derived from a governing die ordinal.
///
/// The naming runs opposite to die size: the best die (ordinal 0) is
/// `Untrained`. Downstream sheets key off these exact names.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainingTier {
    #[default]
    Untrained,
    Apprentice,
    Professional,
    Expert,
    Master,
    Legendary,
}

impl TrainingTier {
    /// Lookup table, indexed by training ordinal. Ordinals past the end are `Legendary`.
    const BY_ORDINAL: [TrainingTier; 5] = [
        TrainingTier::Untrained,
        TrainingTier::Apprentice,
        TrainingTier::Professional,
        TrainingTier::Expert,
        TrainingTier::Master,
    ];

    pub fn from_ordinal(ordinal: usize) -> Self {
        Self::BY_ORDINAL
            .get(ordinal)
            .copied()
            .unwrap_or(TrainingTier::Legendary)
    }

    /// Tier reachable with the better of two governing dice.
    pub fn from_governing(first: StepDie, second: StepDie) -> Self {
        let ordinal = first.training_ordinal().min(second.training_ordinal());
        Self::from_ordinal(ordinal)
    }
}
