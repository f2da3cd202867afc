//! Error types for sheet-core.
//!
//! The engine assumes well-formed input. Anything else is reported immediately
//! and never retried, since the same input always fails the same way.
//!
//! - **SchemaViolation**: a name (ability, pool, skill, field) that the ruleset
//!   does not know
//! - **OutOfRangeInput**: a numeric field outside its documented bound

/// Severity level of an error, used by callers to decide how to surface it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input data. Fix the record or overlay and call again.
    ///
    /// Examples: modifier outside its bounds
    Validation,

    /// Configuration bug upstream.
    ///
    /// Examples: overlay names a skill that the ruleset does not define
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a configuration bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Where in the record or overlay a bad name was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "camelCase")]
pub enum SchemaDomain {
    Abilities,
    DerivedAbilityValues,
    DerivedAbilityPools,
    Skills,
    StabilityCosts,
    Ruleset,
}

/// Errors raised by [`crate::Engine::recompute`] and ruleset construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("unknown {domain} entry `{name}`")]
    SchemaViolation { domain: SchemaDomain, name: String },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRangeInput {
        field: String,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl EngineError {
    pub fn schema(domain: SchemaDomain, name: impl Into<String>) -> Self {
        Self::SchemaViolation {
            domain,
            name: name.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, value: i32, min: i32, max: i32) -> Self {
        Self::OutOfRangeInput {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SchemaViolation { .. } => ErrorSeverity::Internal,
            Self::OutOfRangeInput { .. } => ErrorSeverity::Validation,
        }
    }

    /// Stable identifier for logging and tests.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            Self::OutOfRangeInput { .. } => "OUT_OF_RANGE_INPUT",
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let schema = EngineError::schema(SchemaDomain::Skills, "juggling");
        assert_eq!(schema.severity(), ErrorSeverity::Internal);
        assert_eq!(schema.error_code(), "SCHEMA_VIOLATION");
        assert_eq!(schema.to_string(), "unknown skills entry `juggling`");

        let range = EngineError::out_of_range("strength.bonusMod", 40, -20, 20);
        assert!(!range.severity().is_internal());
        assert_eq!(range.to_string(), "strength.bonusMod = 40 is outside [-20, 20]");
    }
}
