use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// PlanError

/// Failure to build a [`SerializationPlan`](crate::SerializationPlan).
///
/// Nothing is cached when a build fails; the next request retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("type `{type_name}` cannot be introspected")]
    UnreflectableType { type_name: String },

    #[error(
        "property `{property}` of `{type_name}` is declared with conflicting value types `{first}` and `{second}`"
    )]
    AmbiguousProperty {
        type_name: &'static str,
        property: String,
        first: &'static str,
        second: &'static str,
    },
}

// -----------------------------------------------------------------------------
// AccessError

/// Failure to read or write a property through a plan entry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccessError {
    #[error("target is not a `{expected}`")]
    TargetMismatch { expected: &'static str },

    #[error("property `{property}` is read-only")]
    ReadOnly { property: String },

    #[error("property `{property}` is declared on `{owner}`, which the target does not embed")]
    Unreachable {
        property: String,
        owner: &'static str,
    },

    #[error("failed to decode property value: {0}")]
    Deserialize(#[from] erased_serde::Error),
}

// -----------------------------------------------------------------------------
// ConfigError

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid planner configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("blank marker name at `{key}[{index}]`")]
    EmptyMarker { key: &'static str, index: usize },

    #[error("the global plan cache has already been initialized")]
    AlreadyInitialized,
}
