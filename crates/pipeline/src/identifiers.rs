//! Newtype domain identifiers.
//!
//! Units and pipelines are addressed by name in logs, observer events, and the
//! aggregated pipeline state. Wrapping the names keeps a [`UnitName`] from being
//! passed where a [`PipelineName`] is expected even though both are strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Creates an identifier from a string literal.
            ///
            /// # Panics
            ///
            /// Panics if `value` is empty.
            pub fn from_static(value: &'static str) -> Self {
                assert!(!value.is_empty(), concat!(stringify!($name), " must not be empty"));
                Self(value.to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a processing unit within a pipeline.
    ///
    /// Used as the key of the pipeline's aggregated state map. Uniqueness within
    /// one pipeline is expected but not enforced; a later unit with the same name
    /// overwrites the earlier unit's snapshot.
    UnitName
}

string_id! {
    /// Identifies a pipeline (e.g. `"research"`).
    PipelineName
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single pipeline execution (one call to `run` or `run_suspendable`).
///
/// Generated fresh for every run; carried on the run span and on observer
/// events so all activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineRunId(Uuid);

impl PipelineRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PipelineRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_are_rejected() {
        assert!(UnitName::new("").is_none());
        assert!(PipelineName::new(String::new()).is_none());
    }

    #[test]
    fn names_display_their_value() {
        let name = UnitName::new("TopicValidator").unwrap();
        assert_eq!(name.as_str(), "TopicValidator");
        assert_eq!(name.to_string(), "TopicValidator");
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(PipelineRunId::new_random(), PipelineRunId::new_random());
    }
}
