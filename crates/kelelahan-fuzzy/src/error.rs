use std::fmt;

use serde::Serialize;

/// The domain edge an input crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DomainBound {
    Min(i32),
    Max(i32),
}

impl fmt::Display for DomainBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainBound::Min(v) => write!(f, "minimum {v}"),
            DomainBound::Max(v) => write!(f, "maximum {v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// A reading lies outside its variable's domain. Never clamped.
    #[error("invalid input: {variable} = {value} violates {bound}")]
    InvalidInput {
        variable: &'static str,
        value: i32,
        bound: DomainBound,
    },
    /// A variable or rule table is malformed. Only raised while building a model.
    #[error("invalid definition for {subject}: {reason}")]
    InvalidDefinition { subject: String, reason: String },
}

impl FuzzyError {
    pub(crate) fn definition(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        FuzzyError::InvalidDefinition {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FuzzyError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_variable_and_bound() {
        let err = FuzzyError::InvalidInput {
            variable: "jam_tidur",
            value: 15,
            bound: DomainBound::Max(10),
        };
        assert_eq!(
            err.to_string(),
            "invalid input: jam_tidur = 15 violates maximum 10"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_definition_message() {
        let err = FuzzyError::definition("kafein.banyak", "left foot 4 exceeds peak 3");
        assert_eq!(
            err.to_string(),
            "invalid definition for kafein.banyak: left foot 4 exceeds peak 3"
        );
        assert!(!err.is_invalid_input());
    }
}
