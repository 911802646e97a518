//! Error types for the progression engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Entry has an empty id")]
    EmptyId,

    #[error("Entry '{id}': level requirement must be at least 1 (got {level})")]
    InvalidLevel { id: String, level: i64 },

    #[error("Entry '{id}': count-based kind '{kind}' requires a goal")]
    MissingGoal { id: String, kind: String },

    #[error("Entry '{id}': kind '{kind}' does not take a goal")]
    UnexpectedGoal { id: String, kind: String },

    #[error("Entry '{id}': goal must be at least 1 (got {goal})")]
    InvalidGoal { id: String, goal: i64 },

    #[error("Duplicate entry id '{0}'")]
    DuplicateId(String),

    #[error("Unknown entry id '{0}'")]
    UnknownEntry(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProgressError {
    pub fn code(&self) -> i32 {
        match self {
            ProgressError::EmptyId => -32010,
            ProgressError::InvalidLevel { .. } => -32011,
            ProgressError::MissingGoal { .. } => -32012,
            ProgressError::UnexpectedGoal { .. } => -32013,
            ProgressError::InvalidGoal { .. } => -32014,
            ProgressError::DuplicateId(_) => -32015,
            ProgressError::UnknownEntry(_) => -32602,
            ProgressError::Io(_) => -32006,
            ProgressError::Json(_) => -32700,
            ProgressError::Toml(_) => -32701,
        }
    }

    /// True for errors raised while validating catalog definitions
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProgressError::EmptyId
                | ProgressError::InvalidLevel { .. }
                | ProgressError::MissingGoal { .. }
                | ProgressError::UnexpectedGoal { .. }
                | ProgressError::InvalidGoal { .. }
                | ProgressError::DuplicateId(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_flagged() {
        assert!(ProgressError::EmptyId.is_configuration());
        assert!(ProgressError::DuplicateId("x".into()).is_configuration());
        assert!(!ProgressError::UnknownEntry("x".into()).is_configuration());
    }

    #[test]
    fn test_message_names_entry() {
        let err = ProgressError::MissingGoal {
            id: "invite_3".into(),
            kind: "referral_count".into(),
        };
        assert!(err.to_string().contains("invite_3"));
        assert_eq!(err.code(), -32012);
    }
}
