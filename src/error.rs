use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur during
/// application operation. They provide context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum QuestionError {
    #[error("Failed to load questions from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Questions in {origin} are not valid JSON")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Question data must be a non-empty array")]
    Empty,

    #[error("Invalid question data: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Failed to read stats from {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write stats to {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode stats")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to load profile from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save profile to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown car glyph: {0}")]
    UnknownCar(String),

    #[error("Could not determine user config directory")]
    NoConfigDir,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot start a round with no questions loaded")]
    EmptyQuestionSet,

    #[error("A round is already in progress")]
    RoundInProgress,

    #[error("No finished round to restart from")]
    NotFinished,

    #[error("Answer index {0} is out of range for the current question")]
    UnknownAnswer(usize),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = QuestionError::Invalid("question 2 has no answers".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid question data: question 2 has no answers"
        );

        let err = EngineError::EmptyQuestionSet;
        assert_eq!(err.to_string(), "Cannot start a round with no questions loaded");
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let load_err = QuestionError::LoadFailed {
            path: "/test/questions.json".to_string(),
            source: io_err,
        };

        assert!(load_err.source().is_some());
        assert_eq!(
            load_err.to_string(),
            "Failed to load questions from /test/questions.json"
        );
    }
}
