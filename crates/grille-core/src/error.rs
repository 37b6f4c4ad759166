//! Error types and exit codes for grille
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, serialization)
//! - 2: Usage error (bad flags/args, empty group name)
//! - 3: Data error (unknown criterion, unreadable rubric or score file)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unknown criterion, invalid input file (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during grille operations
#[derive(Error, Debug)]
pub enum GradeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("group name is required before exporting")]
    EmptyGroupName,

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("criterion not found: {id}")]
    CriterionNotFound { id: String },

    #[error("rubric is empty (no criterion could be read from {source_name})")]
    EmptyRubric { source_name: String },

    #[error("invalid score file {path:?}: {reason}")]
    InvalidScoreFile { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl GradeError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GradeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or argument
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GradeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unknown criterion id
    pub fn criterion_not_found(id: impl Into<String>) -> Self {
        GradeError::CriterionNotFound { id: id.into() }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradeError::UnknownFormat(_)
            | GradeError::UsageError(_)
            | GradeError::EmptyGroupName
            | GradeError::InvalidValue { .. } => ExitCode::Usage,

            GradeError::CriterionNotFound { .. }
            | GradeError::EmptyRubric { .. }
            | GradeError::InvalidScoreFile { .. } => ExitCode::Data,

            GradeError::Io(_)
            | GradeError::Json(_)
            | GradeError::Toml(_)
            | GradeError::FailedOperationWithTarget { .. }
            | GradeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GradeError::UnknownFormat(_) => "unknown_format",
            GradeError::UsageError(_) => "usage_error",
            GradeError::EmptyGroupName => "empty_group_name",
            GradeError::InvalidValue { .. } => "invalid_value",
            GradeError::CriterionNotFound { .. } => "criterion_not_found",
            GradeError::EmptyRubric { .. } => "empty_rubric",
            GradeError::InvalidScoreFile { .. } => "invalid_score_file",
            GradeError::Io(_) => "io_error",
            GradeError::Json(_) => "json_error",
            GradeError::Toml(_) => "toml_error",
            GradeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GradeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for grille operations
pub type Result<T> = std::result::Result<T, GradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(GradeError::EmptyGroupName.exit_code(), ExitCode::Usage);
        assert_eq!(
            GradeError::criterion_not_found("crit_9").exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            GradeError::Other("boom".to_string()).exit_code(),
            ExitCode::Failure
        );
        assert_eq!(i32::from(ExitCode::Data), 3);
    }

    #[test]
    fn test_to_json_envelope() {
        let json = GradeError::criterion_not_found("crit_42").to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "criterion_not_found");
        assert_eq!(json["error"]["message"], "criterion not found: crit_42");
    }

    #[test]
    fn test_bail_usage_macro() {
        fn check(flag: bool) -> Result<()> {
            if flag {
                crate::bail_usage!("flag is not allowed");
            }
            Ok(())
        }

        assert!(check(false).is_ok());
        match check(true) {
            Err(GradeError::UsageError(msg)) => assert_eq!(msg, "flag is not allowed"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bail_invalid_macro() {
        fn parse(raw: &str) -> Result<i64> {
            let Ok(value) = raw.parse::<i64>() else {
                crate::bail_invalid!("score", raw);
            };
            Ok(value)
        }

        assert_eq!(parse("7").unwrap(), 7);
        let err = parse("sept").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Usage);
        assert_eq!(err.to_string(), "invalid score: sept");
    }
}
