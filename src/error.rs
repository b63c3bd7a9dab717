//! Error types for the Easely CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 6=backend, etc.)
//! - Retryability flags so callers can offer a retry affordance
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use thiserror::Error;

/// Result type alias for Easely operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    TaskNotFound,
    PlanNotFound,
    AmbiguousTask,

    // Validation (exit 4)
    InvalidMood,
    InvalidArgument,

    // Backend (exit 6)
    BackendError,
    BackendStatus,

    // Config (exit 7)
    ConfigError,
    BackendNotConfigured,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::AmbiguousTask => "AMBIGUOUS_TASK",
            Self::InvalidMood => "INVALID_MOOD",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::BackendError => "BACKEND_ERROR",
            Self::BackendStatus => "BACKEND_STATUS",
            Self::ConfigError => "CONFIG_ERROR",
            Self::BackendNotConfigured => "BACKEND_NOT_CONFIGURED",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::TaskNotFound | Self::PlanNotFound | Self::AmbiguousTask => 3,
            Self::InvalidMood | Self::InvalidArgument => 4,
            Self::BackendError | Self::BackendStatus => 6,
            Self::ConfigError | Self::BackendNotConfigured => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller should retry, possibly with corrected input.
    ///
    /// True for validation errors (corrected input) and backend failures
    /// (nothing changed; trying again is safe). False for not-found,
    /// I/O, or internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidMood
                | Self::InvalidArgument
                | Self::AmbiguousTask
                | Self::BackendError
                | Self::BackendStatus
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Easely CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("Task not found: {id} (did you mean: {}?)", similar.join(", "))]
    TaskNotFoundSimilar { id: String, similar: Vec<String> },

    #[error("Ambiguous task id: {id} matches {} tasks", matches.len())]
    AmbiguousTask { id: String, matches: Vec<String> },

    #[error("No breakdown plan in progress")]
    PlanNotFound,

    #[error("Invalid mood: {value}")]
    InvalidMood { value: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("Backend returned {status} for {path}")]
    BackendStatus { status: u16, path: String },

    #[error("No backend configured")]
    BackendNotConfigured,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::TaskNotFound { .. } | Self::TaskNotFoundSimilar { .. } => ErrorCode::TaskNotFound,
            Self::AmbiguousTask { .. } => ErrorCode::AmbiguousTask,
            Self::PlanNotFound => ErrorCode::PlanNotFound,
            Self::InvalidMood { .. } => ErrorCode::InvalidMood,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Backend(_) => ErrorCode::BackendError,
            Self::BackendStatus { .. } => ErrorCode::BackendStatus,
            Self::BackendNotConfigured => ErrorCode::BackendNotConfigured,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::TaskNotFound { id } => Some(format!(
                "No pending task with ID '{id}'. Use `ez recent` to list pending tasks."
            )),
            Self::TaskNotFoundSimilar { similar, .. } => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }

            Self::AmbiguousTask { matches, .. } => Some(format!(
                "Matches: {}. Give more of the id.",
                matches.join(", ")
            )),

            Self::PlanNotFound => Some(
                "No breakdown in progress.\n  \
                 Start one: ez breakdown start \"big task\" --mood focused"
                    .to_string(),
            ),

            Self::InvalidMood { .. } => {
                Some("Valid moods: low-energy, stressed, focused".to_string())
            }

            Self::BackendNotConfigured => Some(
                "Set a backend: ez backend set http://localhost:8000\n  \
                 Check current: ez backend show"
                    .to_string(),
            ),

            Self::BackendStatus { status, .. } if *status == 404 => Some(
                "The backend rejected the path. Check the URL with `ez backend show`.".to_string(),
            ),
            Self::BackendStatus { status, .. } if *status >= 500 => {
                Some("The backend failed; nothing was changed. Try again shortly.".to_string())
            }

            Self::Backend(_) => Some(
                "Could not reach the backend; nothing was changed.\n  \
                 Try again, or run with --local to use the local snapshot."
                    .to_string(),
            ),

            Self::InvalidArgument(_)
            | Self::BackendStatus { .. }
            | Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            Error::TaskNotFound {
                id: "task_abc".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            Error::InvalidMood {
                value: "sleepy".into()
            }
            .exit_code(),
            4
        );
        assert_eq!(
            Error::BackendStatus {
                status: 500,
                path: "/stats".into()
            }
            .exit_code(),
            6
        );
        assert_eq!(Error::BackendNotConfigured.exit_code(), 7);
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_backend_errors_are_retryable() {
        assert!(ErrorCode::BackendError.is_retryable());
        assert!(ErrorCode::BackendStatus.is_retryable());
        assert!(!ErrorCode::TaskNotFound.is_retryable());
        assert!(!ErrorCode::IoError.is_retryable());
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::TaskNotFoundSimilar {
            id: "task_ab".into(),
            similar: vec!["task_abc123".into()],
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "TASK_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert!(
            json["error"]["hint"]
                .as_str()
                .is_some_and(|h| h.contains("task_abc123"))
        );
    }

    #[test]
    fn test_invalid_mood_hint_lists_valid_values() {
        let err = Error::InvalidMood {
            value: "sleepy".into(),
        };
        let hint = err.hint().unwrap();
        assert!(hint.contains("low-energy"));
        assert!(hint.contains("stressed"));
        assert!(hint.contains("focused"));
    }
}
