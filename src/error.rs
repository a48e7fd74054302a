use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ProjectNotFound,
    TaskNotFound,
    DocumentNotFound,
    AmbiguousRef,
    InvalidStatusTransition,
    ValidationError,
    Aborted,
    CorruptState,
    AiError,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Aborted => "ABORTED",
            Self::CorruptState => "CORRUPT_STATE",
            Self::AiError => "AI_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct NgoError {
    pub code: ErrorCode,
    pub message: String,
}

impl NgoError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn project_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::ProjectNotFound,
            format!("Project not found: {reference}"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn document_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::DocumentNotFound,
            format!("Document not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn invalid_transition(from: &str, action: &str) -> Self {
        Self::new(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot {action} a task that is {from}"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn aborted(what: &str) -> Self {
        Self::new(ErrorCode::Aborted, format!("Aborted: {what} was not deleted"))
    }

    pub fn corrupt_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CorruptState, message)
    }

    pub fn ai(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AiError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<rusqlite::Error> for NgoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<std::io::Error> for NgoError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<reqwest::Error> for NgoError {
    fn from(e: reqwest::Error) -> Self {
        Self::ai(format!("AI request failed: {e}"))
    }
}
