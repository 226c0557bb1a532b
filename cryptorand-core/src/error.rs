use thiserror::Error;

/// A rejected argument. Carries the offending field, a human readable reason
/// and the constraint that was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
    pub constraint: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        reason: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            constraint: constraint.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RandError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RandError {
    /// Whether the caller may reasonably retry the same request.
    pub fn is_transient(&self) -> bool {
        matches!(self, RandError::EntropyUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, RandError>;
