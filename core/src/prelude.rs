use crate::constants::PhysicalConstants;
use serde::{Deserialize, Serialize};

/// Failure of a single physics computation.
///
/// Failures are deterministic: the same inputs always fail the same way, so
/// callers flag or skip the row rather than retrying.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("divergent model: {0}")]
    Divergent(String),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Per-row status reported alongside each computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome<T> {
    Ok { value: T },
    Failed { error: PhysicsError },
}

impl<T> RowOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, RowOutcome::Ok { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RowOutcome::Ok { value } => Some(value),
            RowOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&PhysicsError> {
        match self {
            RowOutcome::Ok { .. } => None,
            RowOutcome::Failed { error } => Some(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RowOutcome<U> {
        match self {
            RowOutcome::Ok { value } => RowOutcome::Ok { value: f(value) },
            RowOutcome::Failed { error } => RowOutcome::Failed { error },
        }
    }
}

impl<T> From<PhysicsResult<T>> for RowOutcome<T> {
    fn from(result: PhysicsResult<T>) -> Self {
        match result {
            Ok(value) => RowOutcome::Ok { value },
            Err(error) => RowOutcome::Failed { error },
        }
    }
}

/// Trait describing column-processing stages.
pub trait ProcessingStage {
    type Input;
    type Output;

    fn initialize(&mut self, constants: &PhysicalConstants) -> StageResult<()>;
    fn execute(&mut self, input: &Self::Input) -> StageResult<Self::Output>;
    fn cleanup(&mut self);
}

/// Rejects a non-finite scalar with a message naming the quantity.
pub(crate) fn ensure_finite(name: &str, value: f64) -> PhysicsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidInput(format!(
            "{} is not finite ({})",
            name, value
        )))
    }
}
