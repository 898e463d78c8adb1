//! Errores del motor de escenarios y su clasificación para la capa HTTP.

use lab_domain::{DomainError, ReagentId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LabError {
    #[error("not found: {0}")] NotFound(String),
    #[error("action does not match the current step: {0}")] StepMismatch(String),
    #[error("scenario already completed")] ScenarioCompleted,
    #[error("missing required field '{0}'")] MissingField(&'static str),
    #[error("invalid request: {0}")] InvalidRequest(String),
    #[error("insufficient quantity of reagent {reagent_id}: requested {requested}, available {available}")]
    InsufficientQuantity { reagent_id: ReagentId, requested: f64, available: f64 },
    #[error("instrument {instrument} is not compatible with {state} reagent {reagent_id}")]
    IncompatiblePhysicalState { instrument: String, reagent_id: ReagentId, state: String },
    #[error("invalid container: {0}")] InvalidContainer(String),
    #[error("invalid transfer: {0}")] InvalidTransfer(String),
    #[error("unsupported action type '{0}'")] UnsupportedAction(String),
    #[error("internal: {0}")] Internal(String),
}

/// Clase de error expuesta a los llamadores (404 / 400 / 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    InvalidRequest,
    Internal,
}

impl LabError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LabError::NotFound(_) => ErrorClass::NotFound,
            LabError::Internal(_) => ErrorClass::Internal,
            LabError::StepMismatch(_)
            | LabError::ScenarioCompleted
            | LabError::MissingField(_)
            | LabError::InvalidRequest(_)
            | LabError::InsufficientQuantity { .. }
            | LabError::IncompatiblePhysicalState { .. }
            | LabError::InvalidContainer(_)
            | LabError::InvalidTransfer(_)
            | LabError::UnsupportedAction(_) => ErrorClass::InvalidRequest,
        }
    }

    /// Código HTTP equivalente.
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::NotFound => 404,
            ErrorClass::InvalidRequest => 400,
            ErrorClass::Internal => 500,
        }
    }
}

impl From<DomainError> for LabError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(what) => LabError::NotFound(what),
            DomainError::Validation(msg) => LabError::InvalidRequest(msg),
            other => LabError::Internal(other.to_string()),
        }
    }
}
