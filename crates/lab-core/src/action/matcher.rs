//! Comparación de una acción cruda contra el paso esperado.
//!
//! Cada campo presente en el paso es una restricción de igualdad exacta; los
//! campos ausentes no restringen. El tipo de acción debe coincidir siempre.
use lab_domain::ScenarioStep;
use std::fmt::Debug;

use super::ActionRequest;
use crate::errors::LabError;

fn constraint<T: PartialEq + Debug>(field: &str, expected: Option<T>, given: Option<T>) -> Result<(), LabError> {
    match expected {
        Some(expected) if given.as_ref() != Some(&expected) => {
            Err(LabError::StepMismatch(format!("{field}: expected {expected:?}, got {given:?}")))
        }
        _ => Ok(()),
    }
}

pub fn check_step(request: &ActionRequest, step: &ScenarioStep) -> Result<(), LabError> {
    if request.action_type != step.action_type.as_str() {
        return Err(LabError::StepMismatch(format!("action_type: expected {}, got {}",
                                                  step.action_type, request.action_type)));
    }
    constraint("instrument_id", step.instrument_id, request.instrument_id)?;
    constraint("reagent_id", step.reagent_id, request.reagent_id)?;
    constraint("source_container_name",
               step.source_container_name.as_deref(),
               request.source_container_name.as_deref())?;
    constraint("target_container_name",
               step.target_container_name.as_deref(),
               request.target_container_name.as_deref())?;
    constraint("amount_value", step.amount_value, request.amount_value)?;
    constraint("amount_unit",
               step.amount_unit.map(|u| u.as_str()),
               request.amount_unit.as_deref())?;
    Ok(())
}
