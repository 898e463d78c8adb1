//! Compatibilidad instrumento <-> estado físico del reactivo.

use lab_domain::{Instrument, PhysicalState, Reagent};
use std::collections::BTreeSet;

use crate::errors::LabError;

/// Interpreta la lista blanca separada por comas (tokens recortados, vacíos
/// descartados). Un conjunto vacío significa "sin restricción".
pub fn allowed_states(raw: Option<&str>) -> BTreeSet<&str> {
    raw.unwrap_or_default()
       .split(',')
       .map(str::trim)
       .filter(|token| !token.is_empty())
       .collect()
}

pub fn check_compatible(instrument: &Instrument, reagent: &Reagent) -> Result<(), LabError> {
    let allowed = allowed_states(instrument.allowed_physical_states.as_deref());
    if allowed.is_empty() || allowed.contains(reagent.physical_state.as_str()) {
        return Ok(());
    }
    Err(LabError::IncompatiblePhysicalState { instrument: instrument.name.clone(),
                                              reagent_id: reagent.id,
                                              state: reagent.physical_state.to_string() })
}

/// Regla propia de cada herramienta (la espátula sólo admite sólidos, etc.).
pub fn require_state(reagent: &Reagent, accepted: &[PhysicalState], tool: &str) -> Result<(), LabError> {
    if accepted.contains(&reagent.physical_state) {
        return Ok(());
    }
    let names: Vec<&str> = accepted.iter().map(PhysicalState::as_str).collect();
    Err(LabError::InvalidRequest(format!("{tool} only handles {} reagents, reagent {} is {}",
                                         names.join("/"),
                                         reagent.id,
                                         reagent.physical_state)))
}
