//! Escenarios y sus pasos ordenados.
//!
//! Un paso describe la acción esperada. Cada campo opcional presente es una
//! restricción que la acción del usuario debe cumplir exactamente; un campo
//! ausente actúa como comodín.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::instrument::InstrumentId;
use crate::reagent::ReagentId;
use crate::units::AmountUnit;
use crate::DomainError;

pub type ScenarioId = i64;

/// Tipos de acción soportados por el motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddReagent,
    TransferSolidWithSpatula,
    TransferLiquidWithPipette,
    PourLiquidBetweenContainers,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::AddReagent => "add_reagent",
            ActionKind::TransferSolidWithSpatula => "transfer_solid_with_spatula",
            ActionKind::TransferLiquidWithPipette => "transfer_liquid_with_pipette",
            ActionKind::PourLiquidBetweenContainers => "pour_liquid_between_containers",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_reagent" => Ok(ActionKind::AddReagent),
            "transfer_solid_with_spatula" => Ok(ActionKind::TransferSolidWithSpatula),
            "transfer_liquid_with_pipette" => Ok(ActionKind::TransferLiquidWithPipette),
            "pour_liquid_between_containers" => Ok(ActionKind::PourLiquidBetweenContainers),
            other => Err(DomainError::Validation(format!("unsupported action type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub id: i64,
    pub order_index: i32,
    pub action_type: ActionKind,
    #[serde(default)]
    pub instrument_id: Option<InstrumentId>,
    #[serde(default)]
    pub reagent_id: Option<ReagentId>,
    #[serde(default)]
    pub source_container_name: Option<String>,
    #[serde(default)]
    pub target_container_name: Option<String>,
    #[serde(default)]
    pub amount_value: Option<f64>,
    #[serde(default)]
    pub amount_unit: Option<AmountUnit>,
    pub text_instruction: String,
    #[serde(default)]
    pub sound_effect_path: Option<String>,
}

impl ScenarioStep {
    /// Paso sin restricciones más allá del tipo de acción.
    pub fn new(id: i64, order_index: i32, action_type: ActionKind, text_instruction: &str) -> Self {
        Self { id,
               order_index,
               action_type,
               instrument_id: None,
               reagent_id: None,
               source_container_name: None,
               target_container_name: None,
               amount_value: None,
               amount_unit: None,
               text_instruction: text_instruction.to_string(),
               sound_effect_path: None }
    }

    pub fn instrument(mut self, id: InstrumentId) -> Self {
        self.instrument_id = Some(id);
        self
    }

    pub fn reagent(mut self, id: ReagentId) -> Self {
        self.reagent_id = Some(id);
        self
    }

    pub fn source(mut self, container: &str) -> Self {
        self.source_container_name = Some(container.to_string());
        self
    }

    pub fn target(mut self, container: &str) -> Self {
        self.target_container_name = Some(container.to_string());
        self
    }

    pub fn amount(mut self, value: f64, unit: AmountUnit) -> Self {
        self.amount_value = Some(value);
        self.amount_unit = Some(unit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn new(id: ScenarioId, name: &str) -> Self {
        Self { id,
               name: name.to_string(),
               description: None,
               steps: Vec::new() }
    }

    pub fn with_step(mut self, step: ScenarioStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Pasos ordenados por `order_index` (estable ante índices repetidos).
    pub fn ordered_steps(&self) -> Vec<ScenarioStep> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| s.order_index);
        steps
    }
}
