//! Acciones del usuario: forma cruda (tal como llega del exterior) y forma
//! tipada, con un variante por tipo de acción y sus campos obligatorios.
pub mod matcher;

use lab_domain::{ActionKind, AmountUnit, InstrumentId, ReagentId};
use serde::{Deserialize, Serialize};

use crate::errors::LabError;

pub use matcher::check_step;

/// Acción cruda; todos los campos salvo el tipo son opcionales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action_type: String,
    #[serde(default)]
    pub instrument_id: Option<InstrumentId>,
    #[serde(default)]
    pub source_container_name: Option<String>,
    #[serde(default)]
    pub target_container_name: Option<String>,
    #[serde(default)]
    pub reagent_id: Option<ReagentId>,
    #[serde(default)]
    pub amount_value: Option<f64>,
    #[serde(default)]
    pub amount_unit: Option<String>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self { action_type: kind.as_str().to_string(),
               ..Default::default() }
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

    pub fn amount(mut self, value: f64, unit: &str) -> Self {
        self.amount_value = Some(value);
        self.amount_unit = Some(unit.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub unit: AmountUnit,
}

/// Transferencia con herramienta (espátula o pipeta). Sin origen, la
/// herramienta toma el reactivo del estante y lo deposita en el destino.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolTransfer {
    pub instrument_id: InstrumentId,
    pub reagent_id: ReagentId,
    pub source: Option<String>,
    pub target: String,
    pub amount: Amount,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LabAction {
    AddReagent { reagent_id: ReagentId, target: String, amount: Amount },
    TransferSolidWithSpatula(ToolTransfer),
    TransferLiquidWithPipette(ToolTransfer),
    PourLiquidBetweenContainers { source: String, target: String },
}

impl LabAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            LabAction::AddReagent { .. } => ActionKind::AddReagent,
            LabAction::TransferSolidWithSpatula(_) => ActionKind::TransferSolidWithSpatula,
            LabAction::TransferLiquidWithPipette(_) => ActionKind::TransferLiquidWithPipette,
            LabAction::PourLiquidBetweenContainers { .. } => ActionKind::PourLiquidBetweenContainers,
        }
    }

    /// Recipiente sobre el que se resuelven reacciones tras aplicar la acción.
    pub fn target(&self) -> &str {
        match self {
            LabAction::AddReagent { target, .. } => target,
            LabAction::TransferSolidWithSpatula(t) | LabAction::TransferLiquidWithPipette(t) => &t.target,
            LabAction::PourLiquidBetweenContainers { target, .. } => target,
        }
    }
}

fn required<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T, LabError> {
    value.clone().ok_or(LabError::MissingField(field))
}

fn amount_of(request: &ActionRequest) -> Result<Amount, LabError> {
    let value = required(&request.amount_value, "amount_value")?;
    let unit_raw = required(&request.amount_unit, "amount_unit")?;
    if !value.is_finite() || value < 0.0 {
        return Err(LabError::InvalidRequest(format!("amount must be a non-negative number, got {value}")));
    }
    let unit = unit_raw.parse::<AmountUnit>()?;
    Ok(Amount { value, unit })
}

fn tool_transfer(request: &ActionRequest) -> Result<ToolTransfer, LabError> {
    Ok(ToolTransfer { instrument_id: required(&request.instrument_id, "instrument_id")?,
                      reagent_id: required(&request.reagent_id, "reagent_id")?,
                      source: request.source_container_name.clone(),
                      target: required(&request.target_container_name, "target_container_name")?,
                      amount: amount_of(request)? })
}

impl TryFrom<&ActionRequest> for LabAction {
    type Error = LabError;

    fn try_from(request: &ActionRequest) -> Result<Self, Self::Error> {
        let kind = request.action_type
                          .parse::<ActionKind>()
                          .map_err(|_| LabError::UnsupportedAction(request.action_type.clone()))?;
        let action = match kind {
            ActionKind::AddReagent => {
                LabAction::AddReagent { reagent_id: required(&request.reagent_id, "reagent_id")?,
                                        target: required(&request.target_container_name, "target_container_name")?,
                                        amount: amount_of(request)? }
            }
            ActionKind::TransferSolidWithSpatula => LabAction::TransferSolidWithSpatula(tool_transfer(request)?),
            ActionKind::TransferLiquidWithPipette => LabAction::TransferLiquidWithPipette(tool_transfer(request)?),
            ActionKind::PourLiquidBetweenContainers => {
                LabAction::PourLiquidBetweenContainers { source: required(&request.source_container_name,
                                                                          "source_container_name")?,
                                                         target: required(&request.target_container_name,
                                                                          "target_container_name")? }
            }
        };
        Ok(action)
    }
}
