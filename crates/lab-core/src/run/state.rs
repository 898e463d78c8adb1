//! Estado de una ejecución de escenario y su vista serializable.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use lab_domain::instrument::{BEAKER, FLASK, PIPETTE, SPATULA};
use lab_domain::{Catalog, Instrument, InstrumentId, ScenarioId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{BEAKER_1, BEAKER_2, FLASK_1, PIPETTE_1, SPATULA_1};
use crate::container::{Containers, ContentItem};
use crate::errors::LabError;

pub type RunId = Uuid;

/// Instrumento que respalda un recipiente lógico durante toda la ejecución.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerMeta {
    pub instrument_id: InstrumentId,
    pub instrument_type: String,
    pub is_container: bool,
    pub allowed_physical_states: Option<String>,
}

impl ContainerMeta {
    fn snapshot(instrument: &Instrument, is_container: bool) -> Self {
        Self { instrument_id: instrument.id,
               instrument_type: instrument.instrument_type.clone(),
               is_container,
               allowed_physical_states: instrument.allowed_physical_states.clone() }
    }
}

/// Asignación determinista de recipientes a partir del catálogo (ids
/// ascendentes): dos vasos, un matraz, una pipeta y una espátula como máximo.
pub fn default_containers_meta(catalog: &dyn Catalog) -> Result<IndexMap<String, ContainerMeta>, LabError> {
    let mut meta = IndexMap::new();

    let beakers = catalog.instruments_of_type(BEAKER, true);
    for (name, beaker) in [BEAKER_1, BEAKER_2].into_iter().zip(beakers.iter()) {
        meta.insert(name.to_string(), ContainerMeta::snapshot(beaker, true));
    }
    if let Some(flask) = catalog.instruments_of_type(FLASK, true).first() {
        meta.insert(FLASK_1.to_string(), ContainerMeta::snapshot(flask, true));
    }
    if let Some(pipette) = catalog.instruments_of_type(PIPETTE, false).first() {
        meta.insert(PIPETTE_1.to_string(), ContainerMeta::snapshot(pipette, false));
    }
    if let Some(spatula) = catalog.instruments_of_type(SPATULA, false).first() {
        meta.insert(SPATULA_1.to_string(), ContainerMeta::snapshot(spatula, false));
    }

    if meta.is_empty() {
        return Err(LabError::NotFound("no instruments available to initialise the run".into()));
    }
    Ok(meta)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub run_id: RunId,
    pub scenario_id: ScenarioId,
    pub started_at: DateTime<Utc>,
    pub containers: Containers,
    pub containers_meta: IndexMap<String, ContainerMeta>,
    pub current_step_index: usize,
    pub last_message: Option<String>,
}

impl RunState {
    pub fn new(run_id: RunId, scenario_id: ScenarioId, containers_meta: IndexMap<String, ContainerMeta>) -> Self {
        let containers = Containers::with_names(containers_meta.keys().map(String::as_str));
        Self { run_id,
               scenario_id,
               started_at: Utc::now(),
               containers,
               containers_meta,
               current_step_index: 0,
               last_message: None }
    }

    /// Meta de un recipiente utilizable como tal.
    pub fn container_meta(&self, name: &str) -> Result<&ContainerMeta, LabError> {
        let meta = self.containers_meta
                       .get(name)
                       .ok_or_else(|| LabError::InvalidContainer(format!("'{name}' is not part of this run")))?;
        if !meta.is_container {
            return Err(LabError::InvalidContainer(format!("'{name}' ({}) cannot hold contents",
                                                          meta.instrument_type)));
        }
        Ok(meta)
    }

    /// Nombre del recipiente respaldado por el instrumento dado.
    pub fn container_for_instrument(&self, instrument_id: InstrumentId) -> Option<&str> {
        self.containers_meta
            .iter()
            .find(|(_, meta)| meta.instrument_id == instrument_id)
            .map(|(name, _)| name.as_str())
    }

    pub fn view(&self) -> RunStateView {
        RunStateView { run_id: self.run_id,
                       scenario_id: self.scenario_id,
                       started_at: self.started_at,
                       current_step_index: self.current_step_index,
                       containers: self.containers
                                       .iter()
                                       .map(|(name, items)| (name.to_string(), items.to_vec()))
                                       .collect(),
                       containers_meta: self.containers_meta.clone(),
                       message: self.last_message.clone().filter(|m| !m.is_empty()) }
    }
}

/// Instantánea serializable entregada a los llamadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStateView {
    pub run_id: RunId,
    pub scenario_id: ScenarioId,
    pub started_at: DateTime<Utc>,
    pub current_step_index: usize,
    pub containers: IndexMap<String, Vec<ContentItem>>,
    pub containers_meta: IndexMap<String, ContainerMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
