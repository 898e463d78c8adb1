//! Registro concurrente de ejecuciones activas.
//!
//! Cada ejecución vive detrás de su propio `Mutex`: el mapa (`DashMap`) sólo
//! se bloquea el tiempo necesario para clonar el `Arc`, y toda lectura o
//! mutación de una ejecución se hace con su candado tomado. Así hay como
//! máximo una mutación en curso por ejecución y las lecturas siempre observan
//! un estado confirmado.
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use indexmap::IndexMap;
use lab_domain::ScenarioId;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use super::state::{ContainerMeta, RunId, RunState, RunStateView};
use crate::errors::LabError;

type RunSlot = Arc<Mutex<RunState>>;

#[derive(Debug, Default)]
pub struct RunRegistry {
    runs: DashMap<RunId, RunSlot>,
}

fn lock(slot: &Mutex<RunState>) -> Result<MutexGuard<'_, RunState>, LabError> {
    slot.lock().map_err(|e| LabError::Internal(format!("run mutex poisoned: {e}")))
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una ejecución nueva con un id nunca usado antes.
    pub fn create(&self, scenario_id: ScenarioId, containers_meta: IndexMap<String, ContainerMeta>) -> RunStateView {
        loop {
            let run_id = Uuid::new_v4();
            if let Entry::Vacant(slot) = self.runs.entry(run_id) {
                let state = RunState::new(run_id, scenario_id, containers_meta);
                let view = state.view();
                slot.insert(Arc::new(Mutex::new(state)));
                return view;
            }
        }
    }

    fn slot(&self, run_id: RunId) -> Result<RunSlot, LabError> {
        self.runs
            .get(&run_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LabError::NotFound(format!("run {run_id}")))
    }

    pub fn snapshot(&self, run_id: RunId) -> Result<RunStateView, LabError> {
        let slot = self.slot(run_id)?;
        let state = lock(&slot)?;
        Ok(state.view())
    }

    /// Ejecuta `f` con acceso exclusivo a la ejecución.
    pub fn with_run<T>(&self,
                       run_id: RunId,
                       f: impl FnOnce(&mut RunState) -> Result<T, LabError>)
                       -> Result<T, LabError> {
        let slot = self.slot(run_id)?;
        let mut state = lock(&slot)?;
        f(&mut state)
    }

    pub fn contains(&self, run_id: RunId) -> bool {
        self.runs.contains_key(&run_id)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
