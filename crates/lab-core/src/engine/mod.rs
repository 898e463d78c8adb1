//! Motor de ejecución de escenarios.
//!
//! `LabEngine` combina un catálogo de sólo lectura con el registro de
//! ejecuciones. Cada acción se valida contra el paso esperado, se aplica sobre
//! un borrador del estado y sólo se confirma si todo el paso tuvo éxito: un
//! error nunca deja la ejecución a medio modificar.
mod dispatch;

use lab_domain::{ActionKind, Catalog, MarkerId, ReagentId, ScenarioId};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::action::{check_step, ActionRequest, LabAction};
use crate::constants::{QUICK_ADD_AMOUNT, QUICK_ADD_UNIT};
use crate::errors::LabError;
use crate::run::{default_containers_meta, RunId, RunRegistry, RunStateView};

/// Convierte el identificador textual de una ejecución. Un id mal formado se
/// trata igual que uno desconocido.
pub fn parse_run_id(raw: &str) -> Result<RunId, LabError> {
    RunId::parse_str(raw.trim()).map_err(|_| LabError::NotFound(format!("run {raw}")))
}

pub struct LabEngine<C: Catalog> {
    catalog: Arc<C>,
    registry: RunRegistry,
}

impl<C: Catalog> LabEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self::with_shared_catalog(Arc::new(catalog))
    }

    pub fn with_shared_catalog(catalog: Arc<C>) -> Self {
        Self { catalog,
               registry: RunRegistry::new() }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn registry(&self) -> &RunRegistry {
        &self.registry
    }

    /// Inicia una ejecución nueva con los recipientes por defecto.
    pub fn start_run(&self, scenario_id: ScenarioId) -> Result<RunStateView, LabError> {
        if !self.catalog.scenario_exists(scenario_id) {
            return Err(LabError::NotFound(format!("scenario {scenario_id}")));
        }
        let meta = default_containers_meta(self.catalog.as_ref())?;
        let view = self.registry.create(scenario_id, meta);
        info!("run {} started for scenario {} with containers {:?}",
              view.run_id,
              scenario_id,
              view.containers_meta.keys().collect::<Vec<_>>());
        Ok(view)
    }

    pub fn get_run_state(&self, run_id: RunId) -> Result<RunStateView, LabError> {
        self.registry.snapshot(run_id)
    }

    /// Valida y aplica una acción del usuario sobre la ejecución.
    pub fn apply_action(&self, run_id: RunId, request: &ActionRequest) -> Result<RunStateView, LabError> {
        let result = self.registry.with_run(run_id, |state| {
                                      let steps = self.catalog.scenario_steps(state.scenario_id)?;
                                      let step = steps.get(state.current_step_index)
                                                      .ok_or(LabError::ScenarioCompleted)?;
                                      check_step(request, step)?;
                                      let action = LabAction::try_from(request)?;

                                      let mut draft = state.clone();
                                      let reaction = dispatch::apply(self.catalog.as_ref(), &mut draft, &action)?;
                                      draft.current_step_index += 1;
                                      draft.last_message = Some(match reaction {
                                                                    Some(r) => format!("Step completed: {}. {}",
                                                                                       step.text_instruction, r.message),
                                                                    None => format!("Step completed: {}", step.text_instruction),
                                                                });
                                      *state = draft;
                                      debug!("run {run_id}: step {} ({}) completed, cursor at {}/{}",
                                             step.id,
                                             action.kind(),
                                             state.current_step_index,
                                             steps.len());
                                      Ok(state.view())
                                  });
        if let Err(e) = &result {
            warn!("run {run_id}: {} rejected: {e}", request.action_type);
        }
        result
    }

    /// Atajo: agrega una unidad del reactivo al recipiente indicado.
    pub fn add_reagent_to_container(&self,
                                    run_id: RunId,
                                    container: &str,
                                    reagent_id: ReagentId)
                                    -> Result<RunStateView, LabError> {
        let request = ActionRequest::new(ActionKind::AddReagent).target(container)
                                                                .reagent(reagent_id)
                                                                .amount(QUICK_ADD_AMOUNT, QUICK_ADD_UNIT.as_str());
        self.apply_action(run_id, &request)
    }

    /// Traduce un vertido detectado entre dos marcadores a la acción de
    /// verter entre los recipientes que esos marcadores representan.
    pub fn notify_marker_event(&self,
                               run_id: RunId,
                               source_marker: MarkerId,
                               target_marker: MarkerId)
                               -> Result<RunStateView, LabError> {
        let source = self.container_for_marker(run_id, source_marker)?;
        let target = self.container_for_marker(run_id, target_marker)?;
        debug!("run {run_id}: marker {source_marker} -> {target_marker} mapped to '{source}' -> '{target}'");
        let request = ActionRequest::new(ActionKind::PourLiquidBetweenContainers).source(&source)
                                                                                 .target(&target);
        self.apply_action(run_id, &request)
    }

    fn container_for_marker(&self, run_id: RunId, marker: MarkerId) -> Result<String, LabError> {
        let instrument = self.catalog
                             .instrument_by_marker(marker)
                             .ok_or_else(|| LabError::NotFound(format!("no instrument carries marker {marker}")))?;
        self.registry.with_run(run_id, |state| {
                         state.container_for_instrument(instrument.id)
                              .map(str::to_string)
                              .ok_or_else(|| {
                                  LabError::InvalidContainer(format!("instrument {} (marker {marker}) is not a container of this run",
                                                                     instrument.id))
                              })
                     })
    }
}
