//! Contrato de lectura del catálogo y su implementación en memoria.
//!
//! El motor de escenarios sólo necesita consultas de lectura: pasos ordenados
//! de un escenario, instrumentos (por id, por tipo y por marcador), reactivos y
//! reacciones candidatas. La persistencia real (base de datos, CRUD) queda
//! fuera de este crate; cualquier backend que implemente `Catalog` sirve.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::instrument::{Instrument, InstrumentId, MarkerId};
use crate::reaction::ReactionRule;
use crate::reagent::{Reagent, ReagentId};
use crate::scenario::{Scenario, ScenarioId, ScenarioStep};
use crate::DomainError;

/// Consultas de catálogo consumidas por el motor.
pub trait Catalog: Send + Sync {
    /// Pasos del escenario ordenados por `order_index`.
    /// Devuelve `DomainError::NotFound` si el escenario no existe.
    fn scenario_steps(&self, scenario_id: ScenarioId) -> Result<Vec<ScenarioStep>, DomainError>;

    fn scenario_exists(&self, scenario_id: ScenarioId) -> bool {
        self.scenario_steps(scenario_id).is_ok()
    }

    fn instrument(&self, id: InstrumentId) -> Option<Instrument>;

    /// Instrumentos de un tipo, ordenados por id ascendente.
    fn instruments_of_type(&self, instrument_type: &str, containers_only: bool) -> Vec<Instrument>;

    fn instrument_by_marker(&self, marker_id: MarkerId) -> Option<Instrument>;

    fn reagent(&self, id: ReagentId) -> Option<Reagent>;

    /// Reacciones con `scenario_id == scenario` o globales (`scenario_id` nulo).
    fn reactions_for_scenario(&self, scenario_id: ScenarioId) -> Vec<ReactionRule>;
}

/// Forma serializable de un catálogo completo (fixtures, archivos de demo).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub instruments: Vec<Instrument>,
    #[serde(default)]
    pub reagents: Vec<Reagent>,
    #[serde(default)]
    pub reactions: Vec<ReactionRule>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Catálogo inmutable en memoria, indexado por id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    instruments: BTreeMap<InstrumentId, Instrument>,
    reagents: BTreeMap<ReagentId, Reagent>,
    reactions: BTreeMap<i64, ReactionRule>,
    scenarios: BTreeMap<ScenarioId, Scenario>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instruments.insert(instrument.id, instrument);
        self
    }

    pub fn with_reagent(mut self, reagent: Reagent) -> Self {
        self.reagents.insert(reagent.id, reagent);
        self
    }

    pub fn with_reaction(mut self, reaction: ReactionRule) -> Self {
        self.reactions.insert(reaction.id, reaction);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.insert(scenario.id, scenario);
        self
    }

    /// Construye el catálogo validando que no haya marcadores repetidos.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, DomainError> {
        let mut catalog = Self::new();
        let mut markers: BTreeMap<MarkerId, InstrumentId> = BTreeMap::new();
        for instrument in snapshot.instruments {
            if let Some(marker) = instrument.marker_id {
                if let Some(other) = markers.insert(marker, instrument.id) {
                    return Err(DomainError::Validation(format!(
                        "marker {marker} assigned to instruments {other} and {}",
                        instrument.id
                    )));
                }
            }
            catalog = catalog.with_instrument(instrument);
        }
        for reagent in snapshot.reagents {
            catalog = catalog.with_reagent(reagent);
        }
        for reaction in snapshot.reactions {
            catalog = catalog.with_reaction(reaction);
        }
        for scenario in snapshot.scenarios {
            catalog = catalog.with_scenario(scenario);
        }
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(raw)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

impl Catalog for InMemoryCatalog {
    fn scenario_steps(&self, scenario_id: ScenarioId) -> Result<Vec<ScenarioStep>, DomainError> {
        self.scenarios
            .get(&scenario_id)
            .map(Scenario::ordered_steps)
            .ok_or_else(|| DomainError::NotFound(format!("scenario {scenario_id}")))
    }

    fn scenario_exists(&self, scenario_id: ScenarioId) -> bool {
        self.scenarios.contains_key(&scenario_id)
    }

    fn instrument(&self, id: InstrumentId) -> Option<Instrument> {
        self.instruments.get(&id).cloned()
    }

    fn instruments_of_type(&self, instrument_type: &str, containers_only: bool) -> Vec<Instrument> {
        // BTreeMap itera en orden de id ascendente
        self.instruments
            .values()
            .filter(|i| i.is_type(instrument_type) && (!containers_only || i.is_container))
            .cloned()
            .collect()
    }

    fn instrument_by_marker(&self, marker_id: MarkerId) -> Option<Instrument> {
        self.instruments.values().find(|i| i.marker_id == Some(marker_id)).cloned()
    }

    fn reagent(&self, id: ReagentId) -> Option<Reagent> {
        self.reagents.get(&id).cloned()
    }

    fn reactions_for_scenario(&self, scenario_id: ScenarioId) -> Vec<ReactionRule> {
        self.reactions
            .values()
            .filter(|r| r.applies_to_scenario(scenario_id))
            .cloned()
            .collect()
    }
}
