//! Catálogo y grabaciones de demostración (directorio `demos/`).
use lab_domain::{DomainError, InMemoryCatalog, ScenarioId};

pub const CATALOG_JSON: &str = include_str!("../demos/catalog.json");
/// Vaso 2 inclinándose sobre el vaso 1, un cuadro por línea.
pub const POUR_DETECTIONS: &str = include_str!("../demos/pour.jsonl");

pub const NEUTRALIZATION: ScenarioId = 1;
pub const SALT_SOLUTION: ScenarioId = 2;

pub fn demo_catalog() -> Result<InMemoryCatalog, DomainError> {
    InMemoryCatalog::from_json_str(CATALOG_JSON)
}
