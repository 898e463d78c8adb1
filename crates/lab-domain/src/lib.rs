//! Entidades del catálogo del laboratorio (instrumentos, reactivos, reacciones
//! y escenarios) y el contrato `Catalog` que consume el motor de ejecución.
pub mod catalog;
pub mod error;
pub mod instrument;
pub mod reaction;
pub mod reagent;
pub mod scenario;
pub mod units;

pub use catalog::{Catalog, CatalogSnapshot, InMemoryCatalog};
pub use error::DomainError;
pub use instrument::{Instrument, InstrumentId, MarkerId};
pub use reaction::{ReactionId, ReactionReagent, ReactionRule, ReagentRole};
pub use reagent::{Reagent, ReagentId};
pub use scenario::{ActionKind, Scenario, ScenarioId, ScenarioStep};
pub use units::{AmountUnit, PhysicalState};
