//! lab-core: motor de ejecución de escenarios de laboratorio.
//!
//! Mantiene el estado de cada ejecución (contenidos por recipiente y cursor
//! del paso esperado), valida las acciones del usuario contra el escenario,
//! aplica transferencias y resuelve reacciones químicas.
pub mod action;
pub mod compat;
pub mod constants;
pub mod container;
pub mod engine;
pub mod errors;
pub mod reaction;
pub mod run;

pub use action::{check_step, ActionRequest, Amount, LabAction, ToolTransfer};
pub use container::{Containers, ContentItem};
pub use engine::{parse_run_id, LabEngine};
pub use errors::{ErrorClass, LabError};
pub use reaction::ReactionOutcome;
pub use run::{ContainerMeta, RunId, RunRegistry, RunState, RunStateView};
