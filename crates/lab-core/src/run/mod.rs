pub mod registry;
pub mod state;

pub use registry::RunRegistry;
pub use state::{default_containers_meta, ContainerMeta, RunId, RunState, RunStateView};
