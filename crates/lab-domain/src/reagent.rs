use serde::{Deserialize, Serialize};

use crate::units::PhysicalState;

pub type ReagentId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reagent {
    pub id: ReagentId,
    pub name: String,
    #[serde(default)]
    pub formula: String,
    pub physical_state: PhysicalState,
}

impl Reagent {
    pub fn new(id: ReagentId, name: &str, formula: &str, physical_state: PhysicalState) -> Self {
        Self { id,
               name: name.to_string(),
               formula: formula.to_string(),
               physical_state }
    }
}
