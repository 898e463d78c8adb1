//! Reglas de reacción: conjunto de reactivos requeridos -> producto.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::reagent::ReagentId;
use crate::scenario::ScenarioId;

pub type ReactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReagentRole {
    Reagent,
    Product,
}

/// Vínculo reacción <-> reactivo. El coeficiente es informativo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionReagent {
    pub reagent_id: ReagentId,
    #[serde(default = "default_coefficient")]
    pub coefficient: u32,
    #[serde(default = "default_role")]
    pub role: ReagentRole,
}

fn default_coefficient() -> u32 {
    1
}

fn default_role() -> ReagentRole {
    ReagentRole::Reagent
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRule {
    pub id: ReactionId,
    #[serde(default)]
    pub description: String,
    pub product_reagent_id: ReagentId,
    pub message: String,
    /// `None` = regla global, utilizable por cualquier escenario.
    #[serde(default)]
    pub scenario_id: Option<ScenarioId>,
    #[serde(default)]
    pub reagents: Vec<ReactionReagent>,
}

impl ReactionRule {
    pub fn new(id: ReactionId, product_reagent_id: ReagentId, message: &str) -> Self {
        Self { id,
               description: String::new(),
               product_reagent_id,
               message: message.to_string(),
               scenario_id: None,
               reagents: Vec::new() }
    }

    pub fn scoped_to(mut self, scenario_id: ScenarioId) -> Self {
        self.scenario_id = Some(scenario_id);
        self
    }

    pub fn requires(mut self, reagent_id: ReagentId) -> Self {
        self.reagents.push(ReactionReagent { reagent_id,
                                             coefficient: 1,
                                             role: ReagentRole::Reagent });
        self
    }

    /// Ids con rol `reagent` (los productos listados no cuentan).
    pub fn required_reagents(&self) -> BTreeSet<ReagentId> {
        self.reagents
            .iter()
            .filter(|link| link.role == ReagentRole::Reagent)
            .map(|link| link.reagent_id)
            .collect()
    }

    /// Clave canónica: ids de todos los vínculos, ordenados y unidos por `+`.
    pub fn reaction_key(&self) -> String {
        let mut ids: Vec<ReagentId> = self.reagents.iter().map(|l| l.reagent_id).collect();
        ids.sort_unstable();
        ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join("+")
    }

    pub fn applies_to_scenario(&self, scenario_id: ScenarioId) -> bool {
        match self.scenario_id {
            Some(owner) => owner == scenario_id,
            None => true,
        }
    }
}
