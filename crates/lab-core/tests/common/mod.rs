#![allow(dead_code)]

use lab_core::LabEngine;
use lab_domain::instrument::{BEAKER, FLASK, PIPETTE, SPATULA};
use lab_domain::{ActionKind, AmountUnit, InMemoryCatalog, Instrument, PhysicalState, ReactionRule, Reagent, Scenario,
                 ScenarioStep};

pub const WATER: i64 = 1;
pub const SALT: i64 = 2;
pub const HCL: i64 = 3;
pub const NAOH: i64 = 4;
pub const SODIUM_CHLORIDE: i64 = 7;
pub const BRINE: i64 = 9;

pub const SINGLE_ADD: i64 = 1;
pub const NEUTRALIZATION: i64 = 2;
pub const POUR_SOLID: i64 = 3;
pub const TWO_ADDS: i64 = 4;
pub const PIPETTE_AND_POUR: i64 = 5;
pub const SPATULA_SHORTAGE: i64 = 6;
pub const FLASK_ONLY_LIQUIDS: i64 = 7;
pub const FREE_PIPETTE: i64 = 8;
pub const FREE_SPATULA: i64 = 9;
pub const ACID_AND_WATER: i64 = 10;

pub const NEUTRALIZATION_MSG: &str = "Neutralización: se formó salmuera";

pub fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new().with_instrument(Instrument::new(1, "Vaso 250 mL", BEAKER, true).with_marker(10))
                          .with_instrument(Instrument::new(2, "Vaso 100 mL", BEAKER, true).with_marker(11))
                          .with_instrument(Instrument::new(3, "Erlenmeyer", FLASK, true).with_allowed_states("liquid, solution")
                                                                                        .with_marker(12))
                          .with_instrument(Instrument::new(4, "Pipeta", PIPETTE, false))
                          .with_instrument(Instrument::new(5, "Espátula", SPATULA, false))
                          .with_reagent(Reagent::new(WATER, "Agua", "H2O", PhysicalState::Liquid))
                          .with_reagent(Reagent::new(SALT, "Sal gruesa", "NaCl", PhysicalState::Solid))
                          .with_reagent(Reagent::new(HCL, "Ácido clorhídrico", "HCl", PhysicalState::Solution))
                          .with_reagent(Reagent::new(NAOH, "Hidróxido de sodio", "NaOH", PhysicalState::Solution))
                          .with_reagent(Reagent::new(SODIUM_CHLORIDE, "Cloruro de sodio", "NaCl", PhysicalState::Solid))
                          .with_reagent(Reagent::new(BRINE, "Salmuera", "NaCl(aq)", PhysicalState::Solution))
                          .with_reaction(ReactionRule::new(1, BRINE, NEUTRALIZATION_MSG).requires(HCL).requires(NAOH))
                          .with_scenario(Scenario::new(SINGLE_ADD, "Pesar sal")
                              .with_step(ScenarioStep::new(1, 0, ActionKind::AddReagent, "Agregar 5 g de NaCl")
                                  .target("beaker_1").reagent(SODIUM_CHLORIDE).amount(5.0, AmountUnit::Gram)))
                          .with_scenario(Scenario::new(NEUTRALIZATION, "Neutralización")
                              .with_step(ScenarioStep::new(2, 0, ActionKind::AddReagent, "Agregar HCl")
                                  .target("beaker_1").reagent(HCL).amount(10.0, AmountUnit::Gram))
                              .with_step(ScenarioStep::new(3, 1, ActionKind::AddReagent, "Agregar NaOH")
                                  .target("beaker_1").reagent(NAOH).amount(10.0, AmountUnit::Gram)))
                          .with_scenario(Scenario::new(POUR_SOLID, "Verter un sólido")
                              .with_step(ScenarioStep::new(4, 0, ActionKind::AddReagent, "Agregar sal")
                                  .target("beaker_1").reagent(SALT).amount(5.0, AmountUnit::Gram))
                              .with_step(ScenarioStep::new(5, 1, ActionKind::PourLiquidBetweenContainers, "Verter")
                                  .source("beaker_1").target("beaker_2")))
                          .with_scenario(Scenario::new(TWO_ADDS, "Dos recipientes")
                              .with_step(ScenarioStep::new(6, 0, ActionKind::AddReagent, "Agregar agua")
                                  .target("beaker_1").reagent(WATER).amount(10.0, AmountUnit::Milliliter))
                              .with_step(ScenarioStep::new(7, 1, ActionKind::AddReagent, "Agregar sal")
                                  .target("beaker_2").reagent(SALT).amount(5.0, AmountUnit::Gram)))
                          .with_scenario(Scenario::new(PIPETTE_AND_POUR, "Pipetear y verter")
                              .with_step(ScenarioStep::new(8, 0, ActionKind::TransferLiquidWithPipette, "Pipetear agua")
                                  .instrument(4).reagent(WATER).target("beaker_1").amount(5.0, AmountUnit::Milliliter))
                              .with_step(ScenarioStep::new(9, 1, ActionKind::PourLiquidBetweenContainers, "Verter al matraz")))
                          .with_scenario(Scenario::new(SPATULA_SHORTAGE, "Espátula sin stock")
                              .with_step(ScenarioStep::new(10, 0, ActionKind::AddReagent, "Agregar 3 g de sal")
                                  .target("beaker_1").reagent(SALT).amount(3.0, AmountUnit::Gram))
                              .with_step(ScenarioStep::new(11, 1, ActionKind::TransferSolidWithSpatula, "Pasar sal")
                                  .instrument(5).reagent(SALT)))
                          .with_scenario(Scenario::new(FLASK_ONLY_LIQUIDS, "Matraz")
                              .with_step(ScenarioStep::new(12, 0, ActionKind::AddReagent, "Agregar sal al matraz")))
                          .with_scenario(Scenario::new(FREE_PIPETTE, "Pipeta libre")
                              .with_step(ScenarioStep::new(13, 0, ActionKind::TransferLiquidWithPipette, "Cargar"))
                              .with_step(ScenarioStep::new(14, 1, ActionKind::TransferLiquidWithPipette, "Trasvasar")))
                          .with_scenario(Scenario::new(FREE_SPATULA, "Espátula libre")
                              .with_step(ScenarioStep::new(15, 0, ActionKind::TransferSolidWithSpatula, "Pasar sólido")))
                          .with_scenario(Scenario::new(ACID_AND_WATER, "Diluir ácido")
                              .with_step(ScenarioStep::new(16, 0, ActionKind::AddReagent, "Agregar HCl")
                                  .target("beaker_1").reagent(HCL))
                              .with_step(ScenarioStep::new(17, 1, ActionKind::AddReagent, "Agregar agua")
                                  .target("beaker_1").reagent(WATER)))
}

pub fn engine() -> LabEngine<InMemoryCatalog> {
    LabEngine::new(catalog())
}
