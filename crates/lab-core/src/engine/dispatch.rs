//! Aplicación de cada tipo de acción sobre un borrador del estado.
//!
//! Las funciones de este módulo validan antes de mutar y trabajan siempre
//! sobre una copia de la ejecución; el motor sólo confirma el borrador si la
//! acción completa tuvo éxito.
use lab_domain::instrument::{PIPETTE, SPATULA};
use lab_domain::{AmountUnit, Catalog, PhysicalState, ReagentId};
use log::info;

use crate::action::{Amount, LabAction, ToolTransfer};
use crate::compat::{check_compatible, require_state};
use crate::errors::LabError;
use crate::reaction::{self, ReactionOutcome};
use crate::run::RunState;

/// Restricciones propias de una herramienta de transferencia.
struct ToolRules {
    instrument_type: &'static str,
    states: &'static [PhysicalState],
    units: &'static [AmountUnit],
}

const SPATULA_RULES: ToolRules = ToolRules { instrument_type: SPATULA,
                                             states: &[PhysicalState::Solid],
                                             units: &[AmountUnit::Gram] };

const PIPETTE_RULES: ToolRules = ToolRules { instrument_type: PIPETTE,
                                             states: &[PhysicalState::Liquid, PhysicalState::Solution],
                                             units: &[AmountUnit::Milliliter, AmountUnit::Drop] };

pub(crate) fn apply<C>(catalog: &C, run: &mut RunState, action: &LabAction) -> Result<Option<ReactionOutcome>, LabError>
    where C: Catalog + ?Sized
{
    match action {
        LabAction::AddReagent { reagent_id, target, amount } => add_reagent(catalog, run, *reagent_id, target, *amount)?,
        LabAction::TransferSolidWithSpatula(transfer) => tool_transfer(catalog, run, transfer, &SPATULA_RULES)?,
        LabAction::TransferLiquidWithPipette(transfer) => tool_transfer(catalog, run, transfer, &PIPETTE_RULES)?,
        LabAction::PourLiquidBetweenContainers { source, target } => pour(catalog, run, source, target)?,
    }
    Ok(resolve_reactions(catalog, run, action.target()))
}

fn add_reagent<C>(catalog: &C,
                  run: &mut RunState,
                  reagent_id: ReagentId,
                  target: &str,
                  amount: Amount)
                  -> Result<(), LabError>
    where C: Catalog + ?Sized
{
    let instrument_id = run.container_meta(target)?.instrument_id;
    let instrument = catalog.instrument(instrument_id)
                            .ok_or_else(|| LabError::NotFound(format!("instrument {instrument_id} backing '{target}'")))?;
    let reagent = catalog.reagent(reagent_id)
                         .ok_or_else(|| LabError::NotFound(format!("reagent {reagent_id}")))?;
    check_compatible(&instrument, &reagent)?;
    run.containers.add_content(target, reagent_id, amount.value, amount.unit);
    Ok(())
}

fn tool_transfer<C>(catalog: &C, run: &mut RunState, t: &ToolTransfer, rules: &ToolRules) -> Result<(), LabError>
    where C: Catalog + ?Sized
{
    let instrument = catalog.instrument(t.instrument_id)
                            .filter(|i| i.is_type(rules.instrument_type))
                            .ok_or_else(|| {
                                LabError::InvalidRequest(format!("instrument {} is not a valid {}",
                                                                 t.instrument_id, rules.instrument_type))
                            })?;
    if !rules.units.contains(&t.amount.unit) {
        let accepted: Vec<&str> = rules.units.iter().map(AmountUnit::as_str).collect();
        return Err(LabError::InvalidRequest(format!("{} transfers must use {}, got {}",
                                                    rules.instrument_type,
                                                    accepted.join(" or "),
                                                    t.amount.unit)));
    }
    let reagent = catalog.reagent(t.reagent_id)
                         .ok_or_else(|| LabError::NotFound(format!("reagent {}", t.reagent_id)))?;
    require_state(&reagent, rules.states, rules.instrument_type)?;
    check_compatible(&instrument, &reagent)?;

    run.container_meta(&t.target)?;
    if let Some(source) = &t.source {
        if *source == t.target {
            return Err(LabError::InvalidTransfer(format!("source and target are both '{source}'")));
        }
        run.container_meta(source)?;
        run.containers.remove_content(source, t.reagent_id, t.amount.value, t.amount.unit)?;
    }
    run.containers.add_content(&t.target, t.reagent_id, t.amount.value, t.amount.unit);
    Ok(())
}

fn pour<C>(catalog: &C, run: &mut RunState, source: &str, target: &str) -> Result<(), LabError>
    where C: Catalog + ?Sized
{
    if source == target {
        return Err(LabError::InvalidTransfer(format!("source and target are both '{source}'")));
    }
    run.container_meta(source)?;
    run.container_meta(target)?;

    for item in run.containers.items(source) {
        let reagent = catalog.reagent(item.reagent_id)
                             .ok_or_else(|| LabError::NotFound(format!("reagent {}", item.reagent_id)))?;
        if !reagent.physical_state.is_pourable() {
            return Err(LabError::InvalidTransfer(format!("only liquids or solutions can be poured, reagent {} is {}",
                                                         reagent.id, reagent.physical_state)));
        }
    }
    for item in run.containers.take_all(source) {
        run.containers.add_content(target, item.reagent_id, item.amount_value, item.amount_unit);
    }
    Ok(())
}

/// Resuelve reacciones en `container` y deja el mensaje de la regla aplicada
/// (o ninguno) en la ejecución.
fn resolve_reactions<C>(catalog: &C, run: &mut RunState, container: &str) -> Option<ReactionOutcome>
    where C: Catalog + ?Sized
{
    if run.containers.is_empty(container) {
        run.last_message = None;
        return None;
    }
    let rules = catalog.reactions_for_scenario(run.scenario_id);
    let outcome = reaction::resolve(&rules, &mut run.containers, container);
    match &outcome {
        Some(o) => {
            info!("run {}: reaction {} [{}] produced reagent {} in '{}'",
                  run.run_id, o.rule_id, o.reaction_key, o.product_reagent_id, container);
            run.last_message = Some(o.message.clone());
        }
        None => run.last_message = None,
    }
    outcome
}
