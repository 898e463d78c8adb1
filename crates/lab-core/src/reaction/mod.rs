//! Resolución de reacciones sobre el contenido de un recipiente.
//!
//! Una regla aplica cuando su conjunto de reactivos requeridos no está vacío y
//! está contenido en los reactivos presentes. Gana la regla más específica
//! (mayor cardinalidad); ante empate, la de menor id.
use lab_domain::{AmountUnit, ReactionId, ReactionRule, ReagentId};
use log::{debug, warn};
use std::collections::BTreeSet;

use crate::constants::DEFAULT_PRODUCT_AMOUNT;
use crate::container::Containers;

/// Resultado de aplicar una regla.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionOutcome {
    pub rule_id: ReactionId,
    pub reaction_key: String,
    pub product_reagent_id: ReagentId,
    pub amount_value: f64,
    pub amount_unit: AmountUnit,
    pub message: String,
}

pub fn select_rule<'a>(rules: &'a [ReactionRule], present: &BTreeSet<ReagentId>) -> Option<&'a ReactionRule> {
    rules.iter()
         .filter_map(|rule| {
             let required = rule.required_reagents();
             (!required.is_empty() && required.is_subset(present)).then_some((required.len(), rule))
         })
         .max_by(|(len_a, a), (len_b, b)| len_a.cmp(len_b).then_with(|| b.id.cmp(&a.id)))
         .map(|(_, rule)| rule)
}

/// Aplica la mejor regla al recipiente. `None` si no hay coincidencia (o el
/// recipiente está vacío); en ese caso el contenido no se toca.
pub fn resolve(rules: &[ReactionRule], containers: &mut Containers, container: &str) -> Option<ReactionOutcome> {
    let present = containers.present_reagent_ids(container);
    if present.is_empty() {
        return None;
    }
    let rule = select_rule(rules, &present)?;
    let required = rule.required_reagents();

    let consumed = containers.drain_reagents(container, &required);
    let total: f64 = consumed.iter().map(|item| item.amount_value).sum();
    let amount_value = if total == 0.0 { DEFAULT_PRODUCT_AMOUNT } else { total };
    let amount_unit = consumed.first().map(|item| item.amount_unit).unwrap_or(AmountUnit::Unit);
    if consumed.iter().any(|item| item.amount_unit != amount_unit) {
        warn!("reaction {} consumes mixed units in '{}', product uses {}",
              rule.id, container, amount_unit);
    }
    containers.add_content(container, rule.product_reagent_id, amount_value, amount_unit);

    debug!("reaction {} ({}) applied in '{}' -> reagent {} {} {}",
           rule.id,
           rule.reaction_key(),
           container,
           rule.product_reagent_id,
           amount_value,
           amount_unit);
    Some(ReactionOutcome { rule_id: rule.id,
                           reaction_key: rule.reaction_key(),
                           product_reagent_id: rule.product_reagent_id,
                           amount_value,
                           amount_unit,
                           message: rule.message.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContentItem;

    fn containers() -> Containers {
        Containers::with_names(["beaker_1"])
    }

    #[test]
    fn empty_container_never_reacts() {
        let rules = vec![ReactionRule::new(1, 9, "x").requires(3)];
        let mut c = containers();
        assert!(resolve(&rules, &mut c, "beaker_1").is_none());
    }

    #[test]
    fn rule_without_required_reagents_never_applies() {
        let rules = vec![ReactionRule::new(1, 9, "vacía")];
        let mut c = containers();
        c.add_content("beaker_1", 3, 1.0, AmountUnit::Gram);
        assert!(resolve(&rules, &mut c, "beaker_1").is_none());
        assert_eq!(c.items("beaker_1").len(), 1);
    }

    #[test]
    fn most_specific_rule_wins() {
        let rules = vec![ReactionRule::new(1, 8, "simple").requires(3),
                         ReactionRule::new(2, 9, "doble").requires(3).requires(4)];
        let mut c = containers();
        c.add_content("beaker_1", 3, 10.0, AmountUnit::Gram);
        c.add_content("beaker_1", 4, 10.0, AmountUnit::Gram);
        let outcome = resolve(&rules, &mut c, "beaker_1").unwrap();
        assert_eq!(outcome.rule_id, 2);
        assert_eq!(c.items("beaker_1"), &[ContentItem::new(9, 20.0, AmountUnit::Gram)]);
    }

    #[test]
    fn ties_go_to_lowest_rule_id() {
        let rules = vec![ReactionRule::new(7, 8, "siete").requires(3),
                         ReactionRule::new(2, 9, "dos").requires(4)];
        let present = BTreeSet::from([3, 4]);
        assert_eq!(select_rule(&rules, &present).map(|r| r.id), Some(2));
    }

    #[test]
    fn unrelated_items_survive_the_reaction() {
        let rules = vec![ReactionRule::new(1, 9, "x").requires(3)];
        let mut c = containers();
        c.add_content("beaker_1", 5, 2.0, AmountUnit::Milliliter);
        c.add_content("beaker_1", 3, 4.0, AmountUnit::Milliliter);
        let outcome = resolve(&rules, &mut c, "beaker_1").unwrap();
        assert_eq!(outcome.amount_value, 4.0);
        assert_eq!(c.items("beaker_1"),
                   &[ContentItem::new(5, 2.0, AmountUnit::Milliliter), ContentItem::new(9, 4.0, AmountUnit::Milliliter)]);
    }

    #[test]
    fn zero_amounts_produce_default_quantity() {
        let rules = vec![ReactionRule::new(1, 9, "x").requires(3)];
        let mut c = containers();
        c.add_content("beaker_1", 3, 0.0, AmountUnit::Drop);
        let outcome = resolve(&rules, &mut c, "beaker_1").unwrap();
        assert_eq!(outcome.amount_value, DEFAULT_PRODUCT_AMOUNT);
        assert_eq!(outcome.amount_unit, AmountUnit::Drop);
    }
}
