//! Modelo de contenido de los recipientes de una ejecución.
//!
//! Cada recipiente guarda una lista ordenada de `ContentItem`, única por el par
//! `(reagent_id, amount_unit)`. Agregar el mismo par acumula la cantidad en
//! el lugar; retirar nunca deja cantidades negativas y elimina el ítem cuando
//! se agota.
use indexmap::IndexMap;
use lab_domain::{AmountUnit, ReagentId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::AMOUNT_EPSILON;
use crate::errors::LabError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub reagent_id: ReagentId,
    pub amount_value: f64,
    pub amount_unit: AmountUnit,
}

impl ContentItem {
    pub fn new(reagent_id: ReagentId, amount_value: f64, amount_unit: AmountUnit) -> Self {
        Self { reagent_id, amount_value, amount_unit }
    }

    fn same_key(&self, reagent_id: ReagentId, unit: AmountUnit) -> bool {
        self.reagent_id == reagent_id && self.amount_unit == unit
    }
}

/// Nombre de recipiente -> contenido, en orden de inserción.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Containers {
    inner: IndexMap<String, Vec<ContentItem>>,
}

impl Containers {
    /// Crea todos los recipientes nombrados, vacíos.
    pub fn with_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self { inner: names.into_iter().map(|n| (n.to_string(), Vec::new())).collect() }
    }

    pub fn items(&self, container: &str) -> &[ContentItem] {
        self.inner.get(container).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self, container: &str) -> bool {
        self.items(container).is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn add_content(&mut self, container: &str, reagent_id: ReagentId, amount: f64, unit: AmountUnit) {
        let contents = self.inner.entry(container.to_string()).or_default();
        match contents.iter_mut().find(|item| item.same_key(reagent_id, unit)) {
            Some(item) => item.amount_value += amount,
            None => contents.push(ContentItem::new(reagent_id, amount, unit)),
        }
    }

    pub fn remove_content(&mut self,
                          container: &str,
                          reagent_id: ReagentId,
                          amount: f64,
                          unit: AmountUnit)
                          -> Result<(), LabError> {
        let Some((contents, pos)) =
            self.inner
                .get_mut(container)
                .and_then(|c| c.iter().position(|item| item.same_key(reagent_id, unit)).map(|pos| (c, pos)))
        else {
            return Err(LabError::InsufficientQuantity { reagent_id,
                                                        requested: amount,
                                                        available: 0.0 });
        };
        let available = contents[pos].amount_value;
        if available + AMOUNT_EPSILON < amount {
            return Err(LabError::InsufficientQuantity { reagent_id,
                                                        requested: amount,
                                                        available });
        }
        let remaining = available - amount;
        if remaining <= AMOUNT_EPSILON {
            contents.remove(pos);
        } else {
            contents[pos].amount_value = remaining;
        }
        Ok(())
    }

    /// Ids de reactivo distintos presentes en el recipiente.
    pub fn present_reagent_ids(&self, container: &str) -> BTreeSet<ReagentId> {
        self.items(container).iter().map(|item| item.reagent_id).collect()
    }

    /// Vacía el recipiente y devuelve lo que contenía.
    pub fn take_all(&mut self, container: &str) -> Vec<ContentItem> {
        self.inner.get_mut(container).map(std::mem::take).unwrap_or_default()
    }

    /// Retira los ítems cuyo reactivo pertenece a `reagents`, en orden.
    pub fn drain_reagents(&mut self, container: &str, reagents: &BTreeSet<ReagentId>) -> Vec<ContentItem> {
        let Some(contents) = self.inner.get_mut(container) else {
            return Vec::new();
        };
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(contents).into_iter()
                                                                      .partition(|item| reagents.contains(&item.reagent_id));
        *contents = kept;
        taken
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContentItem])> {
        self.inner.iter().map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}
