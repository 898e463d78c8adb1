//! Unidades de cantidad y estados físicos.
//!
//! Ambos tipos tienen una forma textual estable (la que viaja en JSON y la que
//! se compara contra las listas blancas de los instrumentos).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Unidad de una cantidad dentro de un recipiente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountUnit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mL")]
    Milliliter,
    #[serde(rename = "drop")]
    Drop,
    /// Unidad genérica usada por el atajo `add_reagent_to_container`.
    #[serde(rename = "un")]
    Unit,
}

impl AmountUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountUnit::Gram => "g",
            AmountUnit::Milliliter => "mL",
            AmountUnit::Drop => "drop",
            AmountUnit::Unit => "un",
        }
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmountUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(AmountUnit::Gram),
            "mL" => Ok(AmountUnit::Milliliter),
            "drop" => Ok(AmountUnit::Drop),
            "un" => Ok(AmountUnit::Unit),
            other => Err(DomainError::Validation(format!("unknown amount unit '{other}'"))),
        }
    }
}

/// Estado físico de un reactivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalState {
    Solid,
    Liquid,
    Solution,
    Gas,
}

impl PhysicalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicalState::Solid => "solid",
            PhysicalState::Liquid => "liquid",
            PhysicalState::Solution => "solution",
            PhysicalState::Gas => "gas",
        }
    }

    /// Líquidos y soluciones pueden verterse o pipetearse.
    pub fn is_pourable(&self) -> bool {
        matches!(self, PhysicalState::Liquid | PhysicalState::Solution)
    }
}

impl fmt::Display for PhysicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhysicalState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(PhysicalState::Solid),
            "liquid" => Ok(PhysicalState::Liquid),
            "solution" => Ok(PhysicalState::Solution),
            "gas" => Ok(PhysicalState::Gas),
            other => Err(DomainError::Validation(format!("unknown physical state '{other}'"))),
        }
    }
}
