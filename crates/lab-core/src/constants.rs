//! Constantes del motor de escenarios.

use lab_domain::AmountUnit;

/// Residuo por debajo del cual una cantidad se considera agotada al retirar.
pub const AMOUNT_EPSILON: f64 = 1e-9;

/// Cantidad y unidad fijas del atajo `add_reagent_to_container`.
pub const QUICK_ADD_AMOUNT: f64 = 1.0;
pub const QUICK_ADD_UNIT: AmountUnit = AmountUnit::Unit;

/// Cantidad del producto cuando los reactivos consumidos suman cero.
pub const DEFAULT_PRODUCT_AMOUNT: f64 = 1.0;

/// Nombres lógicos de los recipientes asignados al iniciar una ejecución.
pub const BEAKER_1: &str = "beaker_1";
pub const BEAKER_2: &str = "beaker_2";
pub const FLASK_1: &str = "flask_1";
pub const PIPETTE_1: &str = "pipette_1";
pub const SPATULA_1: &str = "spatula_1";
