//! chemlab-rust: laboratorio virtual de química.
//!
//! Reúne el catálogo (`lab_domain`), el motor de escenarios (`lab_core`) y el
//! puente de visión (`lab_vision`) detrás de una configuración común.
pub mod config;
pub mod demo;
pub mod error;

pub use error::AppError;
pub use lab_core;
pub use lab_domain;
pub use lab_vision;

use lab_core::LabEngine;
use lab_domain::InMemoryCatalog;
use log::info;

use crate::config::AppConfig;

/// Catálogo configurado: archivo de `LAB_CATALOG_PATH` o el de demostración.
pub fn load_catalog(config: &AppConfig) -> Result<InMemoryCatalog, AppError> {
    match &config.catalog_path {
        Some(path) => {
            info!("loading catalog from {}", path.display());
            Ok(InMemoryCatalog::from_path(path)?)
        }
        None => Ok(demo::demo_catalog()?),
    }
}

pub fn build_engine(config: &AppConfig) -> Result<LabEngine<InMemoryCatalog>, AppError> {
    Ok(LabEngine::new(load_catalog(config)?))
}
