//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone `CONFIG`.
use lab_vision::VisionConfig;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub struct AppConfig {
    /// Catálogo JSON (`LAB_CATALOG_PATH`); sin él se usa el catálogo de demo.
    pub catalog_path: Option<PathBuf>,
    pub vision: VisionConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        lab_vision::config::init_dotenv();
        let catalog_path = env::var("LAB_CATALOG_PATH").ok()
                                                       .filter(|p| !p.trim().is_empty())
                                                       .map(PathBuf::from);
        Ok(Self { catalog_path,
                  vision: VisionConfig::from_env()? })
    }
}

/// Configuración global, evaluada una sola vez. Un error de configuración
/// queda guardado como texto y se reporta en cada acceso.
pub static CONFIG: Lazy<Result<AppConfig, String>> = Lazy::new(|| AppConfig::from_env().map_err(|e| e.to_string()));

pub fn config() -> Result<&'static AppConfig, AppError> {
    CONFIG.as_ref().map_err(|e| AppError::Config(e.clone()))
}
