use lab_core::LabError;
use lab_domain::DomainError;
use lab_vision::VisionError;
use thiserror::Error;

/// Errores de la aplicación (binarios y fachada).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de catálogo: {0}")]
    Domain(#[from] DomainError),
    #[error("Error del motor: {0}")]
    Lab(#[from] LabError),
    #[error("Error de visión: {0}")]
    Vision(#[from] VisionError),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}
