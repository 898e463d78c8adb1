use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    #[error("detection failed: {0}")]
    Detection(String),
    #[error("invalid vision configuration: {0}")]
    Config(String),
    #[error("vision task failed: {0}")]
    Task(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
