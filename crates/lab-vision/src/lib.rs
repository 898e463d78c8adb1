//! lab-vision: detección de gestos de vertido a partir de marcadores
//! fiduciales y su traducción a acciones del motor de escenarios.
pub mod active_run;
pub mod bridge;
pub mod config;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod source;

pub use active_run::ActiveRun;
pub use bridge::{BridgeExit, PourSink, VisionBridge, VisionHandle};
pub use config::{CameraDevice, VisionConfig};
pub use debounce::{MarkerPair, PourDebouncer};
pub use error::VisionError;
pub use geometry::{observe_frame, MarkerDetection, MarkerObservation, Point, PourGeometry};
pub use source::{FrameSource, MarkerDetector, PassthroughDetector, RecordedFrame, ReplaySource};
