use serde::{Deserialize, Serialize};

pub type InstrumentId = i64;
/// Identificador del marcador fiducial (ArUco) impreso sobre el instrumento.
pub type MarkerId = i64;

pub const BEAKER: &str = "beaker";
pub const FLASK: &str = "flask";
pub const PIPETTE: &str = "pipette";
pub const SPATULA: &str = "spatula";

/// Instrumento del catálogo (vaso, matraz, pipeta, espátula...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub name: String,
    pub instrument_type: String,
    #[serde(default = "default_is_container")]
    pub is_container: bool,
    /// Lista blanca separada por comas; vacía o ausente significa "todos".
    #[serde(default)]
    pub allowed_physical_states: Option<String>,
    #[serde(default)]
    pub marker_id: Option<MarkerId>,
}

fn default_is_container() -> bool {
    true
}

impl Instrument {
    pub fn new(id: InstrumentId, name: &str, instrument_type: &str, is_container: bool) -> Self {
        Self { id,
               name: name.to_string(),
               instrument_type: instrument_type.to_string(),
               is_container,
               allowed_physical_states: None,
               marker_id: None }
    }

    pub fn with_allowed_states(mut self, states: &str) -> Self {
        self.allowed_physical_states = Some(states.to_string());
        self
    }

    pub fn with_marker(mut self, marker_id: MarkerId) -> Self {
        self.marker_id = Some(marker_id);
        self
    }

    pub fn is_type(&self, instrument_type: &str) -> bool {
        self.instrument_type == instrument_type
    }
}
