//! Configuración del puente de visión desde variables de entorno.
//!
//! Variables reconocidas (todas opcionales):
//! `LAB_CAMERA_DEVICE`, `LAB_VISION_READ_TIMEOUT_MS`, `LAB_VISION_COOLDOWN_MS`,
//! `LAB_VISION_TILT_DEG`, `LAB_VISION_MAX_DX`, `LAB_VISION_MIN_DY`,
//! `LAB_VISION_MAX_DY`.
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::VisionError;
use crate::geometry::PourGeometry;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv();
});

pub const DEFAULT_CAMERA_DEVICE: &str = "/dev/video0";

/// Dispositivo de captura: índice numérico o ruta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraDevice {
    Index(u32),
    Path(String),
}

impl FromStr for CameraDevice {
    type Err = VisionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(VisionError::Config("empty camera device".into()));
        }
        Ok(raw.parse::<u32>().map_or_else(|_| CameraDevice::Path(raw.to_string()), CameraDevice::Index))
    }
}

impl fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraDevice::Index(i) => write!(f, "{i}"),
            CameraDevice::Path(p) => f.write_str(p),
        }
    }
}

impl Default for CameraDevice {
    fn default() -> Self {
        CameraDevice::Path(DEFAULT_CAMERA_DEVICE.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisionConfig {
    pub device: CameraDevice,
    /// Espera máxima por cuadro antes de registrar un aviso.
    pub read_timeout: Duration,
    pub cooldown: Duration,
    pub geometry: PourGeometry,
    /// Cuadros en vuelo entre el hilo lector y el bucle.
    pub channel_capacity: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self { device: CameraDevice::default(),
               read_timeout: Duration::from_millis(2000),
               cooldown: Duration::from_millis(1000),
               geometry: PourGeometry::default(),
               channel_capacity: 4 }
    }
}

fn parsed<T: FromStr>(key: &str) -> Result<Option<T>, VisionError> {
    match env::var(key) {
        Ok(raw) => raw.trim()
                      .parse()
                      .map(Some)
                      .map_err(|_| VisionError::Config(format!("{key}={raw} is not valid"))),
        Err(_) => Ok(None),
    }
}

fn millis(key: &str, fallback: Duration) -> Result<Duration, VisionError> {
    Ok(parsed::<u64>(key)?.map(Duration::from_millis).unwrap_or(fallback))
}

impl VisionConfig {
    pub fn from_env() -> Result<Self, VisionError> {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let device = match env::var("LAB_CAMERA_DEVICE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.device,
        };
        let g = defaults.geometry;
        let geometry = PourGeometry { tilt_threshold_deg: parsed("LAB_VISION_TILT_DEG")?.unwrap_or(g.tilt_threshold_deg),
                                      max_dx: parsed("LAB_VISION_MAX_DX")?.unwrap_or(g.max_dx),
                                      min_dy: parsed("LAB_VISION_MIN_DY")?.unwrap_or(g.min_dy),
                                      max_dy: parsed("LAB_VISION_MAX_DY")?.unwrap_or(g.max_dy) };
        if geometry.min_dy >= geometry.max_dy {
            return Err(VisionError::Config(format!("LAB_VISION_MIN_DY ({}) must be below LAB_VISION_MAX_DY ({})",
                                                   geometry.min_dy, geometry.max_dy)));
        }
        Ok(Self { device,
                  read_timeout: millis("LAB_VISION_READ_TIMEOUT_MS", defaults.read_timeout)?,
                  cooldown: millis("LAB_VISION_COOLDOWN_MS", defaults.cooldown)?,
                  geometry,
                  channel_capacity: defaults.channel_capacity })
    }
}

/// Fuerza la carga de `.env` desde aplicaciones externas.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
