//! Heurísticas geométricas sobre marcadores detectados en un cuadro.
//!
//! Un marcador inclinado es una fuente de vertido candidata; su destino es el
//! marcador visible más cercano por debajo de él dentro de una ventana
//! horizontal y vertical acotada.
use indexmap::IndexMap;
use lab_domain::MarkerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Marcador tal como lo entrega un detector: id y las cuatro esquinas en
/// el orden del diccionario de marcadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDetection {
    pub marker_id: MarkerId,
    pub corners: [Point; 4],
}

impl MarkerDetection {
    pub fn new(marker_id: MarkerId, corners: [Point; 4]) -> Self {
        Self { marker_id, corners }
    }

    /// Cuadrado de lado `side` centrado en `(cx, cy)` rotado `tilt_deg` grados.
    pub fn square(marker_id: MarkerId, cx: f64, cy: f64, side: f64, tilt_deg: f64) -> Self {
        let (sin, cos) = tilt_deg.to_radians().sin_cos();
        let half = side / 2.0;
        let rotate = |dx: f64, dy: f64| Point::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos);
        Self::new(marker_id,
                  [rotate(-half, -half), rotate(half, -half), rotate(half, half), rotate(-half, half)])
    }

    pub fn center(&self) -> Point {
        let (sx, sy) = self.corners.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / 4.0, sy / 4.0)
    }

    /// Ángulo en grados del vector esquina 0 -> esquina 1.
    pub fn tilt_deg(&self) -> f64 {
        let [a, b, ..] = self.corners;
        (b.y - a.y).atan2(b.x - a.x).to_degrees()
    }

    pub fn observe(&self) -> MarkerObservation {
        MarkerObservation { marker_id: self.marker_id,
                            center: self.center(),
                            tilt_deg: self.tilt_deg() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    pub marker_id: MarkerId,
    pub center: Point,
    pub tilt_deg: f64,
}

/// Observaciones de un cuadro, una por id. Si un id aparece varias veces
/// prevalece la última detección, en la posición de la primera.
pub fn observe_frame(detections: &[MarkerDetection]) -> Vec<MarkerObservation> {
    let mut by_id = IndexMap::new();
    for detection in detections {
        by_id.insert(detection.marker_id, detection.observe());
    }
    by_id.into_values().collect()
}

/// Umbrales del gesto de vertido, en grados y píxeles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PourGeometry {
    pub tilt_threshold_deg: f64,
    pub max_dx: f64,
    pub min_dy: f64,
    pub max_dy: f64,
}

impl Default for PourGeometry {
    fn default() -> Self {
        Self { tilt_threshold_deg: 25.0,
               max_dx: 120.0,
               min_dy: 15.0,
               max_dy: 300.0 }
    }
}

impl PourGeometry {
    pub fn is_tilted(&self, tilt_deg: f64) -> bool {
        tilt_deg.abs() > self.tilt_threshold_deg
    }

    /// Destino más cercano por debajo de `source`; en empate gana el primero.
    pub fn find_target(&self, source: &MarkerObservation, visible: &[MarkerObservation]) -> Option<MarkerId> {
        let mut best: Option<(MarkerId, f64)> = None;
        for candidate in visible.iter().filter(|c| c.marker_id != source.marker_id) {
            let dx = (candidate.center.x - source.center.x).abs();
            let dy = candidate.center.y - source.center.y;
            if dx > self.max_dx || dy <= self.min_dy || dy > self.max_dy {
                continue;
            }
            if best.map_or(true, |(_, best_dy)| dy < best_dy) {
                best = Some((candidate.marker_id, dy));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Pares `(fuente, destino)` detectados en un cuadro, en orden de aparición
    /// de las fuentes.
    pub fn pour_candidates(&self, observations: &[MarkerObservation]) -> Vec<(MarkerId, MarkerId)> {
        observations.iter()
                    .filter(|o| self.is_tilted(o.tilt_deg))
                    .filter_map(|source| self.find_target(source, observations).map(|t| (source.marker_id, t)))
                    .collect()
    }
}
