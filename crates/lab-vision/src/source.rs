//! Fuentes de cuadros y detectores de marcadores.
//!
//! La captura real depende del dispositivo, por eso el puente trabaja contra
//! los traits `FrameSource` y `MarkerDetector`. `ReplaySource` reproduce
//! detecciones grabadas (un cuadro JSON por línea) y `PassthroughDetector`
//! las interpreta sin analizar imagen alguna; una línea mal formada sólo
//! invalida su propio cuadro.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::error::VisionError;
use crate::geometry::MarkerDetection;

/// Lectura bloqueante de cuadros. `Ok(None)` indica fin de la fuente.
pub trait FrameSource: Send + 'static {
    type Frame: Send + 'static;

    fn read_frame(&mut self) -> Result<Option<Self::Frame>, VisionError>;

    fn describe(&self) -> String;
}

pub trait MarkerDetector<F>: Send + 'static {
    fn detect(&mut self, frame: &F) -> Result<Vec<MarkerDetection>, VisionError>;
}

/// Cuadros ya detectados: cada línea es un arreglo JSON de `MarkerDetection`.
/// Las líneas en blanco se ignoran.
pub struct ReplaySource {
    label: String,
    reader: Box<dyn BufRead + Send>,
    frame_interval: Option<Duration>,
    line_no: usize,
}

impl ReplaySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VisionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| VisionError::CameraUnavailable(format!("{}: {e}", path.display())))?;
        Ok(Self::from_reader(path.display().to_string(), BufReader::new(file)))
    }

    pub fn from_reader(label: impl Into<String>, reader: impl BufRead + Send + 'static) -> Self {
        Self { label: label.into(),
               reader: Box::new(reader),
               frame_interval: None,
               line_no: 0 }
    }

    /// Pausa entre cuadros, para reproducir a la cadencia de una cámara.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}

/// Línea grabada de un cuadro, todavía sin interpretar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub line_no: usize,
    pub raw: String,
}

impl FrameSource for ReplaySource {
    type Frame = RecordedFrame;

    fn read_frame(&mut self) -> Result<Option<Self::Frame>, VisionError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if !line.trim().is_empty() {
                break;
            }
        }
        if let Some(interval) = self.frame_interval {
            thread::sleep(interval);
        }
        Ok(Some(RecordedFrame { line_no: self.line_no,
                                raw: line.trim().to_string() }))
    }

    fn describe(&self) -> String {
        format!("replay:{}", self.label)
    }
}

/// Detector para cuadros que ya traen sus marcadores.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughDetector;

impl MarkerDetector<RecordedFrame> for PassthroughDetector {
    fn detect(&mut self, frame: &RecordedFrame) -> Result<Vec<MarkerDetection>, VisionError> {
        serde_json::from_str(&frame.raw).map_err(|e| VisionError::Detection(format!("line {}: {e}", frame.line_no)))
    }
}

impl MarkerDetector<Vec<MarkerDetection>> for PassthroughDetector {
    fn detect(&mut self, frame: &Vec<MarkerDetection>) -> Result<Vec<MarkerDetection>, VisionError> {
        Ok(frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn detect(source: &mut ReplaySource) -> Option<Result<Vec<MarkerDetection>, VisionError>> {
        source.read_frame().unwrap().map(|frame| PassthroughDetector.detect(&frame))
    }

    #[test]
    fn replays_frames_and_skips_blank_lines() {
        let raw = r#"[{"marker_id":1,"corners":[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}]}]

[]
"#;
        let mut source = ReplaySource::from_reader("mem", Cursor::new(raw.as_bytes().to_vec()));
        let first = detect(&mut source).unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].marker_id, 1);
        assert!(detect(&mut source).unwrap().unwrap().is_empty());
        assert!(source.read_frame().unwrap().is_none());
    }

    #[test]
    fn malformed_line_reports_its_position() {
        let mut source = ReplaySource::from_reader("mem", Cursor::new(b"[]\nnot json\n".to_vec()));
        assert!(detect(&mut source).unwrap().is_ok());
        match detect(&mut source) {
            Some(Err(VisionError::Detection(msg))) => assert!(msg.contains("line 2"), "{msg}"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_camera_unavailable() {
        assert!(matches!(ReplaySource::open("/definitely/not/here.jsonl"), Err(VisionError::CameraUnavailable(_))));
    }
}
