//! Puente entre la cámara y el motor de escenarios.
//!
//! Un hilo dedicado lee cuadros (bloqueante) y ejecuta el detector; las
//! detecciones llegan por un canal acotado a una tarea Tokio que aplica la
//! heurística de vertido, el enfriamiento por par y despacha al motor desde el
//! pool bloqueante (el motor toma locks síncronos). La tarea espera cada cuadro
//! con un tiempo máximo y termina al cancelarse, al cerrarse la fuente o al
//! soltarse el `VisionHandle`. Los errores del motor se registran y el bucle sigue.
use lab_core::{LabEngine, LabError, RunId};
use lab_domain::{Catalog, MarkerId};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::thread;
use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinHandle};
use tokio::time::timeout;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::active_run::ActiveRun;
use crate::config::VisionConfig;
use crate::debounce::{MarkerPair, PourDebouncer};
use crate::error::VisionError;
use crate::geometry::{observe_frame, MarkerDetection, MarkerObservation};
use crate::source::{FrameSource, MarkerDetector};

/// Destino de los vertidos detectados.
pub trait PourSink: Send + Sync + 'static {
    fn notify_pour(&self, run_id: RunId, source: MarkerId, target: MarkerId) -> Result<(), LabError>;
}

impl<C: Catalog + 'static> PourSink for LabEngine<C> {
    fn notify_pour(&self, run_id: RunId, source: MarkerId, target: MarkerId) -> Result<(), LabError> {
        self.notify_marker_event(run_id, source, target).map(|_| ())
    }
}

/// Motivo de fin del bucle de visión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeExit {
    Cancelled,
    SourceClosed,
}

enum ReaderEvent {
    Detections(Vec<MarkerDetection>),
    DetectionFailed(VisionError),
    ReadFailed(VisionError),
}

pub struct VisionBridge<K: PourSink> {
    sink: Arc<K>,
    active_run: ActiveRun,
    debouncer: Arc<PourDebouncer>,
    config: VisionConfig,
}

impl<K: PourSink> VisionBridge<K> {
    pub fn new(sink: Arc<K>, active_run: ActiveRun, config: VisionConfig) -> Self {
        Self { sink,
               active_run,
               debouncer: Arc::new(PourDebouncer::new(config.cooldown)),
               config }
    }

    /// Comparte la tabla de enfriamiento con otros puentes que apunten a la
    /// misma ejecución.
    pub fn with_debouncer(mut self, debouncer: Arc<PourDebouncer>) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn debouncer(&self) -> &Arc<PourDebouncer> {
        &self.debouncer
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Procesa las observaciones de un cuadro y devuelve los pares
    /// despachados con éxito al motor.
    pub fn handle_observations(&self, observations: &[MarkerObservation]) -> Vec<MarkerPair> {
        let mut dispatched = Vec::new();
        for pair @ (source, target) in self.config.geometry.pour_candidates(observations) {
            if !self.debouncer.should_trigger(pair) {
                continue;
            }
            let Some(run_id) = self.active_run.current() else {
                debug!("pour {source}->{target} detected with no active run");
                continue;
            };
            match self.sink.notify_pour(run_id, source, target) {
                Ok(()) => {
                    info!("run {run_id}: pour {source}->{target} applied from vision");
                    dispatched.push(pair);
                }
                Err(e) => info!("run {run_id}: pour {source}->{target} from vision ignored: {e}"),
            }
        }
        dispatched
    }

    /// Arranca el hilo lector y la tarea del bucle en el runtime actual.
    pub fn spawn<S, D>(self, mut source: S, mut detector: D) -> Result<VisionHandle, VisionError>
        where S: FrameSource,
              D: MarkerDetector<S::Frame>
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| VisionError::Task(e.to_string()))?;
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let cancel = CancellationToken::new();
        let reader_cancel = cancel.clone();
        let label = source.describe();

        thread::Builder::new().name(format!("marker-reader-{}", self.config.device))
                              .spawn(move || {
                                  while !reader_cancel.is_cancelled() {
                                      let frame = match source.read_frame() {
                                          Ok(Some(frame)) => frame,
                                          Ok(None) => {
                                              debug!("{label}: end of stream");
                                              break;
                                          }
                                          Err(e) => {
                                              let _ = tx.blocking_send(ReaderEvent::ReadFailed(e));
                                              break;
                                          }
                                      };
                                      let event = match detector.detect(&frame) {
                                          Ok(detections) => ReaderEvent::Detections(detections),
                                          Err(e) => ReaderEvent::DetectionFailed(e),
                                      };
                                      if tx.blocking_send(event).is_err() {
                                          break;
                                      }
                                  }
                              })?;

        let (latest_tx, latest_rx) = watch::channel(Vec::new());
        let task = runtime.spawn(Arc::new(self).run_loop(rx, latest_tx, cancel.clone()));
        Ok(VisionHandle { _guard: cancel.clone().drop_guard(),
                          cancel,
                          task,
                          latest: latest_rx })
    }

    async fn run_loop(self: Arc<Self>,
                      mut rx: mpsc::Receiver<ReaderEvent>,
                      latest: watch::Sender<Vec<MarkerObservation>>,
                      cancel: CancellationToken)
                      -> BridgeExit {
        let device = &self.config.device;
        info!("vision bridge started on {device}");
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("vision bridge on {device} cancelled");
                    return BridgeExit::Cancelled;
                }
                next = timeout(self.config.read_timeout, rx.recv()) => next,
            };
            match next {
                Err(_) => warn!("no frame from {device} within {:?}", self.config.read_timeout),
                Ok(None) => {
                    info!("frame source on {device} closed");
                    return BridgeExit::SourceClosed;
                }
                Ok(Some(ReaderEvent::Detections(detections))) => {
                    let observations = observe_frame(&detections);
                    let bridge = Arc::clone(&self);
                    let dispatch = task::spawn_blocking(move || {
                        bridge.handle_observations(&observations);
                        observations
                    });
                    match dispatch.await {
                        Ok(observations) => {
                            latest.send_replace(observations);
                        }
                        Err(e) => error!("pour dispatch on {device} failed: {e}"),
                    }
                }
                Ok(Some(ReaderEvent::DetectionFailed(e))) => warn!("marker detection failed on {device}: {e}"),
                Ok(Some(ReaderEvent::ReadFailed(e))) => error!("camera {device} read failed: {e}"),
            }
        }
    }
}

/// Control de un puente en ejecución. Soltarlo cancela el puente.
pub struct VisionHandle {
    _guard: DropGuard,
    cancel: CancellationToken,
    task: JoinHandle<BridgeExit>,
    latest: watch::Receiver<Vec<MarkerObservation>>,
}

impl VisionHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Marcadores del último cuadro procesado.
    pub fn latest_observations(&self) -> Vec<MarkerObservation> {
        self.latest.borrow().clone()
    }

    pub fn observations(&self) -> watch::Receiver<Vec<MarkerObservation>> {
        self.latest.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Result<BridgeExit, VisionError> {
        self.task.await.map_err(|e| VisionError::Task(e.to_string()))
    }

    pub async fn shutdown(self) -> Result<BridgeExit, VisionError> {
        self.cancel();
        self.join().await
    }
}
