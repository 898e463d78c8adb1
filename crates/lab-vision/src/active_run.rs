//! Registro de la ejecución activa a la que se dirigen los vertidos detectados.
use lab_core::RunId;
use std::sync::Arc;
use tokio::sync::watch;

/// Clonable y compartible entre el dueño del proceso y uno o más puentes de
/// visión; las actualizaciones son atómicas.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    tx: Arc<watch::Sender<Option<RunId>>>,
}

impl ActiveRun {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, run_id: RunId) {
        self.tx.send_replace(Some(run_id));
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<RunId> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RunId>> {
        self.tx.subscribe()
    }
}

impl Default for ActiveRun {
    fn default() -> Self {
        Self::new()
    }
}
