//! Enfriamiento por par de marcadores.
use lab_domain::MarkerId;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub type MarkerPair = (MarkerId, MarkerId);

/// Un mismo par `(fuente, destino)` dispara como mucho una vez por ventana de
/// `cooldown`. Las entradas vencidas se descartan en cada consulta, por lo que
/// la tabla sólo contiene pares disparados dentro de la ventana vigente.
#[derive(Debug)]
pub struct PourDebouncer {
    cooldown: Duration,
    last_trigger: Mutex<HashMap<MarkerPair, Instant>>,
}

impl PourDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown,
               last_trigger: Mutex::new(HashMap::new()) }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn should_trigger(&self, pair: MarkerPair) -> bool {
        self.should_trigger_at(pair, Instant::now())
    }

    pub fn should_trigger_at(&self, pair: MarkerPair, now: Instant) -> bool {
        // candado envenenado: la tabla sólo contiene instantes, se reutiliza tal cual
        let mut table = self.last_trigger.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        table.retain(|_, fired| now.saturating_duration_since(*fired) < self.cooldown);
        if table.contains_key(&pair) {
            return false;
        }
        table.insert(pair, now);
        true
    }

    /// Pares aún dentro de su ventana (según la última consulta).
    pub fn tracked(&self) -> usize {
        self.last_trigger.lock().map(|t| t.len()).unwrap_or_default()
    }
}

impl Default for PourDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
