use metrics_exporter_prometheus::PrometheusHandle;
use osteo_risk::assessment::{HistoryEntry, HistoryLog, HistoryRepository, RepositoryError};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local evaluation history. Lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryRepository {
    log: Arc<Mutex<HistoryLog>>,
}

impl InMemoryHistoryRepository {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            log: Arc::new(Mutex::new(HistoryLog::with_capacity(limit))),
        }
    }
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn record(&self, entry: HistoryEntry) -> Result<(), RepositoryError> {
        let mut guard = self.log.lock().map_err(|_| poisoned())?;
        guard.push(entry);
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let guard = self.log.lock().map_err(|_| poisoned())?;
        Ok(guard.recent(limit))
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Unavailable("history mutex poisoned".to_string())
}
