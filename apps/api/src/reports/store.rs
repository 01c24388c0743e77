use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use match_engine::AnalysisResult;
use uuid::Uuid;

/// Bounded in-memory cache of recent analyses, keyed by analysis id.
/// Least recently used entries are evicted; nothing is persisted.
#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<Mutex<LruCache<Uuid, AnalysisResult>>>,
}

impl ReportStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Stores `result` under a fresh id.
    pub fn insert(&self, result: AnalysisResult) -> Uuid {
        let id = Uuid::new_v4();
        if let Some((evicted, _)) = self.lock().push(id, result) {
            tracing::debug!(%evicted, "report cache full, evicted oldest analysis");
        }
        id
    }

    /// Clones the stored result and marks it recently used.
    pub fn get(&self, id: &Uuid) -> Option<AnalysisResult> {
        self.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<Uuid, AnalysisResult>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
