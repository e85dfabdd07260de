//! Thread-safe handle around a replacer. Every call, reads included, goes
//! through one exclusive lock, so each operation observes and leaves behind a
//! consistent state.

use parking_lot::Mutex;

use crate::buffer::{AccessType, FrameId};
use crate::config::ReplacerConfig;
use crate::error::ReplacerResult;
use crate::utils::cache::lru_k::{LRUKReplacer, ReplacerSnapshot};
use crate::utils::cache::Replacer;

#[derive(Debug)]
pub struct SyncReplacer<R = LRUKReplacer> {
    inner: Mutex<R>,
}

impl<R: Replacer> SyncReplacer<R> {
    pub fn with_config(config: &ReplacerConfig) -> ReplacerResult<Self> {
        Ok(Self::from_replacer(R::with_config(config)?))
    }

    pub fn from_replacer(replacer: R) -> Self {
        Self {
            inner: Mutex::new(replacer),
        }
    }

    pub fn record_access(&self, frame_id: FrameId, access_type: AccessType) -> ReplacerResult<()> {
        self.inner.lock().record_access(frame_id, access_type)
    }

    pub fn set_evictable(&self, frame_id: FrameId, set_evictable: bool) -> ReplacerResult<()> {
        self.inner.lock().set_evictable(frame_id, set_evictable)
    }

    pub fn evict(&self) -> Option<FrameId> {
        self.inner.lock().evict()
    }

    pub fn remove(&self, frame_id: FrameId) -> ReplacerResult<()> {
        self.inner.lock().remove(frame_id)
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl SyncReplacer<LRUKReplacer> {
    pub fn new(capacity: usize, k: usize) -> Self {
        Self::from_replacer(LRUKReplacer::new(capacity, k))
    }

    pub fn access_count(&self, frame_id: FrameId) -> usize {
        self.inner.lock().access_count(frame_id)
    }

    pub fn is_evictable(&self, frame_id: FrameId) -> bool {
        self.inner.lock().is_evictable(frame_id)
    }

    pub fn snapshot(&self) -> ReplacerSnapshot {
        self.inner.lock().snapshot()
    }
}
