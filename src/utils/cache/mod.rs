use crate::buffer::{AccessType, FrameId};
use crate::config::ReplacerConfig;
use crate::error::ReplacerResult;

mod frame_list;
pub mod lru_k;

pub trait Replacer {
    fn with_config(config: &ReplacerConfig) -> ReplacerResult<Self>
    where
        Self: Sized;

    fn record_access(&mut self, frame_id: FrameId, access_type: AccessType)
        -> ReplacerResult<()>;

    fn evict(&mut self) -> Option<FrameId>;

    fn set_evictable(&mut self, frame_id: FrameId, set_evictable: bool) -> ReplacerResult<()>;

    fn remove(&mut self, frame_id: FrameId) -> ReplacerResult<()>;

    fn size(&self) -> usize;
}
