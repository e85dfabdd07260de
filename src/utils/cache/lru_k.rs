use log::{debug, trace, warn};

use super::frame_list::{FrameList, Link};
use super::Replacer;
use crate::buffer::{AccessType, FrameId};
use crate::config::ReplacerConfig;
use crate::error::{ReplacerError, ReplacerResult};

#[derive(Debug, Default, Clone, Copy)]
struct FrameNode {
    access_count: usize,
    is_evictable: bool,
}

/// LRU-K replacer with two tiers over a fixed arena of frames.
///
/// Frames with fewer than `k` recorded accesses live in the cold list, ordered
/// by first access and never reordered. On the `k`-th access a frame moves to
/// the warm list, which is plain LRU on the most recent access. Eviction takes
/// the oldest evictable cold frame, falling back to the least recently used
/// evictable warm frame.
#[derive(Debug)]
pub struct LRUKReplacer {
    k: usize,
    nodes: Vec<FrameNode>,
    links: Vec<Link>,
    cold: FrameList,
    warm: FrameList,
    // number of frames flagged evictable, tracked or not
    curr_size: usize,
}

#[derive(derive_new::new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacerSnapshot {
    pub capacity: usize,
    pub k: usize,
    pub cold_len: usize,
    pub warm_len: usize,
    pub evictable: usize,
}

impl LRUKReplacer {
    pub fn new(capacity: usize, k: usize) -> Self {
        assert!(k > 0, "k must be greater than 0");
        Self {
            k,
            nodes: vec![FrameNode::default(); capacity],
            links: vec![Link::default(); capacity],
            cold: FrameList::new(),
            warm: FrameList::new(),
            curr_size: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Accesses recorded since the frame was last evicted or removed.
    pub fn access_count(&self, frame_id: FrameId) -> usize {
        self.nodes.get(frame_id).map_or(0, |node| node.access_count)
    }

    pub fn is_evictable(&self, frame_id: FrameId) -> bool {
        self.nodes.get(frame_id).is_some_and(|node| node.is_evictable)
    }

    pub fn snapshot(&self) -> ReplacerSnapshot {
        ReplacerSnapshot::new(
            self.capacity(),
            self.k,
            self.cold.len(),
            self.warm.len(),
            self.curr_size,
        )
    }

    fn check_frame_id(&self, frame_id: FrameId) -> ReplacerResult<()> {
        if frame_id >= self.capacity() {
            warn!(
                "rejecting frame {} outside replacer capacity {}",
                frame_id,
                self.capacity()
            );
            return Err(ReplacerError::InvalidFrame {
                frame_id,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Unlinks a tracked frame from whichever list holds it and clears its history.
    fn drop_history(&mut self, frame_id: FrameId) {
        let node = &mut self.nodes[frame_id];
        if node.access_count < self.k {
            self.cold.unlink(&mut self.links, frame_id);
        } else {
            self.warm.unlink(&mut self.links, frame_id);
        }
        if node.is_evictable {
            self.curr_size -= 1;
        }
        *node = FrameNode::default();
    }

    fn first_evictable(&self, list: &FrameList) -> Option<FrameId> {
        list.iter(&self.links)
            .find(|frame_id| self.nodes[*frame_id].is_evictable)
    }
}

impl Replacer for LRUKReplacer {
    fn with_config(config: &ReplacerConfig) -> ReplacerResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity, config.k))
    }

    fn record_access(&mut self, frame_id: FrameId, access_type: AccessType) -> ReplacerResult<()> {
        self.check_frame_id(frame_id)?;
        let node = &mut self.nodes[frame_id];
        node.access_count += 1;
        let count = node.access_count;

        if count == self.k {
            // a frame only sits in the cold list once it has been seen below k
            if count > 1 {
                self.cold.unlink(&mut self.links, frame_id);
            }
            self.warm.push_back(&mut self.links, frame_id);
            trace!(
                "frame {} promoted to warm list on {} access",
                frame_id,
                access_type
            );
        } else if count < self.k {
            if count == 1 {
                self.cold.push_back(&mut self.links, frame_id);
            }
        } else {
            self.warm.move_to_back(&mut self.links, frame_id);
        }
        Ok(())
    }

    fn evict(&mut self) -> Option<FrameId> {
        if self.curr_size == 0 {
            return None;
        }
        let victim = self
            .first_evictable(&self.cold)
            .or_else(|| self.first_evictable(&self.warm));
        match victim {
            Some(frame_id) => {
                debug!(
                    "evicting frame {} after {} accesses",
                    frame_id, self.nodes[frame_id].access_count
                );
                self.drop_history(frame_id);
                Some(frame_id)
            }
            None => {
                warn!(
                    "{} frames flagged evictable but none has access history",
                    self.curr_size
                );
                None
            }
        }
    }

    fn set_evictable(&mut self, frame_id: FrameId, set_evictable: bool) -> ReplacerResult<()> {
        self.check_frame_id(frame_id)?;
        let node = &mut self.nodes[frame_id];
        if !node.is_evictable && set_evictable {
            self.curr_size += 1;
        } else if node.is_evictable && !set_evictable {
            self.curr_size -= 1;
        }
        node.is_evictable = set_evictable;
        Ok(())
    }

    fn remove(&mut self, frame_id: FrameId) -> ReplacerResult<()> {
        if self.access_count(frame_id) == 0 {
            return Ok(());
        }
        if !self.nodes[frame_id].is_evictable {
            warn!("refusing to remove pinned frame {}", frame_id);
            return Err(ReplacerError::InvariantViolation(format!(
                "frame {} must be evictable before its history is removed",
                frame_id
            )));
        }
        debug!("removing history of frame {}", frame_id);
        self.drop_history(frame_id);
        Ok(())
    }

    fn size(&self) -> usize {
        self.curr_size
    }
}
