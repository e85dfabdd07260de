use derive_with::With;

use crate::buffer::BUFFER_POOL_SIZE;
use crate::error::{ReplacerError, ReplacerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, With)]
pub struct ReplacerConfig {
    /// Number of frame handles the replacer accepts, valid ids are `0..capacity`.
    pub capacity: usize,
    /// Accesses needed before a frame is ranked by recency instead of first touch.
    pub k: usize,
}

impl ReplacerConfig {
    pub fn new(capacity: usize, k: usize) -> Self {
        Self { capacity, k }
    }

    pub fn validate(&self) -> ReplacerResult<()> {
        if self.k == 0 {
            return Err(ReplacerError::Config(
                "k must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        ReplacerConfig {
            capacity: BUFFER_POOL_SIZE,
            k: 2,
        }
    }
}
