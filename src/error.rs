use thiserror::Error;

use crate::buffer::FrameId;

pub type ReplacerResult<T, E = ReplacerError> = Result<T, E>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplacerError {
    #[error("Invalid frame id: {frame_id}, capacity: {capacity}")]
    InvalidFrame { frame_id: FrameId, capacity: usize },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Config error: {0}")]
    Config(String),
}
