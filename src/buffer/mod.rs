mod replacer;

pub use replacer::SyncReplacer;

use strum::{Display, EnumIter, EnumString};

pub type FrameId = usize;

pub const BUFFER_POOL_SIZE: usize = 5000;

/// Kind of page touch reported alongside an access. The replacer keeps it for
/// logging only; it does not change eviction order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AccessType {
    #[default]
    Unknown,
    Lookup,
    Scan,
    Index,
}
