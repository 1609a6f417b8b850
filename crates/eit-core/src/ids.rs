use core::fmt;
use core::num::NonZeroU32;

use crate::error::{CoreError, CoreResult};

/// Compact, stable identifier used across the network graph.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
///
/// Ids are dense and 0-based from the caller's point of view; the stored
/// value is `index + 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Largest 0-based index an id can hold.
    pub const MAX_INDEX: u32 = u32::MAX - 1;

    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create an Id from a `usize` position (e.g. a vector index).
    ///
    /// Saturates at [`Id::MAX_INDEX`]; callers that hand out ids in bulk
    /// check their counts with [`Id::try_from_usize`].
    pub fn from_usize(index: usize) -> Self {
        Self::from_index(u32::try_from(index).unwrap_or(Self::MAX_INDEX))
    }

    /// Create an Id from a `usize` position, rejecting indices past
    /// [`Id::MAX_INDEX`].
    pub fn try_from_usize(index: usize) -> CoreResult<Self> {
        u32::try_from(index)
            .ok()
            .filter(|&i| i <= Self::MAX_INDEX)
            .map(Self::from_index)
            .ok_or(CoreError::IdOverflow { index })
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as a `usize`, for slice access.
    pub fn idx(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type NodeId = Id;
pub type EdgeId = Id;

/// Format a list of ids as `[a, b, c]`, truncated after `limit` entries.
pub fn format_ids(ids: &[Id], limit: usize) -> String {
    let shown: Vec<String> = ids.iter().take(limit).map(|id| id.to_string()).collect();
    if ids.len() > limit {
        format!("[{}, … +{} more]", shown.join(", "), ids.len() - limit)
    } else {
        format!("[{}]", shown.join(", "))
    }
}
