//! Card instance identification.
//!
//! Every physical card token gets a unique `InstanceId` when a deck is
//! materialized into a draw pile. Two instances built from the same recipe
//! are told apart by their ids, so a hand holding two copies of "Fireball"
//! can still play exactly the one the player picked.
//!
//! ## Usage
//!
//! ```
//! use card_battle::core::{IdAllocator, InstanceId};
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_eq!(first, InstanceId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Create an instance ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for InstanceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic allocator for instance ids.
///
/// Ids are never reused, not even across a pile reset. The counter
/// saturates at `u64::MAX` instead of wrapping back to 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Peek at the id the next `alloc` will return.
    #[must_use]
    pub fn peek(&self) -> InstanceId {
        InstanceId(self.next)
    }
}
