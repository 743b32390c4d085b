//! Entity identity.
//!
//! An [`Entity`] is nothing but a number. IDs come from an
//! [`EntityAllocator`], start at 1 and are never handed out twice by the same
//! allocator.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifies one simulated object. Ordered by allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Wraps a raw ID, e.g. one read back from telemetry.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw ID.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out increasing entity IDs from `&self`.
#[derive(Debug)]
pub struct EntityAllocator {
    next: AtomicU64,
}

impl EntityAllocator {
    /// Creates an allocator whose first ID is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns an ID no earlier call returned.
    pub fn allocate(&self) -> Entity {
        Entity(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let alloc = EntityAllocator::new();
        let ids: Vec<u64> = (0..3).map(|_| alloc.allocate().id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity::from_raw(42).to_string(), "Entity(42)");
    }

    #[test]
    fn test_shared_allocator_never_repeats() {
        let alloc = EntityAllocator::new();
        let seen: HashSet<Entity> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| (0..500).map(|_| alloc.allocate()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        assert_eq!(seen.len(), 4000);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Entity::from_raw(7)).unwrap(), "7");
    }
}
