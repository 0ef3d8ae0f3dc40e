//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Ids are handed out by [`crate::ecs::World`] in increasing order and are
/// never reused, so a stale id can only ever resolve to "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u64,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(super) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Get the entity ID
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

/// Monotonic id source owned by a world
#[derive(Debug, Default)]
pub(super) struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    pub(super) fn allocate(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        entity
    }

    pub(super) fn reset(&mut self) {
        self.next_id = 0;
    }
}
