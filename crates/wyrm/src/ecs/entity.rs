//! # Entity — Lightweight Identifiers for Game Objects
//!
//! An [`Entity`] is just a number — it doesn't "contain" anything. Instead,
//! the [`Registry`](super::registry::Registry) maps entities to their
//! components. This separation of identity from data is the core insight of
//! the ECS pattern.
//!
//! ## Design: Monotonic IDs, Never Reused
//!
//! Many ECS implementations recycle entity slots and pair each index with a
//! generation counter so stale handles can be detected. We take the simpler
//! road: ids count up from 1 and a despawned id is never handed out again.
//! Consider the failure the generational scheme exists to catch:
//!
//! ```text
//! 1. Spawn entity #5
//! 2. Store a handle: saved = Entity(5)
//! 3. Despawn entity #5
//! 4. Spawn a new entity — gets recycled id #5
//! 5. Use `saved` — oops, it now refers to the wrong entity!
//! ```
//!
//! With monotonic ids step 4 produces #6, so the stale handle in step 5 can
//! only ever point at a dead entity — lookups fail safely, never alias. The
//! cost is a live-set lookup instead of a slot array, and a `u64` id space we
//! cannot exhaust in practice (a game spawning a million entities per second
//! would run for half a million years before wrapping).
//!
//! ## Comparison
//!
//! - **hecs**: `Entity` = index + generation packed into a u64, slots recycled.
//! - **bevy_ecs**: same generational index scheme, more layers around it.
//! - **wyrm**: one u64, strictly increasing, plus a hash set of live ids.

use std::collections::HashSet;
use std::fmt;

/// A lightweight handle to an entity in the [`Registry`](super::registry::Registry).
///
/// Entities are created via [`Registry::create_entity`] and destroyed via
/// [`Registry::remove_entity`]. An `Entity` is only valid for the `Registry`
/// that created it; once removed, its id never comes back.
///
/// [`Registry::create_entity`]: super::registry::Registry::create_entity
/// [`Registry::remove_entity`]: super::registry::Registry::remove_entity
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Unique id, assigned once and never reissued.
    pub(crate) id: u64,
}

impl Entity {
    /// Construct a handle from a raw id. Internal — handles only enter user
    /// code through the registry.
    pub(super) fn new(id: u64) -> Self {
        Self { id }
    }

    /// Returns the raw id. Useful for diagnostics and external indices.
    pub fn id(self) -> u64 {
        self.id
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Manages entity id allocation.
///
/// ## Memory Layout
///
/// ```text
/// next_id: 6              ← the id the next allocate() returns
/// live:    {1, 2, 4, 5}   ← currently alive ids (3 was removed, stays gone)
/// ```
///
/// When spawning: hand out `next_id`, bump it, record the id as live.
/// When despawning: drop the id from the live set. There is no free list —
/// gaps are permanent.
pub(crate) struct EntityAllocator {
    /// The next id to hand out. Starts at 1, only ever increases.
    next_id: u64,
    /// Ids of currently alive entities.
    live: HashSet<u64>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: HashSet::new(),
        }
    }

    /// Allocate a fresh [`Entity`] with an id no entity has ever had.
    pub fn allocate(&mut self) -> Entity {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        Entity { id }
    }

    /// Deallocate an entity, retiring its id permanently.
    ///
    /// Returns `true` if the entity was alive, `false` if it was already dead
    /// (or never existed).
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        self.live.remove(&entity.id)
    }

    /// Check if an entity handle refers to a currently alive entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.live.contains(&entity.id)
    }

    /// Returns the number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        self.live.len()
    }

    /// Iterate the ids of all alive entities, in no particular order.
    pub fn live_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.live.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        let e3 = alloc.allocate();
        assert_eq!(e1.id(), 1);
        assert_eq!(e2.id(), 2);
        assert_eq!(e3.id(), 3);
    }

    #[test]
    fn removed_id_is_never_reissued() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let _e2 = alloc.allocate();
        assert!(alloc.deallocate(e1));
        // The gap at id 1 stays a gap.
        let e3 = alloc.allocate();
        assert_eq!(e3.id(), 3);
        assert!(!alloc.is_alive(e1));
    }

    #[test]
    fn stale_handle_detected() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        assert!(alloc.is_alive(e1));
        alloc.deallocate(e1);
        assert!(!alloc.is_alive(e1));
    }

    #[test]
    fn double_free_returns_false() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        assert!(alloc.deallocate(e1));
        assert!(!alloc.deallocate(e1));
    }

    #[test]
    fn alive_count() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.alive_count(), 0);
        let e1 = alloc.allocate();
        let _e2 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        alloc.deallocate(e1);
        assert_eq!(alloc.alive_count(), 1);
    }

    #[test]
    fn no_two_live_entities_share_an_id() {
        let mut alloc = EntityAllocator::new();
        let mut seen = HashSet::new();
        for round in 0..10 {
            let e = alloc.allocate();
            assert!(seen.insert(e.id()), "id {} reissued on round {}", e.id(), round);
            if round % 2 == 0 {
                alloc.deallocate(e);
            }
        }
    }
}
