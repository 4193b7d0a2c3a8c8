//! # Registry — The Entity/Component Database
//!
//! The [`Registry`] owns all entities and their components. It is the single
//! source of truth systems read from and write to — there is no event bus,
//! so everything systems say to each other goes through here.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ Registry                                            │
//! │                                                     │
//! │  EntityAllocator: monotonic ids + live set          │
//! │                                                     │
//! │  components: HashMap<TypeId, ComponentMap>          │
//! │    key   = component type                           │
//! │    value = entity id → boxed component              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! One [`ComponentMap`] per component type keeps the
//! at-most-one-component-per-(entity, type) invariant structural: attaching a
//! second `Health` to the same entity overwrites the first, silently.
//!
//! ## Query Policy
//!
//! Queries are **lenient**: asking about a component type the registry has
//! never seen is an ordinary empty result, not an error. "Type never seen"
//! and "type seen but currently empty" are indistinguishable on purpose —
//! legitimate queries against a freshly started game should not fail.
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: archetype tables grouped by component signature,
//!   optimized for linear iteration.
//! - **wyrm**: a map of maps, optimized for being obvious. Iteration walks a
//!   hash map; intersection queries walk the first type's entries and probe
//!   the rest.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::component::{ComponentMap, ComponentSet};
use super::entity::{Entity, EntityAllocator};
use crate::error::EcsError;

/// The entity/component database.
///
/// Owns the set of live entities and every attached component. All component
/// operations are keyed by the component's static type.
pub struct Registry {
    allocator: EntityAllocator,
    /// One type-erased map per component type ever attached.
    components: HashMap<TypeId, ComponentMap>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            components: HashMap::new(),
        }
    }

    // ── Entity Management ────────────────────────────────────────────

    /// Create a new entity with a fresh id and no components. Never fails.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        log::trace!("created {entity:?}");
        entity
    }

    /// Remove an entity and every component attached to it.
    ///
    /// Fails with [`EcsError::InvalidEntity`] if the entity is not alive; in
    /// that case nothing is touched. On success the removal is complete — the
    /// liveness check happens first and every step after it is infallible, so
    /// no partial state is ever observable.
    pub fn remove_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.allocator.deallocate(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }
        for map in self.components.values_mut() {
            map.remove(entity.id);
        }
        log::trace!("removed {entity:?}");
        Ok(())
    }

    /// Check if an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Returns the number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Iterate all alive entities, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.allocator.live_ids().map(Entity::new)
    }

    // ── Component Attach / Detach ────────────────────────────────────

    /// Attach a component to an entity. If the entity already has a component
    /// of this type, the old value is replaced (last write wins, no error).
    ///
    /// Fails with [`EcsError::InvalidEntity`] if the entity is not alive.
    pub fn add_component<T: 'static + Send + Sync>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<(), EcsError> {
        if !self.allocator.is_alive(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }
        self.components
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ComponentMap::new(std::any::type_name::<T>()))
            .insert(entity.id, Box::new(component));
        Ok(())
    }

    /// Detach a component from an entity. A no-op — not an error — if the
    /// entity has no such component or the type was never seen, since callers
    /// frequently probe speculatively.
    ///
    /// Returns `true` if a component was actually removed.
    pub fn remove_component<T: 'static + Send + Sync>(&mut self, entity: Entity) -> bool {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|map| map.remove(entity.id))
            .is_some()
    }

    /// Does the entity currently carry a component of type `T`?
    pub fn has_component<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.components
            .get(&TypeId::of::<T>())
            .is_some_and(|map| map.contains(entity.id))
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    /// Get a shared reference to the `T` on an entity.
    ///
    /// Returns `None` — not an error — if the entity is dead or doesn't have
    /// the component.
    pub fn get_component<T: 'static + Send + Sync>(&self, entity: Entity) -> Option<&T> {
        self.components.get(&TypeId::of::<T>())?.get(entity.id)
    }

    /// Get a mutable reference to the `T` on an entity.
    ///
    /// Returns `None` if the entity is dead or doesn't have the component.
    /// This is how systems mutate component data in place.
    pub fn get_component_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut(&TypeId::of::<T>())?.get_mut(entity.id)
    }

    /// All current components of an entity, type-erased, in no particular
    /// order. Empty for a dead entity.
    pub fn components_of(&self, entity: Entity) -> Vec<&dyn Any> {
        self.components
            .values()
            .filter_map(|map| map.get_any(entity.id))
            .collect()
    }

    // ── Type Queries ─────────────────────────────────────────────────

    /// All entities carrying a component of type `T`, in no particular order.
    /// Lenient: empty if the type was never seen.
    pub fn entities_with<T: 'static + Send + Sync>(&self) -> Vec<Entity> {
        self.components
            .get(&TypeId::of::<T>())
            .map(|map| map.entity_ids().map(Entity::new).collect())
            .unwrap_or_default()
    }

    /// All entities carrying *every* component type in the set `S`:
    ///
    /// ```ignore
    /// let armed_and_alive = registry.entities_with_all::<(Health, Weapon)>();
    /// ```
    ///
    /// Set intersection across each type's entity set, in declaration order.
    /// Lenient: any never-seen type makes the result empty. The empty set of
    /// types is unrepresentable here — see [`entities_with_type_ids`] for the
    /// dynamic form.
    ///
    /// [`entities_with_type_ids`]: Registry::entities_with_type_ids
    pub fn entities_with_all<S: ComponentSet>(&self) -> Vec<Entity> {
        self.intersection(&S::type_ids())
    }

    /// Dynamic form of [`entities_with_all`](Registry::entities_with_all),
    /// for callers that assemble the type list at runtime.
    ///
    /// Fails with [`EcsError::EmptyQuery`] on an empty slice — an
    /// intersection over zero sets has no meaning.
    pub fn entities_with_type_ids(&self, type_ids: &[TypeId]) -> Result<Vec<Entity>, EcsError> {
        if type_ids.is_empty() {
            return Err(EcsError::EmptyQuery);
        }
        Ok(self.intersection(type_ids))
    }

    /// Every component of type `T` in the registry, in no particular order.
    /// Lenient: empty if the type was never seen.
    pub fn components_of_type<T: 'static + Send + Sync>(&self) -> Vec<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .map(|map| map.values().collect())
            .unwrap_or_default()
    }

    /// Intersect the entity sets of the given types: walk the first type's
    /// entries, keep those present in every other map. Cost is proportional
    /// to the first type's population times the probe count.
    fn intersection(&self, type_ids: &[TypeId]) -> Vec<Entity> {
        let Some((first, rest)) = type_ids.split_first() else {
            return Vec::new();
        };
        let Some(seed) = self.components.get(first) else {
            return Vec::new();
        };
        seed.entity_ids()
            .filter(|&id| {
                rest.iter()
                    .all(|tid| self.components.get(tid).is_some_and(|map| map.contains(id)))
            })
            .map(Entity::new)
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
