//! Context — everything a system gets to touch.
//!
//! [`Context`] bundles the [`Registry`] and the [`GroupIndex`] into the one
//! argument every system, factory, and builder receives. There is no other
//! channel: a system's access to the world is exactly what arrives through
//! its `&mut Context` parameter, injected per call by the engine.

use crate::ecs::{Entity, Registry};
use crate::engine::Tick;
use crate::error::EcsError;
use crate::group::GroupIndex;

/// The state handed to every system and factory hook.
pub struct Context {
    /// The entity/component database.
    pub registry: Registry,
    /// Named entity sets, maintained alongside (not inside) the registry.
    pub groups: GroupIndex,
    /// Outcome requested for the current tick; reset when the engine reads it.
    pending: Tick,
}

impl Context {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            groups: GroupIndex::new(),
            pending: Tick::Continue,
        }
    }

    /// Create an entity and get an [`EntityBuilder`] for attaching components
    /// and group memberships to it.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let entity = self.registry.create_entity();
        EntityBuilder {
            registry: &mut self.registry,
            groups: &mut self.groups,
            entity,
        }
    }

    /// Remove an entity from every group, then from the registry (cascading
    /// into all its components).
    ///
    /// Fails with [`EcsError::InvalidEntity`] — before anything is touched —
    /// if the entity is not alive.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.registry.is_alive(entity) {
            return Err(EcsError::InvalidEntity(entity));
        }
        self.groups.remove_from_all(entity);
        self.registry.remove_entity(entity)
    }

    /// Request an outcome for the current tick. The engine reads (and resets)
    /// the request after all systems have run; the last request in a tick
    /// wins. Requesting [`Tick::Continue`] withdraws a previous request.
    pub fn request(&mut self, outcome: Tick) {
        self.pending = outcome;
    }

    /// Take the pending outcome, resetting it to [`Tick::Continue`].
    pub(crate) fn take_request(&mut self) -> Tick {
        std::mem::take(&mut self.pending)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ── EntityBuilder ────────────────────────────────────────────────────────

/// Builder for attaching components to a freshly created entity.
///
/// Returned by [`Context::spawn`]. Chain `.with()` calls to attach
/// components, and optionally `.group()` to file the entity in a group.
///
/// # Example
///
/// ```ignore
/// let hero = ctx.spawn()
///     .with(Health { current: 20, max: 20 })
///     .with(Sprite { glyph: '@' })
///     .group("hero")
///     .id();
/// ```
pub struct EntityBuilder<'c> {
    registry: &'c mut Registry,
    groups: &'c mut GroupIndex,
    entity: Entity,
}

impl EntityBuilder<'_> {
    /// Attach a component to this entity.
    pub fn with<T: 'static + Send + Sync>(self, component: T) -> Self {
        // The entity was created by this builder's context and nothing can
        // have removed it while the builder borrows the registry.
        self.registry
            .add_component(self.entity, component)
            .expect("freshly created entity is alive");
        self
    }

    /// File this entity in a group.
    pub fn group(self, group: &str) -> Self {
        self.groups.add(self.entity, group);
        self
    }

    /// Get the entity handle.
    pub fn id(&self) -> Entity {
        self.entity
    }
}
