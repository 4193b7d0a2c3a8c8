//! # Component — Type-Erased Per-Type Storage
//!
//! In an ECS, components are plain data — a `Position`, a `Velocity`, a
//! `Health`. The registry needs to store *any* component type without knowing
//! it at compile time (the set of component types grows as the game attaches
//! them). This module provides [`ComponentMap`], a type-erased map from entity
//! id to one component value.
//!
//! ## Why `Box<dyn Any>`?
//!
//! The registry holds a *dynamic* set of component types keyed by [`TypeId`].
//! We can't use `HashMap<u64, T>` because the registry doesn't know `T` — it
//! only knows a `TypeId`. The classic high-performance approach stores raw
//! bytes (`Vec<u8>`) with manual layout management — fast but requires
//! `unsafe`. We use `Box<dyn Any + Send + Sync>` values and
//! `downcast_ref`/`downcast_mut` instead, trading cache locality for **zero
//! unsafe code**.
//!
//! Each `ComponentMap` holds every instance of exactly one component type, so
//! the at-most-one-component-per-entity rule falls out of the map structure:
//! inserting for an entity that already has one simply replaces it.
//!
//! ## Comparison
//!
//! - **hecs / bevy_ecs**: `Vec<u8>` + `Layout` (BlobVec) in archetype tables.
//!   Cache-friendly, lots of unsafe.
//! - **wyrm**: `HashMap<u64, Box<dyn Any>>` per component type. Zero unsafe,
//!   simple, easy to audit.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A type-erased map from entity id to one boxed component.
///
/// This is the core storage primitive. The
/// [`Registry`](super::registry::Registry) has one `ComponentMap` per
/// component type it has ever seen.
///
/// All access is safe — type correctness is ensured via
/// `downcast_ref`/`downcast_mut` at runtime, with panics on mismatch (which
/// indicates a framework bug, since maps are keyed by `TypeId`).
pub(crate) struct ComponentMap {
    /// The stored type's name, kept for diagnostics and panic messages.
    type_name: &'static str,
    entries: HashMap<u64, Box<dyn Any + Send + Sync>>,
}

impl ComponentMap {
    /// Create a new empty map for the named component type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            entries: HashMap::new(),
        }
    }

    /// Attach a boxed component to an entity id. Returns the previous
    /// component if the entity already had one (last write wins).
    pub fn insert(&mut self, id: u64, component: Box<dyn Any + Send + Sync>) -> Option<Box<dyn Any + Send + Sync>> {
        self.entries.insert(id, component)
    }

    /// Detach and return the component for an entity id, if present.
    pub fn remove(&mut self, id: u64) -> Option<Box<dyn Any + Send + Sync>> {
        self.entries.remove(&id)
    }

    /// Does this map hold a component for the given entity id?
    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    /// Get a shared reference to the component for an entity id.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T` — impossible unless the
    /// registry filed this map under the wrong `TypeId`.
    pub fn get<T: 'static>(&self, id: u64) -> Option<&T> {
        self.entries.get(&id).map(|boxed| {
            boxed.downcast_ref().unwrap_or_else(|| {
                panic!(
                    "component type mismatch: map for `{}` asked for `{}`",
                    self.type_name,
                    std::any::type_name::<T>()
                )
            })
        })
    }

    /// Get a mutable reference to the component for an entity id.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T` (framework bug, as above).
    pub fn get_mut<T: 'static>(&mut self, id: u64) -> Option<&mut T> {
        let type_name = self.type_name;
        self.entries.get_mut(&id).map(|boxed| {
            boxed.downcast_mut().unwrap_or_else(|| {
                panic!(
                    "component type mismatch: map for `{}` asked for `{}`",
                    type_name,
                    std::any::type_name::<T>()
                )
            })
        })
    }

    /// Get a reference to the raw `dyn Any` for an entity id.
    pub fn get_any(&self, id: u64) -> Option<&dyn Any> {
        self.entries.get(&id).map(|boxed| &**boxed as &dyn Any)
    }

    /// Iterate the ids of all entities carrying this component type.
    pub fn entity_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    /// Iterate every stored component, downcast to `T`.
    ///
    /// # Panics
    ///
    /// Panics if any stored value is not a `T` (framework bug, as above).
    pub fn values<T: 'static>(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values().map(|boxed| {
            boxed.downcast_ref().unwrap_or_else(|| {
                panic!(
                    "component type mismatch: map for `{}` asked for `{}`",
                    self.type_name,
                    std::any::type_name::<T>()
                )
            })
        })
    }

    /// Number of entities carrying this component type.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A non-empty set of component types, used for intersection queries.
///
/// Implemented for tuples of up to 8 component types, so
/// `registry.entities_with_all::<(Health, Sprite)>()` just works. There is no
/// impl for the empty tuple — a query over zero types has no meaning, and the
/// type system rejects it before it can reach the registry.
pub trait ComponentSet {
    /// The component `TypeId`s in this set, in declaration order.
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> ComponentSet for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$T>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut map = ComponentMap::new("u32");
        map.insert(1, Box::new(10u32));
        map.insert(2, Box::new(20u32));
        assert_eq!(map.get::<u32>(1), Some(&10));
        assert_eq!(map.get::<u32>(2), Some(&20));
        assert_eq!(map.get::<u32>(3), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn insert_replaces_and_returns_old() {
        let mut map = ComponentMap::new("u32");
        assert!(map.insert(1, Box::new(10u32)).is_none());
        let old = map.insert(1, Box::new(99u32)).expect("previous value");
        assert_eq!(*old.downcast_ref::<u32>().unwrap(), 10);
        assert_eq!(map.get::<u32>(1), Some(&99));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut map = ComponentMap::new("u32");
        map.insert(7, Box::new(1u32));
        *map.get_mut::<u32>(7).unwrap() = 2;
        assert_eq!(map.get::<u32>(7), Some(&2));
    }

    #[test]
    fn remove_detaches() {
        let mut map = ComponentMap::new("u32");
        map.insert(1, Box::new(10u32));
        assert!(map.remove(1).is_some());
        assert!(map.remove(1).is_none());
        assert!(!map.contains(1));
    }

    #[test]
    #[should_panic(expected = "component type mismatch")]
    fn wrong_type_panics() {
        let mut map = ComponentMap::new("u32");
        map.insert(1, Box::new(10u32));
        map.get::<f32>(1);
    }

    #[test]
    fn drop_called_on_replace() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        struct Tracked;
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        DROP_COUNT.store(0, Ordering::SeqCst);
        let mut map = ComponentMap::new("Tracked");
        map.insert(1, Box::new(Tracked));
        drop(map.insert(1, Box::new(Tracked)));
        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 1); // only the replaced one
        drop(map);
        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 2); // remaining one dropped
    }

    #[test]
    fn component_set_type_ids_in_declaration_order() {
        struct A;
        struct B;
        assert_eq!(<(A,)>::type_ids(), vec![TypeId::of::<A>()]);
        assert_eq!(
            <(A, B)>::type_ids(),
            vec![TypeId::of::<A>(), TypeId::of::<B>()]
        );
    }
}
