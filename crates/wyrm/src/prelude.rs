//! Convenience re-exports — `use wyrm::prelude::*` for the common items.
//!
//! Types only — all functionality is discoverable through methods on types,
//! not free functions.

pub use crate::context::{Context, EntityBuilder};
pub use crate::ecs::{ComponentSet, Entity, Registry, Scheduler, System, SystemId};
pub use crate::engine::{Engine, Tick};
pub use crate::error::EcsError;
pub use crate::factory::EntityFactory;
pub use crate::group::GroupIndex;
pub use crate::stack::EngineStack;

#[cfg(feature = "diagnostics")]
pub use crate::ecs::SystemTiming;
