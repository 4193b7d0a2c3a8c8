//! Error types for registry and scheduler operations.
//!
//! These are local, recoverable conditions reported to the immediate caller.
//! Queries against never-seen component types are deliberately *not* errors —
//! they return empty results (see [`Registry`](crate::ecs::Registry)).

use thiserror::Error;

use crate::ecs::{Entity, SystemId};

/// Everything that can go wrong talking to the registry or the scheduler.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The operation referenced an entity that is not currently alive.
    #[error("entity {0} is not alive")]
    InvalidEntity(Entity),

    /// The scheduler operation referenced a system that was never registered
    /// (or was already removed).
    #[error("system {0:?} is not registered")]
    SystemNotFound(SystemId),

    /// An intersection query was given zero component types to intersect.
    #[error("intersection query needs at least one component type")]
    EmptyQuery,
}
