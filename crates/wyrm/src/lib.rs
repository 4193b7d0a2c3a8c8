//! # Wyrm — Minimal ECS Runtime
//!
//! A deliberately small Entity-Component-System: a [`Registry`] that maps
//! opaque entity ids to typed components, a priority-ordered [`Scheduler`]
//! that runs [`System`]s once per tick, and an [`Engine`] gluing the two
//! together behind a single `update()` call. No rendering, no assets, no
//! event bus — systems coordinate entirely through shared component state.
//!
//! Start with `use wyrm::prelude::*` and build an [`Engine`].
//!
//! [`Registry`]: ecs::Registry
//! [`Scheduler`]: ecs::Scheduler
//! [`System`]: ecs::System
//! [`Engine`]: engine::Engine

pub mod context;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod factory;
pub mod group;
pub mod prelude;
pub mod stack;
