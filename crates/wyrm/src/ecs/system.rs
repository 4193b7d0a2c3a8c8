//! # System — Units of Per-Tick Logic
//!
//! A system is something that takes `&mut Context` and does work with it —
//! query entities, mutate components, spawn or despawn. That's it.
//!
//! ## Design Philosophy
//!
//! Many ECS frameworks make systems complex — parameter injection, dependency
//! graphs, parallel scheduling. We keep it radically simple:
//!
//! - A system is anything implementing [`System`]; any `FnMut(&mut Context)`
//!   qualifies for free.
//! - Systems run strictly in the order the [`Scheduler`](super::scheduler)
//!   holds them.
//! - No automatic parallelism. One tick, one thread, done.
//!
//! Systems never hold references to the registry between ticks. Everything
//! they need arrives through the `Context` argument, per call — there is no
//! ambient engine state to look up, so a system's dependencies are exactly
//! its signature.
//!
//! ## Failure
//!
//! The update hook returns nothing. A system that panics unwinds through
//! [`Engine::update`](crate::engine::Engine::update) uncaught; whether one
//! failing system aborts the frame or gets isolated is the frame driver's
//! call, not ours. Individual registry operations are atomic, so the store is
//! never left half-mutated.

use crate::context::Context;

/// A unit of per-tick logic, executed by the scheduler in priority order.
pub trait System {
    /// One-time binding hook, called by the engine when the system is added.
    ///
    /// Use it to set up whatever the system needs in the registry (marker
    /// entities, initial components). Called exactly once, before the first
    /// update; never re-entered by the system itself.
    fn init(&mut self, _ctx: &mut Context) {}

    /// Called once per tick. Query, mutate, spawn, despawn — all through the
    /// context.
    fn update(&mut self, ctx: &mut Context);
}

/// Blanket impl: any `FnMut(&mut Context)` is a `System`.
impl<F: FnMut(&mut Context)> System for F {
    fn update(&mut self, ctx: &mut Context) {
        (self)(ctx);
    }
}

// Test-only `Debug`/`PartialEq` for trait objects, so scheduler tests can
// `assert_eq!` on `Result<Box<dyn System>, EcsError>`. Both sides of those
// assertions are always `Err`, so the `Ok`/system comparison is never
// exercised at runtime; these impls carry no behavior into normal builds.
#[cfg(test)]
impl PartialEq for dyn System {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

#[cfg(test)]
impl std::fmt::Debug for dyn System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<system>")
    }
}
