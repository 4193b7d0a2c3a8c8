//! Entity factories — application-defined creation helpers.
//!
//! A factory gathers all of a game's entity construction in one place: one
//! method per kind of thing ("make a hero", "make an asteroid"), each built
//! from [`Context::spawn`](crate::context::Context::spawn) and a chain of
//! component inserts. The core never calls those methods — it only defines
//! the binding contract: an engine takes ownership of its factory at
//! construction and invokes [`bind`](EntityFactory::bind) exactly once, which
//! is where the factory populates the initial world.
//!
//! Creation helpers take `&mut Context` explicitly; a factory never stores a
//! reference to the registry.
//!
//! # Example
//!
//! ```ignore
//! struct CreatureFactory;
//!
//! impl EntityFactory for CreatureFactory {
//!     fn bind(&mut self, ctx: &mut Context) {
//!         self.spawn_slime(ctx);
//!     }
//! }
//!
//! impl CreatureFactory {
//!     fn spawn_slime(&mut self, ctx: &mut Context) -> Entity {
//!         ctx.spawn()
//!             .with(Health { current: 5, max: 5 })
//!             .group("creatures")
//!             .id()
//!     }
//! }
//! ```

use crate::context::Context;

/// The factory binding contract.
///
/// Implement this for your game's entity construction helper and hand it to
/// [`Engine::with_factory`](crate::engine::Engine::with_factory).
pub trait EntityFactory {
    /// Called exactly once by the engine that takes ownership of this
    /// factory, at engine construction. Populate the initial world here.
    fn bind(&mut self, _ctx: &mut Context) {}
}
