//! Engine — the glue that puts everything together.
//!
//! An [`Engine`] owns a [`Scheduler`] and a [`Context`] (registry + groups),
//! plus an optional [`EntityFactory`]. Driving a game is one call:
//! [`update`](Engine::update) runs every system once, in priority order, and
//! returns a [`Tick`] telling the caller what the frame decided.
//!
//! ```ignore
//! let mut engine = Engine::with_factory(CreatureFactory);
//! engine.add_system(PoisonSystem { damage: 2 }, 1);
//! engine.add_system(reaper, 10);
//!
//! while engine.update() != Tick::Terminate {
//!     // draw, sleep, poll input — whatever the frame driver does
//! }
//! ```

use crate::context::Context;
use crate::ecs::{Scheduler, System, SystemId};
use crate::error::EcsError;
use crate::factory::EntityFactory;

/// What a tick decided: keep going, or unwind.
///
/// Systems request a non-`Continue` outcome via
/// [`Context::request`](crate::context::Context::request); the full tick
/// always runs — there are no mid-tick aborts — and the engine reports the
/// last request standing. An [`EngineStack`](crate::stack::EngineStack)
/// interprets `PopEngine`; a bare frame driver usually only cares about
/// `Terminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tick {
    /// Nothing requested; run another frame.
    #[default]
    Continue,
    /// The current engine is done (level cleared, menu dismissed).
    PopEngine,
    /// The whole program is done.
    Terminate,
}

/// A scheduler, a context, and optionally a factory: one running game mode.
pub struct Engine {
    scheduler: Scheduler,
    /// The state systems operate on. Public so the frame driver can reach
    /// the registry and groups between ticks.
    pub ctx: Context,
    factory: Option<Box<dyn EntityFactory>>,
}

impl Engine {
    /// An engine with an empty world and no factory.
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            ctx: Context::new(),
            factory: None,
        }
    }

    /// An engine owning the given factory. The factory's
    /// [`bind`](EntityFactory::bind) hook runs here, once, against the fresh
    /// context — before any system exists.
    pub fn with_factory<F: EntityFactory + 'static>(mut factory: F) -> Self {
        let mut engine = Self::new();
        factory.bind(&mut engine.ctx);
        engine.factory = Some(Box::new(factory));
        engine
    }

    /// Add a system at the given priority (lower runs first; equal
    /// priorities run in insertion order). The system's
    /// [`init`](System::init) hook runs once, now, before scheduling.
    pub fn add_system<S: System + 'static>(&mut self, mut system: S, priority: i32) -> SystemId {
        system.init(&mut self.ctx);
        let id = self.scheduler.add(system, priority);
        log::debug!("scheduled system {id:?} at priority {priority}");
        id
    }

    /// Remove a system from the schedule.
    ///
    /// Fails with [`EcsError::SystemNotFound`] if the id was never added.
    pub fn remove_system(&mut self, id: SystemId) -> Result<(), EcsError> {
        self.scheduler.remove(id).map(drop)
    }

    /// Move a system to a new priority, keeping its registration identity.
    ///
    /// Fails with [`EcsError::SystemNotFound`] if the id is not scheduled.
    pub fn change_system_priority(&mut self, id: SystemId, priority: i32) -> Result<(), EcsError> {
        self.scheduler.change_priority(id, priority)
    }

    /// Run one tick: every system once, in ascending priority order, then
    /// report the outcome the systems requested (if any).
    ///
    /// A panicking system unwinds through this call uncaught — isolation
    /// policy belongs to the frame driver.
    pub fn update(&mut self) -> Tick {
        self.scheduler.run(&mut self.ctx);
        self.ctx.take_request()
    }

    /// The schedule, for inspection (ordering, timings).
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The owned factory and the context, together — so creation helpers can
    /// be called between ticks: `let Some((f, ctx)) = engine.factory_mut()`.
    pub fn factory_mut(&mut self) -> Option<(&mut dyn EntityFactory, &mut Context)> {
        match &mut self.factory {
            Some(factory) => Some((factory.as_mut(), &mut self.ctx)),
            None => None,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
