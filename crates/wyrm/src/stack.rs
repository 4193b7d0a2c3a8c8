//! Engine stack — multiple engines in one program.
//!
//! Useful when a game has modes that layer: a title screen over the game
//! proper, a pause menu over a level. Each mode is its own [`Engine`] with
//! its own world and systems; the stack updates only the top one. A mode
//! ends itself by requesting [`Tick::PopEngine`] from one of its systems —
//! control flow stays in return values, never in unwinding.

use crate::engine::{Engine, Tick};

/// A stack of engines; only the top one runs.
pub struct EngineStack {
    engines: Vec<Engine>,
}

impl EngineStack {
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Push an engine, giving it control from the next update on.
    pub fn push(&mut self, engine: Engine) {
        self.engines.push(engine);
    }

    /// Remove and return the top engine, if any.
    pub fn pop(&mut self) -> Option<Engine> {
        self.engines.pop()
    }

    /// The engine currently in control, if any.
    pub fn top_mut(&mut self) -> Option<&mut Engine> {
        self.engines.last_mut()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Run one tick of the top engine and interpret its outcome:
    ///
    /// - `Continue` — passed through.
    /// - `PopEngine` — the top engine is removed; returns `PopEngine`, or
    ///   `Terminate` if that emptied the stack.
    /// - `Terminate` — the stack is cleared; returns `Terminate`.
    ///
    /// An update on an empty stack returns `Terminate`.
    pub fn update(&mut self) -> Tick {
        let Some(top) = self.engines.last_mut() else {
            return Tick::Terminate;
        };
        match top.update() {
            Tick::Continue => Tick::Continue,
            Tick::PopEngine => {
                self.engines.pop();
                log::debug!("engine popped, {} remaining", self.engines.len());
                if self.engines.is_empty() {
                    Tick::Terminate
                } else {
                    Tick::PopEngine
                }
            }
            Tick::Terminate => {
                self.engines.clear();
                Tick::Terminate
            }
        }
    }
}

impl Default for EngineStack {
    fn default() -> Self {
        Self::new()
    }
}
