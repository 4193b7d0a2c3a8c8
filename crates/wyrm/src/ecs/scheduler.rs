//! # Scheduler — Priority-Ordered System Execution
//!
//! The [`Scheduler`] keeps systems in ascending priority order and runs them
//! all, once, per tick. Lower priority value runs first — 0 is "before
//! everything", bigger numbers run later. Think of the priority as a layer
//! number: input at 0, simulation in the middle, cleanup at the end.
//!
//! ## Ordering Rules
//!
//! - Entries are kept sorted by priority, ascending.
//! - Equal priorities tie-break by insertion order: a new entry lands just
//!   before the first entry with a strictly greater priority, scanning from
//!   the end. Two systems added at priority 5 run in the order they were
//!   added.
//! - The backward scan makes insertion cheap in the common pattern of
//!   registering systems from the front of the frame to the back.
//!
//! Insertion is O(n). Schedules hold tens of systems, not thousands; a flat
//! `Vec` beats anything clever at that size and keeps iteration order
//! trivially deterministic.
//!
//! ## Identity
//!
//! [`add`](Scheduler::add) hands back a [`SystemId`]. The id is the system's
//! registration identity: it survives priority changes and is what
//! [`remove`](Scheduler::remove) and
//! [`change_priority`](Scheduler::change_priority) key on.

use crate::context::Context;
use crate::error::EcsError;

use super::system::System;

/// Opaque handle identifying a scheduled system.
///
/// Issued by [`Scheduler::add`]; stable across priority changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemId(u64);

/// One scheduled system: the boxed system plus its ordering key.
struct Entry {
    id: SystemId,
    priority: i32,
    #[cfg(any(feature = "diagnostics", test))]
    name: String,
    system: Box<dyn System>,
}

/// Per-system wall time recorded during a single run.
#[cfg(feature = "diagnostics")]
pub struct SystemTiming {
    pub name: String,
    pub priority: i32,
    pub duration_us: f64,
}

/// An ordered list of systems, ascending by priority.
pub struct Scheduler {
    /// Sorted by `priority`, equal priorities in insertion order.
    entries: Vec<Entry>,
    next_id: u64,
    /// Per-system timings from the most recent `run()` call.
    #[cfg(feature = "diagnostics")]
    timings: Vec<SystemTiming>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            #[cfg(feature = "diagnostics")]
            timings: Vec::new(),
        }
    }

    /// Schedule a system at the given priority. Returns its registration id.
    pub fn add<S: System + 'static>(&mut self, system: S, priority: i32) -> SystemId {
        let id = SystemId(self.next_id);
        self.next_id += 1;
        let at = self.insertion_point(priority);
        self.entries.insert(
            at,
            Entry {
                id,
                priority,
                #[cfg(any(feature = "diagnostics", test))]
                name: short_system_name(std::any::type_name::<S>()),
                system: Box::new(system),
            },
        );
        id
    }

    /// Unschedule a system, returning it.
    ///
    /// Fails with [`EcsError::SystemNotFound`] if the id was never added (or
    /// already removed); the schedule is left unchanged in that case.
    pub fn remove(&mut self, id: SystemId) -> Result<Box<dyn System>, EcsError> {
        let at = self.position(id)?;
        Ok(self.entries.remove(at).system)
    }

    /// Move a system to a new priority without losing its registration.
    ///
    /// Equivalent to remove-then-add: the entry re-enters the order behind
    /// whatever currently sits at the target priority, keeping its id.
    ///
    /// Fails with [`EcsError::SystemNotFound`] if the id is not scheduled.
    pub fn change_priority(&mut self, id: SystemId, priority: i32) -> Result<(), EcsError> {
        let at = self.position(id)?;
        let mut entry = self.entries.remove(at);
        entry.priority = priority;
        let at = self.insertion_point(priority);
        self.entries.insert(at, entry);
        Ok(())
    }

    /// Is the given id currently scheduled?
    pub fn contains(&self, id: SystemId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Returns the number of scheduled systems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, priority)` pairs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (SystemId, i32)> + '_ {
        self.entries.iter().map(|entry| (entry.id, entry.priority))
    }

    /// Run every system once, in ascending priority order.
    ///
    /// The traversal covers exactly the systems scheduled when it starts:
    /// holding `&mut self` for the whole run means nothing can add or remove
    /// entries mid-tick, so the order is a snapshot by construction.
    pub fn run(&mut self, ctx: &mut Context) {
        #[cfg(feature = "diagnostics")]
        {
            self.timings.clear();
            for entry in &mut self.entries {
                let start = std::time::Instant::now();
                entry.system.update(ctx);
                let elapsed = start.elapsed();
                self.timings.push(SystemTiming {
                    name: entry.name.clone(),
                    priority: entry.priority,
                    duration_us: elapsed.as_secs_f64() * 1_000_000.0,
                });
            }
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            for entry in &mut self.entries {
                entry.system.update(ctx);
            }
        }
    }

    /// Per-system timings from the most recent [`run`](Scheduler::run).
    #[cfg(feature = "diagnostics")]
    pub fn timings(&self) -> &[SystemTiming] {
        &self.timings
    }

    /// Index of the entry with the given id.
    fn position(&self, id: SystemId) -> Result<usize, EcsError> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(EcsError::SystemNotFound(id))
    }

    /// Where a new entry with this priority belongs: just past the last entry
    /// that doesn't sort after it, scanning from the end.
    fn insertion_point(&self, priority: i32) -> usize {
        for i in (0..self.entries.len()).rev() {
            if self.entries[i].priority <= priority {
                return i + 1;
            }
        }
        0
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// last meaningful segment (e.g. `demo::poison_system` → `poison_system`,
/// `{{closure}}` → `<closure>`).
#[cfg(any(feature = "diagnostics", test))]
fn short_system_name(full: &str) -> String {
    let name = full.rsplit("::").next().unwrap_or(full);
    if name.contains("closure") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_ctx: &mut Context) {}

    fn priorities(sched: &Scheduler) -> Vec<i32> {
        sched.iter().map(|(_, p)| p).collect()
    }

    #[test]
    fn ascending_priority_with_stable_ties() {
        let mut sched = Scheduler::new();
        let first_five = sched.add(noop, 5);
        let one = sched.add(noop, 1);
        let second_five = sched.add(noop, 5);
        let three = sched.add(noop, 3);

        assert_eq!(priorities(&sched), vec![1, 3, 5, 5]);
        let order: Vec<SystemId> = sched.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![one, three, first_five, second_five]);
    }

    #[test]
    fn remove_unknown_system_fails_and_changes_nothing() {
        let mut sched = Scheduler::new();
        let a = sched.add(noop, 1);
        let b = sched.add(noop, 2);
        let ghost = {
            let mut other = Scheduler::new();
            // An id from a different scheduler that happens to be beyond ours.
            other.add(noop, 0);
            other.add(noop, 0);
            other.add(noop, 0)
        };

        assert_eq!(sched.remove(ghost), Err(EcsError::SystemNotFound(ghost)));
        assert_eq!(sched.len(), 2);
        let order: Vec<SystemId> = sched.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn remove_then_remove_again_fails() {
        let mut sched = Scheduler::new();
        let a = sched.add(noop, 1);
        assert!(sched.remove(a).is_ok());
        assert_eq!(sched.remove(a), Err(EcsError::SystemNotFound(a)));
        assert!(sched.is_empty());
    }

    #[test]
    fn change_priority_keeps_exactly_one_entry() {
        let mut sched = Scheduler::new();
        let a = sched.add(noop, 1);
        let _b = sched.add(noop, 2);
        let _c = sched.add(noop, 3);

        sched.change_priority(a, 10).unwrap();
        assert_eq!(sched.len(), 3);
        assert_eq!(sched.iter().filter(|&(id, _)| id == a).count(), 1);
        assert_eq!(priorities(&sched), vec![2, 3, 10]);
        assert_eq!(sched.iter().last().unwrap().0, a);
    }

    #[test]
    fn change_priority_ties_go_behind_current_holders() {
        let mut sched = Scheduler::new();
        let a = sched.add(noop, 1);
        let b = sched.add(noop, 5);

        sched.change_priority(a, 5).unwrap();
        let order: Vec<SystemId> = sched.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn change_priority_of_unknown_system_fails() {
        let mut sched = Scheduler::new();
        let a = sched.add(noop, 1);
        sched.remove(a).unwrap();
        assert_eq!(
            sched.change_priority(a, 2),
            Err(EcsError::SystemNotFound(a))
        );
    }

    #[test]
    fn run_invokes_in_priority_order() {
        // Systems append their tag to a component on a shared marker entity.
        struct Trace(Vec<&'static str>);

        let mut ctx = Context::new();
        let marker = ctx.registry.create_entity();
        ctx.registry.add_component(marker, Trace(Vec::new())).unwrap();

        let mut sched = Scheduler::new();
        let tag = |name: &'static str| {
            move |ctx: &mut Context| {
                let marker = ctx.registry.entities_with::<Trace>()[0];
                ctx.registry
                    .get_component_mut::<Trace>(marker)
                    .unwrap()
                    .0
                    .push(name);
            }
        };
        sched.add(tag("late"), 9);
        sched.add(tag("early"), 0);
        sched.add(tag("mid"), 4);

        sched.run(&mut ctx);
        let trace = &ctx.registry.components_of_type::<Trace>()[0].0;
        assert_eq!(*trace, vec!["early", "mid", "late"]);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn run_records_one_timing_per_system() {
        let mut ctx = Context::new();
        let mut sched = Scheduler::new();
        sched.add(noop, 3);
        sched.add(noop, 1);

        sched.run(&mut ctx);
        let timings = sched.timings();
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].priority, 1);
        assert_eq!(timings[1].priority, 3);
        assert!(timings.iter().all(|t| t.duration_us >= 0.0));
    }

    #[test]
    fn captures_system_names() {
        let mut sched = Scheduler::new();
        sched.add(noop, 1);
        sched.add(|_ctx: &mut Context| {}, 2);
        assert_eq!(sched.entries[0].name, "noop");
        assert_eq!(sched.entries[1].name, "<closure>");
    }
}
