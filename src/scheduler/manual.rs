use super::{Scheduler, TimerId};
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use leptos::logging::warn;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

struct Timers {
    // keyed by (due time, id) so that equal deadlines fire in scheduling order
    queue: BTreeMap<(Duration, TimerId), Box<dyn FnOnce()>>,
    due: BTreeMap<TimerId, Duration>,
}

struct Clock {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    started: Cell<usize>,
    timers: RefCell<Timers>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
}

/// A scheduler driven by hand: time only moves when [`advance`] is called,
/// and spawned futures only make progress while the clock is being driven.
///
/// [`advance`]: ManualScheduler::advance
#[derive(Clone)]
pub struct ManualScheduler {
    clock: Rc<Clock>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        ManualScheduler {
            clock: Rc::new(Clock {
                now: Cell::new(Duration::ZERO),
                next_id: Cell::new(0),
                started: Cell::new(0),
                timers: RefCell::new(Timers {
                    queue: BTreeMap::new(),
                    due: BTreeMap::new(),
                }),
                pool: RefCell::new(pool),
                spawner,
            }),
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.now.get()
    }

    /// Number of timers ever started on this clock.
    pub fn timers_started(&self) -> usize {
        self.clock.started.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.timers.borrow().queue.len()
    }

    /// Polls spawned futures until none of them can make progress.
    ///
    /// Calling this (or [`advance`](Self::advance)) from inside a task the
    /// clock is already running does not re-enter the pool; it logs a warning
    /// and returns.
    pub fn run_until_stalled(&self) {
        match self.clock.pool.try_borrow_mut() {
            Ok(mut pool) => pool.run_until_stalled(),
            Err(_) => warn!("manual scheduler is already running its tasks"),
        }
    }

    /// Moves the clock forward, firing every timer that falls due on the way
    /// in deadline order and letting spawned futures run after each one.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.run_until_stalled();
        while let Some(task) = self.pop_due(target) {
            task();
            self.run_until_stalled();
        }
        self.clock.now.set(target);
        self.run_until_stalled();
    }

    fn pop_due(&self, target: Duration) -> Option<Box<dyn FnOnce()>> {
        let mut timers = self.clock.timers.borrow_mut();
        let (&(due, id), _) = timers.queue.first_key_value()?;
        if due > target {
            return None;
        }
        timers.due.remove(&id);
        let task = timers.queue.remove(&(due, id))?;
        self.clock.now.set(due);
        Some(task)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> anyhow::Result<TimerId> {
        let id = TimerId(self.clock.next_id.get());
        self.clock.next_id.set(id.0 + 1);
        self.clock.started.set(self.clock.started.get() + 1);

        let due = self.now() + delay;
        let mut timers = self.clock.timers.borrow_mut();
        timers.queue.insert((due, id), task);
        timers.due.insert(id, due);
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        let mut timers = self.clock.timers.borrow_mut();
        if let Some(due) = timers.due.remove(&id) {
            timers.queue.remove(&(due, id));
        }
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = self.clock.spawner.spawn_local(task) {
            warn!("manual scheduler could not spawn task: {err}");
        }
    }
}
