//! Guards asynchronous work started by a field against two hazards: a newer
//! validation having been dispatched in the meantime, and the field having been
//! torn down. Each dispatch hands out a token; the token is checked before any
//! result is applied.

use std::cell::Cell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Mounted,
    TornDown,
}

#[derive(Debug)]
struct GuardState {
    latest: Cell<u64>,
    phase: Cell<Phase>,
}

#[derive(Debug, Clone)]
pub struct GenerationGuard {
    state: Rc<GuardState>,
}

impl Default for GenerationGuard {
    fn default() -> Self {
        GenerationGuard {
            state: Rc::new(GuardState {
                latest: Cell::new(0),
                phase: Cell::new(Phase::Created),
            }),
        }
    }
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.phase() == Phase::Mounted
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase() == Phase::TornDown
    }

    /// Returns false if the guard was already torn down.
    pub fn mount(&self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        self.state.phase.set(Phase::Mounted);
        true
    }

    /// Terminal. Every outstanding token stops being current.
    pub fn tear_down(&self) {
        self.state.phase.set(Phase::TornDown);
    }

    pub fn latest(&self) -> u64 {
        self.state.latest.get()
    }

    /// Starts a new generation, superseding all earlier tokens.
    pub fn dispatch(&self) -> GenerationToken {
        let generation = self.state.latest.get() + 1;
        self.state.latest.set(generation);
        GenerationToken {
            generation,
            guard: Rc::downgrade(&self.state),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationToken {
    generation: u64,
    guard: Weak<GuardState>,
}

impl GenerationToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.guard.upgrade().is_some_and(|state| {
            state.phase.get() == Phase::Mounted && state.latest.get() == self.generation
        })
    }
}
