//! The behavior of a text field, independent of how it is rendered.
//!
//! A [`TextFieldCore`] holds the current value and validation message in a
//! leptos signal, forwards every edit to the host, and runs the host's
//! validator once input has been quiet for [`VALIDATION_DEBOUNCE`].
//!
//! Validators may answer right away ([`Validation::Immediate`]) or later
//! ([`Validation::Deferred`]). Several deferred answers can be in flight at
//! once and may settle in any order; only the most recently dispatched one is
//! allowed to change the message, and nothing is applied after teardown.

use crate::debounce::Debouncer;
use crate::focus::{FieldHandle, FocusTarget};
use crate::generation::GenerationGuard;
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::validation::{self, ChangeHandler, Validation, Validator};
use leptos::prelude::*;
use std::rc::Rc;
use std::time::Duration;

pub const VALIDATION_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Empty until a validation has failed; cleared again when one passes.
    pub error_message: String,
}

impl FieldState {
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

#[derive(Default)]
pub struct TextFieldBuilder {
    value: Option<String>,
    on_changed: Option<ChangeHandler>,
    validator: Option<Validator>,
    debounce: Option<Duration>,
    scheduler: Option<Rc<dyn Scheduler>>,
    handle: Option<FieldHandle>,
}

impl TextFieldBuilder {
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn on_changed(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_changed = Some(Rc::new(f));
        self
    }

    /// Without a validator the field never validates and never starts a timer.
    pub fn on_get_error_message(mut self, f: impl Fn(&str) -> Validation + 'static) -> Self {
        self.validator = Some(Rc::new(f));
        self
    }

    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = Some(delay);
        self
    }

    pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn handle(mut self, handle: FieldHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    pub fn build(self) -> TextFieldCore {
        let state = RwSignal::new(FieldState {
            value: self.value.unwrap_or_default(),
            error_message: String::new(),
        });
        let guard = GenerationGuard::new();
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Rc::new(BrowserScheduler::new()));
        let delay = self.debounce.unwrap_or(VALIDATION_DEBOUNCE);

        let validate = self.validator.map(|validator| {
            let guard = guard.clone();
            let spawner = Rc::clone(&scheduler);
            Debouncer::new(scheduler, delay, move |value: String| {
                run_validation(&validator, &value, state, &guard, spawner.as_ref())
            })
        });

        TextFieldCore {
            state,
            guard,
            validate,
            on_changed: self.on_changed,
            handle: self.handle.unwrap_or_default(),
        }
    }
}

fn run_validation(
    validator: &Validator,
    value: &str,
    state: RwSignal<FieldState>,
    guard: &GenerationGuard,
    scheduler: &dyn Scheduler,
) {
    match validator(value) {
        Validation::Immediate(message) => {
            // Applied as is, but still starts a generation so that deferred
            // answers dispatched earlier can no longer overwrite it.
            guard.dispatch();
            set_error_message(state, message);
        }
        Validation::Deferred(result) => {
            let token = guard.dispatch();
            scheduler.spawn_local(Box::pin(async move {
                let message = validation::error_message(result.await);
                if token.is_current() {
                    set_error_message(state, message);
                }
            }));
        }
    }
}

fn set_error_message(state: RwSignal<FieldState>, message: String) {
    state.try_update(|s| s.error_message = message);
}

#[derive(Clone)]
pub struct TextFieldCore {
    state: RwSignal<FieldState>,
    guard: GenerationGuard,
    validate: Option<Debouncer<String>>,
    on_changed: Option<ChangeHandler>,
    handle: FieldHandle,
}

impl TextFieldCore {
    pub fn builder() -> TextFieldBuilder {
        TextFieldBuilder::default()
    }

    pub fn signal(&self) -> RwSignal<FieldState> {
        self.state
    }

    /// Falls back to `FieldState::default()` once the signal has been
    /// disposed; use [`try_state`](Self::try_state) to tell the two apart.
    pub fn state(&self) -> FieldState {
        self.try_state().unwrap_or_default()
    }

    /// `None` once the owning reactive scope has been disposed.
    pub fn try_state(&self) -> Option<FieldState> {
        self.state.try_get_untracked()
    }

    pub fn handle(&self) -> FieldHandle {
        self.handle.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.guard.is_mounted()
    }

    pub fn is_validation_pending(&self) -> bool {
        self.validate.as_ref().is_some_and(Debouncer::is_pending)
    }

    /// Number of validations dispatched so far.
    pub fn generation(&self) -> u64 {
        self.guard.latest()
    }

    /// A user edit: the value changes right away, the host hears about it,
    /// and a validation is (re)scheduled. Ignored after teardown.
    pub fn handle_input(&self, value: impl Into<String>) {
        if self.guard.is_torn_down() {
            return;
        }
        let value = value.into();
        self.state.try_update(|s| s.value.clone_from(&value));
        if let Some(on_changed) = &self.on_changed {
            on_changed(&value);
        }
        if let Some(validate) = &self.validate {
            validate.call(value);
        }
    }

    /// A new value pushed by the host. The message and pending validations
    /// are left alone.
    pub fn receive_value(&self, value: impl Into<String>) {
        if self.guard.is_torn_down() {
            return;
        }
        let value = value.into();
        self.state.try_update(|s| s.value = value);
    }

    pub fn mount(&self, target: Option<Rc<dyn FocusTarget>>) {
        if !self.guard.mount() {
            return;
        }
        if let Some(target) = target {
            self.handle.attach(target);
        }
    }

    pub fn unmount(&self) {
        if let Some(validate) = &self.validate {
            validate.dispose();
        }
        self.guard.tear_down();
        self.handle.detach();
    }

    pub fn focus(&self) {
        self.handle.focus();
    }
}
