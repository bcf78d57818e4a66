use crate::scheduler::{Scheduler, TimerId};
use leptos::logging::warn;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

struct Inner<T> {
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    callback: Box<dyn Fn(T)>,
    pending: Cell<Option<TimerId>>,
    disposed: Cell<bool>,
}

/// Delays calls to a callback until `delay` has passed without another call.
///
/// Each [`call`](Debouncer::call) supersedes the one still waiting, so the
/// callback runs once, with the latest value, after the input goes quiet.
/// Every field owns its own debouncer.
pub struct Debouncer<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Debouncer {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Debouncer<T> {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay: Duration, callback: impl Fn(T) + 'static) -> Self {
        Debouncer {
            inner: Rc::new(Inner {
                scheduler,
                delay,
                callback: Box::new(callback),
                pending: Cell::new(None),
                disposed: Cell::new(false),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    pub fn call(&self, value: T) {
        if self.inner.disposed.get() {
            return;
        }
        self.cancel();

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        let task = Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            if !inner.disposed.get() {
                (inner.callback)(value);
            }
        });
        match self.inner.scheduler.set_timeout(self.inner.delay, task) {
            Ok(id) => self.inner.pending.set(Some(id)),
            Err(err) => warn!("debounced call dropped: {err}"),
        }
    }

    /// Cancels the waiting call, if any. Later calls still work.
    pub fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            self.inner.scheduler.clear_timeout(id);
        }
    }

    /// Cancels the waiting call and ignores all future ones.
    pub fn dispose(&self) {
        self.cancel();
        self.inner.disposed.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (ManualScheduler, Debouncer<&'static str>, Rc<RefCell<Vec<(Duration, &'static str)>>>) {
        let clock = ManualScheduler::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (seen, at) = (Rc::clone(&calls), clock.clone());
        let debouncer = Debouncer::new(Rc::new(clock.clone()), ms(200), move |v: &'static str| {
            seen.borrow_mut().push((at.now(), v));
        });
        (clock, debouncer, calls)
    }

    #[test]
    fn test_rapid_calls_coalesce() {
        let (clock, debouncer, calls) = setup();
        debouncer.call("a");
        clock.advance(ms(50));
        debouncer.call("ab");
        clock.advance(ms(50));
        debouncer.call("abc");
        assert!(debouncer.is_pending());

        clock.advance(ms(199));
        assert!(calls.borrow().is_empty());
        clock.advance(ms(1));
        assert_eq!(*calls.borrow(), vec![(ms(300), "abc")]);
        assert!(!debouncer.is_pending());
        // superseded timers were cleared, not left to fire
        assert_eq!(clock.pending_timers(), 0);
    }

    #[test]
    fn test_separate_windows_each_fire() {
        let (clock, debouncer, calls) = setup();
        debouncer.call("first");
        clock.advance(ms(250));
        debouncer.call("second");
        clock.advance(ms(250));
        assert_eq!(*calls.borrow(), vec![(ms(200), "first"), (ms(450), "second")]);
    }

    #[test]
    fn test_dispose_cancels_pending_call() {
        let (clock, debouncer, calls) = setup();
        debouncer.call("never");
        debouncer.dispose();
        assert!(!debouncer.is_pending());
        clock.advance(ms(1000));
        debouncer.call("ignored");
        clock.advance(ms(1000));
        assert!(calls.borrow().is_empty());
        assert_eq!(clock.timers_started(), 1);
    }

    #[test]
    fn test_dropped_debouncer_never_fires() {
        let (clock, debouncer, calls) = setup();
        debouncer.call("orphan");
        drop(debouncer);
        clock.advance(ms(500));
        assert!(calls.borrow().is_empty());
    }
}
