//! Delayed and background work for fields.
//!
//! Fields never talk to the browser's timers directly. They go through a
//! [`Scheduler`], which the browser build backs with `setTimeout` and the tests
//! back with a virtual clock.

use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use leptos::logging::warn;
use std::time::Duration;

mod browser;
mod manual;

pub use browser::BrowserScheduler;
pub use manual::ManualScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Runs `task` once after `delay`, unless cleared first.
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> anyhow::Result<TimerId>;

    /// Clearing a timer that already fired (or never existed) does nothing.
    fn clear_timeout(&self, id: TimerId);

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// A future that completes after `delay`.
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        match self.set_timeout(
            delay,
            Box::new(move || {
                let _ = tx.send(());
            }),
        ) {
            Ok(_) => Box::pin(async move {
                let _ = rx.await;
            }),
            Err(err) => {
                warn!("sleep could not start a timer: {err}");
                Box::pin(future::ready(()))
            }
        }
    }
}
