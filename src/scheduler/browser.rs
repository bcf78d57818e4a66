use super::{Scheduler, TimerId};
use anyhow::anyhow;
use futures::future::LocalBoxFuture;
use leptos::prelude::{TimeoutHandle, set_timeout_with_handle};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

// Keeps the browser's timeout handles so they can be cleared by id.
// Entries remove themselves when their timer fires.
#[derive(Default)]
pub struct BrowserScheduler {
    handles: Rc<RefCell<HashMap<TimerId, TimeoutHandle>>>,
    next_id: Cell<u64>,
}

impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> anyhow::Result<TimerId> {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let handles = Rc::clone(&self.handles);
        let handle = set_timeout_with_handle(
            move || {
                handles.borrow_mut().remove(&id);
                task();
            },
            delay,
        )
        .map_err(|err| anyhow!("setTimeout failed: {err:?}"))?;

        self.handles.borrow_mut().insert(id, handle);
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(handle) = self.handles.borrow_mut().remove(&id) {
            handle.clear();
        }
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}
