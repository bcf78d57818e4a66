use anyhow::anyhow;
use leptos::logging::warn;
use std::cell::RefCell;
use std::rc::Rc;

pub trait FocusTarget {
    fn focus(&self) -> anyhow::Result<()>;
}

impl FocusTarget for web_sys::HtmlElement {
    fn focus(&self) -> anyhow::Result<()> {
        web_sys::HtmlElement::focus(self).map_err(|err| anyhow!("focus failed: {err:?}"))
    }
}

/// Host-side handle to a field. The field attaches its editable control when
/// it mounts and detaches it on teardown; in between, [`focus`](Self::focus)
/// moves keyboard focus to the control.
#[derive(Clone, Default)]
pub struct FieldHandle {
    target: Rc<RefCell<Option<Rc<dyn FocusTarget>>>>,
}

impl FieldHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.target.borrow().is_some()
    }

    /// Does nothing while no control is attached.
    pub fn focus(&self) {
        let target = self.target.borrow().clone();
        if let Some(target) = target
            && let Err(err) = target.focus()
        {
            warn!("{err}");
        }
    }

    pub(crate) fn attach(&self, target: Rc<dyn FocusTarget>) {
        *self.target.borrow_mut() = Some(target);
    }

    pub(crate) fn detach(&self) {
        self.target.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingTarget {
        focused: Cell<usize>,
    }

    impl FocusTarget for CountingTarget {
        fn focus(&self) -> anyhow::Result<()> {
            self.focused.set(self.focused.get() + 1);
            Ok(())
        }
    }

    struct BrokenTarget;

    impl FocusTarget for BrokenTarget {
        fn focus(&self) -> anyhow::Result<()> {
            Err(anyhow!("element is hidden"))
        }
    }

    #[test]
    fn test_focus_only_while_attached() {
        let handle = FieldHandle::new();
        let target = Rc::new(CountingTarget::default());
        handle.focus();

        handle.attach(target.clone());
        handle.clone().focus();
        assert_eq!(target.focused.get(), 1);

        handle.detach();
        handle.focus();
        assert_eq!(target.focused.get(), 1);
        assert!(!handle.is_attached());
    }

    #[test]
    fn test_focus_failure_is_swallowed() {
        let handle = FieldHandle::new();
        handle.attach(Rc::new(BrokenTarget));
        handle.focus();
        assert!(handle.is_attached());
    }
}
