use leptos::logging::warn;
use leptos::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Element ids used by one field: the editable control, and the hidden span
/// its `aria-describedby` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub field: String,
    pub description: String,
}

/// Hands out unique element ids to the fields below it in the tree.
/// Provide one near the root with `provide_context(FieldIdGenerator::default())`.
#[derive(Debug, Clone, Default)]
pub struct FieldIdGenerator {
    next: Arc<AtomicUsize>,
}

impl FieldIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ids(&self) -> FieldIds {
        let n = self.next.fetch_add(2, Ordering::Relaxed);
        FieldIds {
            field: format!("TextField-{n}"),
            description: format!("TextFieldDescription-{}", n + 1),
        }
    }
}

/// Takes ids from the generator in context. Without one, a generator is
/// created and provided on the current owner, so ids are only unique among
/// that owner's descendants.
pub fn use_field_ids() -> FieldIds {
    let generator = use_context::<FieldIdGenerator>().unwrap_or_else(|| {
        warn!("no FieldIdGenerator in context; field ids may collide");
        let generator = FieldIdGenerator::new();
        provide_context(generator.clone());
        generator
    });
    generator.next_ids()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_per_generator() {
        let generator = FieldIdGenerator::new();
        let first = generator.next_ids();
        let second = generator.clone().next_ids();
        assert_eq!(first.field, "TextField-0");
        assert_eq!(first.description, "TextFieldDescription-1");
        assert_eq!(second.field, "TextField-2");
        assert_eq!(second.description, "TextFieldDescription-3");

        // separate generators do not share state
        assert_eq!(FieldIdGenerator::new().next_ids(), first);
    }

    #[test]
    fn test_ids_from_context() {
        let owner = Owner::new();
        owner.with(|| {
            provide_context(FieldIdGenerator::new());
            assert_eq!(use_field_ids().field, "TextField-0");
            assert_eq!(use_field_ids().field, "TextField-2");
        });
    }
}
