//! A text field component for leptos with debounced, stale-aware validation.

mod component;
pub mod debounce;
pub mod field;
pub mod focus;
pub mod generation;
pub mod ids;
pub mod scheduler;
pub mod style;
pub mod validation;

pub use component::TextField;
pub use field::{FieldState, TextFieldBuilder, TextFieldCore, VALIDATION_DEBOUNCE};
pub use focus::{FieldHandle, FocusTarget};
pub use ids::{FieldIdGenerator, FieldIds};
pub use scheduler::{BrowserScheduler, ManualScheduler, Scheduler, TimerId};
pub use validation::Validation;
