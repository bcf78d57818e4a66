//! The `TextField` component.

use crate::field::TextFieldCore;
use crate::focus::{FieldHandle, FocusTarget};
use crate::ids::{FieldIds, use_field_ids};
use crate::scheduler::Scheduler;
use crate::style::{FieldStyle, container_class, field_class};
use crate::validation::Validation;
use leptos::callback::{Callable, UnsyncCallback};
use leptos::html;
use leptos::prelude::*;
use std::rc::Rc;

/// ### TextField Component
/// A single-line or multi-line text input with optional label, icon and
/// description, and debounced validation through `on_get_error_message`.
///
/// ### Parameters
/// `value` initial value; later changes replace the current text
/// `on_changed` called with the new text on every edit
/// `on_get_error_message` validator; leave it out to disable validation
/// `handle` lets the host call `focus()` on the field
/// `scheduler` timer backend, the browser's by default
#[component]
pub fn TextField(
    #[prop(into, optional)] value: MaybeProp<String>,
    #[prop(optional)] disabled: bool,
    #[prop(optional)] required: bool,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] underlined: bool,
    #[prop(optional)] read_only: bool,
    #[prop(into, optional)] label: Option<String>,
    #[prop(into, optional)] description: Option<String>,
    #[prop(into, optional)] icon_class: Option<String>,
    #[prop(into, optional)] placeholder: Option<String>,
    #[prop(into, optional)] aria_label: Option<String>,
    #[prop(into, optional)] class: Option<String>,
    #[prop(into, optional)] on_changed: Option<UnsyncCallback<String>>,
    #[prop(into, optional)] on_get_error_message: Option<UnsyncCallback<String, Validation>>,
    #[prop(optional)] handle: Option<FieldHandle>,
    #[prop(optional)] scheduler: Option<Rc<dyn Scheduler>>,
) -> impl IntoView {
    let FieldIds {
        field: field_id,
        description: description_id,
    } = use_field_ids();

    let mut builder = TextFieldCore::builder();
    if let Some(initial) = value.get_untracked() {
        builder = builder.value(initial);
    }
    if let Some(on_changed) = on_changed {
        builder = builder.on_changed(move |v| on_changed.run(v.to_string()));
    }
    if let Some(validator) = on_get_error_message {
        builder = builder.on_get_error_message(move |v| validator.run(v.to_string()));
    }
    if let Some(handle) = handle {
        builder = builder.handle(handle);
    }
    if let Some(scheduler) = scheduler {
        builder = builder.scheduler(scheduler);
    }
    let core = builder.build();
    let state = core.signal();
    let core = StoredValue::new_local(core);

    // Values pushed by the host after the first render
    Effect::watch(
        move || value.get(),
        move |next, _, _| {
            if let Some(next) = next {
                core.with_value(|c| c.receive_value(next.clone()));
            }
        },
        false,
    );

    let input_ref = NodeRef::<html::Input>::new();
    let textarea_ref = NodeRef::<html::Textarea>::new();

    // Mounted once the editable control exists in the DOM
    Effect::new(move |_| {
        let target: Option<Rc<dyn FocusTarget>> = if multiline {
            textarea_ref
                .get()
                .map(|el| Rc::new(web_sys::HtmlElement::from(el)) as Rc<dyn FocusTarget>)
        } else {
            input_ref
                .get()
                .map(|el| Rc::new(web_sys::HtmlElement::from(el)) as Rc<dyn FocusTarget>)
        };
        if target.is_some() {
            core.with_value(|c| c.mount(target));
        }
    });

    on_cleanup(move || {
        core.try_with_value(|c| c.unmount());
    });

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        if let Some(core) = core.try_get_value() {
            core.handle_input(value);
        }
    };

    let has_error = move || state.with(|s| s.has_error());
    let error_message = move || state.with(|s| s.error_message.clone());
    let current_value = move || state.with(|s| s.value.clone());
    let control_class = move || field_class(has_error());

    let container = container_class(&FieldStyle {
        class,
        required,
        disabled,
        multiline,
        underlined,
    });

    let label_view = label.map(|text| {
        view! {
            <label for=field_id.clone() class="ms-Label">
                {text}
            </label>
        }
    });

    let control = if multiline {
        view! {
            <textarea
                id=field_id
                node_ref=textarea_ref
                class=control_class
                prop:value=current_value
                readonly=read_only
                disabled=disabled
                on:input=on_input
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                id=field_id
                node_ref=input_ref
                class=control_class
                placeholder=placeholder
                prop:value=current_value
                aria-describedby=description_id.clone()
                readonly=read_only
                disabled=disabled
                on:input=on_input
            />
        }
        .into_any()
    };

    view! {
        <div class=container>
            {label_view}
            {icon_class.map(|icon| view! { <i class=icon></i> })}
            {control}
            <Show when=has_error>
                <p class="ms-TextField-errorMessage ms-u-slideDownIn20">{error_message}</p>
                <div aria-live="assertive" class="ms-u-screenReaderOnly">
                    {error_message}
                </div>
            </Show>
            {description
                .map(|text| view! { <span class="ms-TextField-description">{text}</span> })}
            {aria_label
                .map(move |text| {
                    view! {
                        <span id=description_id class="ms-TextField-hidden">
                            {text}
                        </span>
                    }
                })}
        </div>
    }
}
