use leptos::logging::log;
use leptos::prelude::*;
use std::rc::Rc;
use std::time::Duration;
use textfield::{BrowserScheduler, FieldHandle, FieldIdGenerator, Scheduler, TextField, Validation};

// Stand-in for a server lookup
const TAKEN_NAMES: [&str; 3] = ["admin", "root", "guest"];
const LOOKUP_DELAY: Duration = Duration::from_millis(400);

fn check_email(value: String) -> Validation {
    if value.is_empty() {
        Validation::immediate("An email address is required")
    } else if !value.contains('@') {
        Validation::immediate("Enter a valid email address")
    } else {
        Validation::valid()
    }
}

#[component]
fn SignUp() -> impl IntoView {
    provide_context(FieldIdGenerator::new());

    let lookup = Rc::new(BrowserScheduler::new());
    let check_name = move |value: String| {
        let wait = lookup.sleep(LOOKUP_DELAY);
        Validation::deferred(async move {
            wait.await;
            if TAKEN_NAMES.contains(&value.as_str()) {
                anyhow::bail!("\"{value}\" is already taken");
            }
            Ok(())
        })
    };

    let handle = StoredValue::new_local(FieldHandle::new());
    let name = RwSignal::new(String::new());

    view! {
        <TextField
            label="User name"
            description="Checked against existing accounts"
            placeholder="pick a name"
            required=true
            handle=handle.get_value()
            on_changed=move |value: String| name.set(value)
            on_get_error_message=check_name
        />
        <TextField
            label="Email"
            icon_class="ms-Icon ms-Icon--mail"
            underlined=true
            on_get_error_message=check_email
        />
        <TextField label="About you" multiline=true aria_label="Short biography" />
        <button on:click=move |_| handle.with_value(|h| h.focus())>"Edit name"</button>
        <p class="status">{move || format!("Signing up as: {}", name.get())}</p>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    log!("mounting sign-up form");
    leptos::mount::mount_to_body(SignUp);
}
