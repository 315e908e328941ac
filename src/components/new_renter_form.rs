//! New Renter Form Component
//!
//! Validated creation form. On failure the message is shown inline and no
//! write happens; on success the new id is parked as "pending open" so the
//! drawer opens once the live query delivers the row.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use boothrent_backend::domain::{NewRenterInput, RenterDraft};
use boothrent_backend::repository::RenterStore;

use crate::context::use_app_context;
use crate::store::UiStatePatch;

#[component]
pub fn NewRenterForm() -> impl IntoView {
    let ctx = use_app_context();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (rent, set_rent) = signal(String::new());
    let (due_day, set_due_day) = signal(String::new());
    let (error, set_error) = signal(String::new());

    let on_submit = {
        let ctx = ctx.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(uid) = ctx.uid() else { return };

            let input = NewRenterInput {
                name: name.get(),
                email: email.get(),
                phone: phone.get(),
                monthly_rent: rent.get(),
                due_day_of_month: due_day.get(),
            };
            let draft = match RenterDraft::parse(input) {
                Ok(draft) => draft,
                Err(err) => {
                    set_error.set(err.message().to_string());
                    return;
                }
            };
            set_error.set(String::new());

            let cloud = Arc::clone(&ctx.cloud);
            let store = Arc::clone(&ctx.store);
            spawn_local(async move {
                match cloud.create(&uid, draft).await {
                    Ok(created) => {
                        set_name.set(String::new());
                        set_email.set(String::new());
                        set_phone.set(String::new());
                        set_rent.set(String::new());
                        set_due_day.set(String::new());
                        // The drawer opens once the live query delivers a
                        // set containing this id, not before.
                        store.set_state(UiStatePatch {
                            pending_open_renter_id: Some(Some(created.id)),
                            ..UiStatePatch::default()
                        });
                    }
                    Err(err) => set_error.set(err.message().to_string()),
                }
            });
        }
    };

    view! {
        <form class="new-renter-form" on:submit=on_submit>
            <h2>"Add a renter"</h2>

            <p class="form-error" class:hidden=move || error.get().is_empty()>
                {move || error.get()}
            </p>

            <div class="form-grid">
                <label>
                    "Renter Name"
                    <input
                        class="form-input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        class="form-input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Phone"
                    <input
                        class="form-input"
                        type="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Monthly Rent"
                    <input
                        class="form-input"
                        type="text"
                        inputmode="decimal"
                        placeholder="0"
                        prop:value=move || rent.get()
                        on:input=move |ev| set_rent.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Due Day (1-28)"
                    <input
                        class="form-input"
                        type="text"
                        inputmode="numeric"
                        placeholder="1"
                        prop:value=move || due_day.get()
                        on:input=move |ev| set_due_day.set(event_target_value(&ev))
                    />
                </label>
            </div>

            <button class="btn btn-primary" type="submit">"Create Renter"</button>
        </form>
    }
}
