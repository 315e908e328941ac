//! Renter Drawer Component
//!
//! Detail panel for the selected renter: contact info, payments grouped by
//! month with a record-payment form, the activity log, reminder and
//! archive/restore actions, a guarded permanent delete, and a free-text
//! notes draft kept in UI state only.
//!
//! The drawer renders only while the selected id resolves against the
//! loaded rows, so a renter that vanishes from the live set (archived away
//! from the current slice, or deleted) empties the panel on the same turn.

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use wasm_bindgen::JsCast;

use boothrent_backend::domain::{group_by_month, LedgerDraft, LedgerEntry, RenterEvent, RenterStatus};
use boothrent_backend::repository::{EventStore, LedgerStore, RenterStore};

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::store::UiStatePatch;

const PAYMENT_METHODS: &[&str] = &["Card", "Cash", "Venmo", "Zelle", "Cash App", "Other"];

#[component]
pub fn RenterDrawer() -> impl IntoView {
    let ctx = use_app_context();

    let selected = {
        let ctx = ctx.clone();
        move || {
            let state = ctx.watch();
            state.selected_renter().cloned()
        }
    };
    // Deduped id so data loads re-run only when the selection changes, not
    // on every state merge.
    let selected_id = Memo::new({
        let ctx = ctx.clone();
        move |_| {
            let state = ctx.watch();
            state.selected_renter().map(|renter| renter.id.clone())
        }
    });

    let (ledger, set_ledger) = signal(Vec::<LedgerEntry>::new());
    let (activity, set_activity) = signal(Vec::<RenterEvent>::new());
    let (reload, set_reload) = signal(0u32);
    let (amount, set_amount) = signal(String::new());
    let (note, set_note) = signal(String::new());
    let (pay_error, set_pay_error) = signal(String::new());
    let (saved_flash, set_saved_flash) = signal(false);

    // Load payments and activity when the selection or reload counter moves.
    Effect::new({
        let ctx = ctx.clone();
        move |_| {
            let _ = reload.get();
            let Some(id) = selected_id.get() else {
                set_ledger.set(Vec::new());
                set_activity.set(Vec::new());
                return;
            };
            let Some(uid) = ctx.uid() else { return };
            let cloud = Arc::clone(&ctx.cloud);
            spawn_local(async move {
                match cloud.list_for_renter(&uid, &id).await {
                    Ok(entries) => set_ledger.set(entries),
                    Err(err) => web_sys::console::warn_1(
                        &format!("[drawer] ledger load failed: {}", err).into(),
                    ),
                }
                match cloud.list_by_renter(&uid, &id).await {
                    Ok(events) => set_activity.set(events),
                    Err(err) => web_sys::console::warn_1(
                        &format!("[drawer] activity load failed: {}", err).into(),
                    ),
                }
            });
        }
    });

    let close = {
        let ctx = ctx.clone();
        move |_| {
            ctx.store.set_state(UiStatePatch {
                drawer_open: Some(false),
                selected_renter_id: Some(None),
                ..UiStatePatch::default()
            });
        }
    };

    let payment_method = {
        let ctx = ctx.clone();
        move || ctx.watch().payment_method
    };
    let other_method = {
        let ctx = ctx.clone();
        move || ctx.watch().other_method
    };
    let record_payment = {
        let ctx = ctx.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(uid) = ctx.uid() else { return };
            let Some(id) = selected_id.get_untracked() else { return };

            let method = {
                let state = ctx.store.state();
                if state.payment_method == "Other" {
                    state.other_method.trim().to_string()
                } else {
                    state.payment_method.clone()
                }
            };
            let parsed = amount
                .get_untracked()
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value > 0.0);
            let Some(amount_value) = parsed else {
                set_pay_error.set("Enter a valid payment amount.".to_string());
                return;
            };
            if method.is_empty() {
                set_pay_error.set("Choose a payment method.".to_string());
                return;
            }
            set_pay_error.set(String::new());

            let draft = LedgerDraft {
                renter_id: id,
                amount: amount_value,
                method,
                note: note.get_untracked().trim().to_string(),
                date: Utc::now().date_naive(),
            };
            let cloud = Arc::clone(&ctx.cloud);
            spawn_local(async move {
                match cloud.add(&uid, draft).await {
                    Ok(_) => {
                        set_amount.set(String::new());
                        set_note.set(String::new());
                        set_reload.update(|n| *n += 1);
                        set_saved_flash.set(true);
                        TimeoutFuture::new(1_500).await;
                        set_saved_flash.set(false);
                    }
                    Err(err) => set_pay_error.set(err.message().to_string()),
                }
            });
        }
    };

    let mark_reminder = {
        let ctx = ctx.clone();
        move |_| {
            let Some(uid) = ctx.uid() else { return };
            let Some(id) = selected_id.get_untracked() else { return };
            let cloud = Arc::clone(&ctx.cloud);
            spawn_local(async move {
                match cloud.log_reminder_sent(&uid, &id, None).await {
                    Ok(event) => {
                        web_sys::console::log_1(
                            &format!("[drawer] reminder logged for {}", event.renter_id).into(),
                        );
                        set_reload.update(|n| *n += 1);
                    }
                    Err(err) => web_sys::console::warn_1(
                        &format!("[drawer] reminder log failed: {}", err).into(),
                    ),
                }
            });
        }
    };

    let purge = {
        let ctx = ctx.clone();
        move |()| {
            let Some(uid) = ctx.uid() else { return };
            let Some(id) = selected_id.get_untracked() else { return };
            let cloud = Arc::clone(&ctx.cloud);
            let store = Arc::clone(&ctx.store);
            spawn_local(async move {
                match cloud.permanently_delete(&uid, &id).await {
                    Ok(outcome) => {
                        web_sys::console::log_1(
                            &format!(
                                "[drawer] removed {} ({} event(s), {} payment(s))",
                                id, outcome.events_deleted, outcome.ledger_deleted
                            )
                            .into(),
                        );
                        store.set_state(UiStatePatch {
                            drawer_open: Some(false),
                            selected_renter_id: Some(None),
                            ..UiStatePatch::default()
                        });
                    }
                    Err(err) => web_sys::console::warn_1(
                        &format!("[drawer] delete failed: {}", err).into(),
                    ),
                }
            });
        }
    };

    let note_draft = {
        let ctx = ctx.clone();
        move || {
            let state = ctx.watch();
            state
                .selected_renter_id
                .as_ref()
                .and_then(|id| state.notes_draft_by_renter_id.get(id).cloned())
                .unwrap_or_default()
        }
    };
    let ctx_actions = ctx.clone();
    view! {
        {move || {
            let ctx = ctx_actions.clone();
            let other_method = other_method.clone();
            selected().map(|renter| {
                let other_method_ctx = ctx.clone();
                let is_archived = renter.status == RenterStatus::Archived;
                let toggle_status = {
                    let ctx = ctx.clone();
                    let id = renter.id.clone();
                    move |_| {
                        let Some(uid) = ctx.uid() else { return };
                        let cloud = Arc::clone(&ctx.cloud);
                        let id = id.clone();
                        spawn_local(async move {
                            let result = if is_archived {
                                cloud.restore(&uid, &id).await
                            } else {
                                cloud.archive(&uid, &id).await
                            };
                            if let Err(err) = result {
                                web_sys::console::warn_1(
                                    &format!("[drawer] status change failed: {}", err).into(),
                                );
                            }
                        });
                    }
                };

                view! {
                    <aside class="drawer">
                        <header class="drawer-header">
                            <h2>{renter.name.clone()}</h2>
                            <span class="status-chip">{renter.status.as_str()}</span>
                            <button class="drawer-close" on:click=close.clone()>"Close"</button>
                        </header>

                        <section class="drawer-profile">
                            <p class="drawer-contact">{renter.email.clone()}</p>
                            <p class="drawer-contact">{renter.phone.clone()}</p>
                            <p class="drawer-rent">
                                {format!(
                                    "${:.2} monthly, due on day {}",
                                    renter.monthly_rent, renter.due_day_of_month
                                )}
                            </p>
                        </section>

                        <section class="drawer-actions">
                            <button class="btn" on:click=mark_reminder.clone()>
                                "Mark reminder sent"
                            </button>
                            <button class="btn" on:click=toggle_status>
                                {if is_archived { "Restore" } else { "Archive" }}
                            </button>
                            <DeleteConfirmButton
                                label="Delete renter"
                                button_class="btn btn-danger"
                                on_confirm=Callback::new(purge.clone())
                            />
                        </section>

                        <section class="drawer-payments">
                            <h3>"Payments"</h3>
                            {
                                let grouped = group_by_month(&ledger.get());
                                if grouped.is_empty() {
                                    view! { <p class="empty-state">"No payments recorded."</p> }
                                        .into_any()
                                } else {
                                    grouped
                                        .into_iter()
                                        .map(|(month, entries)| {
                                            view! {
                                                <div class="payment-month">
                                                    <h4>{month}</h4>
                                                    <ul class="payment-list">
                                                        {entries
                                                            .into_iter()
                                                            .map(|entry| {
                                                                view! {
                                                                    <li class="payment-row">
                                                                        <span class="payment-amount">
                                                                            {format!("${:.2}", entry.amount)}
                                                                        </span>
                                                                        <span class="payment-method">{entry.method}</span>
                                                                        <span class="payment-date">
                                                                            {entry.date.format("%b %d").to_string()}
                                                                        </span>
                                                                        <span class="payment-note">{entry.note}</span>
                                                                    </li>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </ul>
                                                </div>
                                            }
                                        })
                                        .collect_view()
                                        .into_any()
                                }
                            }

                            <form class="payment-form" on:submit=record_payment.clone()>
                                <p class="form-error" class:hidden=move || pay_error.get().is_empty()>
                                    {move || pay_error.get()}
                                </p>
                                <input
                                    class="form-input"
                                    type="text"
                                    inputmode="decimal"
                                    placeholder="Amount"
                                    prop:value=move || amount.get()
                                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                                />
                                <select
                                    class="form-input"
                                    prop:value=payment_method.clone()
                                    on:change={
                                        let ctx = ctx.clone();
                                        move |ev| {
                                            let value = ev
                                                .target()
                                                .and_then(|target| {
                                                    target.dyn_into::<web_sys::HtmlSelectElement>().ok()
                                                })
                                                .map(|select| select.value())
                                                .unwrap_or_default();
                                            ctx.store.set_state(UiStatePatch {
                                                payment_method: Some(value),
                                                ..UiStatePatch::default()
                                            });
                                        }
                                    }
                                >
                                    <option value="">"Method..."</option>
                                    {PAYMENT_METHODS
                                        .iter()
                                        .map(|method| view! { <option value=*method>{*method}</option> })
                                        .collect_view()}
                                </select>
                                <Show when={
                                    let method = payment_method.clone();
                                    move || method() == "Other"
                                }>
                                    <input
                                        class="form-input"
                                        type="text"
                                        placeholder="Other method"
                                        prop:value=other_method.clone()
                                        on:input={
                                            let ctx = other_method_ctx.clone();
                                            move |ev| {
                                                ctx.store.set_state(UiStatePatch {
                                                    other_method: Some(event_target_value(&ev)),
                                                    ..UiStatePatch::default()
                                                });
                                            }
                                        }
                                    />
                                </Show>
                                <input
                                    class="form-input"
                                    type="text"
                                    placeholder="Note"
                                    prop:value=move || note.get()
                                    on:input=move |ev| set_note.set(event_target_value(&ev))
                                />
                                <button class="btn" type="submit">"Record payment"</button>
                                <Show when=move || saved_flash.get()>
                                    <span class="saved-flash">"Saved"</span>
                                </Show>
                            </form>
                        </section>

                        <section class="drawer-activity">
                            <h3>"Activity"</h3>
                            {
                                let events = activity.get();
                                if events.is_empty() {
                                    view! { <p class="empty-state">"Nothing logged yet."</p> }
                                        .into_any()
                                } else {
                                    view! {
                                        <ul class="activity-list">
                                            {events
                                                .into_iter()
                                                .map(|event| {
                                                    view! {
                                                        <li class="activity-row">
                                                            <span class="activity-message">{event.message}</span>
                                                            <span class="activity-date">
                                                                {event.sent_at.format("%b %d, %Y").to_string()}
                                                            </span>
                                                        </li>
                                                    }
                                                })
                                                .collect_view()}
                                        </ul>
                                    }
                                    .into_any()
                                }
                            }
                        </section>

                        <section class="drawer-notes">
                            <h3>"Notes"</h3>
                            <textarea
                                class="form-input"
                                placeholder="Private notes about this renter"
                                prop:value=note_draft.clone()
                                on:input={
                                    let ctx = ctx.clone();
                                    move |ev| {
                                        if let Some(id) = selected_id.get_untracked() {
                                            ctx.store
                                                .set_renter_note_draft(&id, &event_target_value(&ev));
                                        }
                                    }
                                }
                            ></textarea>
                        </section>
                    </aside>
                }
            })
        }}
    }
}
