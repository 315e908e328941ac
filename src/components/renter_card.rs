//! Renter Card Component
//!
//! One renter summary row in the list; clicking selects the renter and
//! opens the detail drawer.

use leptos::prelude::*;

use boothrent_backend::domain::{Renter, RenterStatus};

use crate::context::use_app_context;
use crate::store::UiStatePatch;

const DEFAULT_ACCENT: &str = "#e5e2ff";

#[component]
pub fn RenterCard(renter: Renter) -> impl IntoView {
    let ctx = use_app_context();

    let accent = renter
        .color
        .clone()
        .unwrap_or_else(|| DEFAULT_ACCENT.to_string());
    let initial = renter
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    let archived = renter.status == RenterStatus::Archived;

    let renter_id = renter.id.clone();
    let on_open = move |_| {
        ctx.store.set_state(UiStatePatch {
            selected_renter_id: Some(Some(renter_id.clone())),
            drawer_open: Some(true),
            ..UiStatePatch::default()
        });
    };

    view! {
        <div class="renter-card" class:archived=archived on:click=on_open>
            <div class="renter-avatar" style=format!("background: {}", accent)>{initial}</div>
            <div class="renter-body">
                <div class="renter-name">{renter.name.clone()}</div>
                <div class="renter-contact">{renter.phone.clone()}</div>
                <div class="renter-rent">
                    {format!(
                        "${:.0}/mo, due day {}",
                        renter.monthly_rent, renter.due_day_of_month
                    )}
                </div>
            </div>
            {renter
                .grade_letter
                .clone()
                .map(|grade| view! { <span class="grade-badge">{grade}</span> })}
            <Show when=move || archived>
                <span class="status-chip">"Archived"</span>
            </Show>
        </div>
    }
}
