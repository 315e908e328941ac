//! Renter List Component
//!
//! Renders the loaded rows filtered by the search query. The rows
//! themselves come from the live query; filtering here is name-contains,
//! case-insensitive.

use leptos::prelude::*;

use crate::components::RenterCard;
use crate::context::use_app_context;

#[component]
pub fn RenterList() -> impl IntoView {
    let ctx = use_app_context();

    let filtered = {
        let ctx = ctx.clone();
        move || {
            let state = ctx.watch();
            let query = state.search_query.trim().to_lowercase();
            state
                .renters
                .iter()
                .filter(|renter| renter.name.to_lowercase().contains(&query))
                .cloned()
                .collect::<Vec<_>>()
        }
    };
    let loading = {
        let ctx = ctx.clone();
        move || ctx.watch().renters_loading
    };
    let empty = {
        let filtered = filtered.clone();
        let loading = loading.clone();
        move || !loading() && filtered().is_empty()
    };

    view! {
        <section class="renter-list">
            <Show when=loading.clone()>
                <div class="loading">"Loading renters..."</div>
            </Show>
            <div class="renter-grid">
                <For
                    each=filtered.clone()
                    // Key on the timestamp too: an edited renter keeps its id
                    // but must re-render.
                    key=|renter| format!("{}:{}", renter.id, renter.updated_at.timestamp_millis())
                    children=move |renter| view! { <RenterCard renter=renter/> }
                />
            </div>
            <Show when=empty>
                <p class="empty-state">"No renters match."</p>
            </Show>
        </section>
    }
}
