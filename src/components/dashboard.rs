//! Dashboard Component
//!
//! The signed-in shell: business name header, reminder badge, menu with
//! sign-out, search input, status tabs, and the renter surfaces.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use boothrent_backend::auth::AuthGateway;

use crate::components::{NewRenterForm, ReminderBadge, RenterDrawer, RenterList};
use crate::context::use_app_context;
use crate::store::{StatusFilter, UiStatePatch};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();

    let business_name = {
        let ctx = ctx.clone();
        move || {
            ctx.watch()
                .business
                .map(|profile| profile.business_name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "BoothRent Pro".to_string())
        }
    };

    let menu_hidden = {
        let ctx = ctx.clone();
        move || !ctx.watch().menu_open
    };
    let toggle_menu = {
        let ctx = ctx.clone();
        move |_| {
            let open = ctx.store.state().menu_open;
            ctx.store.set_state(UiStatePatch {
                menu_open: Some(!open),
                ..UiStatePatch::default()
            });
        }
    };

    let on_sign_out = {
        let ctx = ctx.clone();
        move |_| {
            let auth = Arc::clone(&ctx.auth);
            let store = Arc::clone(&ctx.store);
            store.set_state(UiStatePatch {
                menu_open: Some(false),
                ..UiStatePatch::default()
            });
            spawn_local(async move {
                if let Err(err) = auth.sign_out().await {
                    store.set_state(UiStatePatch {
                        auth_error: Some(err.user_message().to_string()),
                        ..UiStatePatch::default()
                    });
                }
            });
        }
    };

    let search_query = {
        let ctx = ctx.clone();
        move || ctx.watch().search_query
    };
    let current_filter = {
        let ctx = ctx.clone();
        move || ctx.watch().status_filter
    };

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1 class="business-name">{business_name}</h1>
                <ReminderBadge/>
                <div class="menu">
                    <button class="menu-toggle" on:click=toggle_menu>"Menu"</button>
                    <div class="menu-popover" class:hidden=menu_hidden>
                        <button class="menu-item" on:click=on_sign_out>"Sign Out"</button>
                    </div>
                </div>
            </header>

            <div class="toolbar">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search renters..."
                    prop:value=search_query
                    on:input={
                        let ctx = ctx.clone();
                        move |ev| {
                            ctx.store.set_state(UiStatePatch {
                                search_query: Some(event_target_value(&ev)),
                                ..UiStatePatch::default()
                            });
                        }
                    }
                />
                <div class="status-tabs">
                    {[StatusFilter::Active, StatusFilter::Archived, StatusFilter::All]
                        .into_iter()
                        .map(|filter| {
                            let ctx = ctx.clone();
                            let current = current_filter.clone();
                            view! {
                                <button
                                    class="status-tab"
                                    class:active=move || current() == filter
                                    // Switching the slice restarts the live
                                    // query through the controller.
                                    on:click=move |_| {
                                        ctx.store.set_state(UiStatePatch {
                                            status_filter: Some(filter),
                                            ..UiStatePatch::default()
                                        });
                                    }
                                >
                                    {filter.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <NewRenterForm/>
            <RenterList/>
            <RenterDrawer/>
        </div>
    }
}
