//! App Component
//!
//! Root of the view tree and home of the auth-driven lifecycle: one store
//! bridge into the reactive layer, one session watcher, and the effects
//! that keep the renters live query and the pending-open flow in step with
//! the state.

use leptos::prelude::*;
use std::sync::Arc;

use boothrent_backend::auth::AuthGateway;

use crate::components::{AuthView, Dashboard};
use crate::context::use_app_context;
use crate::store::UiStatePatch;

#[component]
pub fn App() -> impl IntoView {
    let ctx = use_app_context();

    // Bridge: exactly one store subscriber drives the version signal that
    // every view closure tracks.
    {
        let bridge = ctx.clone();
        let sub = ctx.store.subscribe(Arc::new(move |_| bridge.bump()));
        on_cleanup(move || sub.unsubscribe());
    }

    // Session watcher: every auth transition resets the transient view
    // flags in one merge.
    {
        let store = Arc::clone(&ctx.store);
        let sub = ctx.auth.listen(Arc::new(move |user| {
            store.set_state(UiStatePatch {
                current_user: Some(user),
                auth_ready: Some(true),
                auth_loading: Some(false),
                auth_error: Some(String::new()),
                drawer_open: Some(false),
                selected_renter_id: Some(None),
                ..UiStatePatch::default()
            });
        }));
        on_cleanup(move || sub.unsubscribe());
    }

    // Controller: session and status-filter changes start or stop the
    // renters listener (never more than one at a time).
    Effect::new({
        let ctx = ctx.clone();
        move |_| {
            ctx.track();
            ctx.sync_renters_stream();
        }
    });

    // Pending-open: a freshly created renter opens its drawer once the
    // live query has delivered it.
    Effect::new({
        let ctx = ctx.clone();
        move |_| {
            ctx.track();
            ctx.resolve_pending_open();
        }
    });

    let show_auth = {
        let ctx = ctx.clone();
        move || {
            let state = ctx.watch();
            state.auth_ready && state.current_user.is_none()
        }
    };
    let show_dashboard = {
        let ctx = ctx.clone();
        move || ctx.watch().current_user.is_some()
    };

    view! {
        <main class="app-shell">
            <Show when=show_auth>
                <AuthView/>
            </Show>
            <Show when=show_dashboard>
                <Dashboard/>
            </Show>
        </main>
    }
}
