//! Reminder Badge Component
//!
//! Live count of "reminder marked sent" events for the current calendar
//! month. Subscribes while mounted and unsubscribes on cleanup, so a
//! sign-out (which unmounts the dashboard) always detaches the listener.

use chrono::Utc;
use leptos::prelude::*;
use std::sync::Arc;

use boothrent_backend::domain::month_key;
use boothrent_backend::repository::EventStore;

use crate::context::use_app_context;

#[component]
pub fn ReminderBadge() -> impl IntoView {
    let ctx = use_app_context();
    let (count, set_count) = signal(0usize);

    let month = month_key(&Utc::now());
    let sub = ctx.uid().map(|uid| {
        ctx.cloud.listen_reminders_for_month(
            &uid,
            &month,
            Arc::new(move |events| set_count.set(events.len())),
        )
    });
    on_cleanup(move || {
        if let Some(sub) = sub {
            sub.unsubscribe();
        }
    });

    view! {
        <span class="reminder-badge" title="Reminders marked sent this month">
            {move || {
                let n = count.get();
                format!("{} reminder{} sent this month", n, if n == 1 { "" } else { "s" })
            }}
        </span>
    }
}
