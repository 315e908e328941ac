//! BoothRent Frontend Entry Point

mod app;
mod components;
mod context;
mod demo;
mod store;

use std::sync::Arc;

use leptos::prelude::*;

use boothrent_backend::auth::{AuthGateway, InMemoryAuth};
use boothrent_backend::repository::{BusinessStore, CloudStore, InMemoryDb};

use app::App;
use context::AppContext;

fn main() {
    console_error_panic_hook::set_once();

    let db = Arc::new(InMemoryDb::new());
    demo::seed(&db);

    let auth = Arc::new(InMemoryAuth::new(
        Arc::clone(&db) as Arc<dyn BusinessStore>
    ));
    auth.seed_account(demo::DEMO_UID, demo::DEMO_EMAIL, demo::DEMO_PASSWORD);

    web_sys::console::log_1(&format!("[app] demo sign-in: {}", demo::DEMO_EMAIL).into());

    let ctx = AppContext::new(db as Arc<dyn CloudStore>, auth as Arc<dyn AuthGateway>);
    mount_to_body(move || {
        provide_context(ctx);
        view! { <App/> }
    });
}
