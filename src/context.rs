//! Application Context
//!
//! Shared handles provided via the Leptos Context API, plus the controller
//! logic that mediates between the UI store, the document store, and the
//! auth gateway: starting and stopping the renters live query as the
//! session and status filter change.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use boothrent_backend::auth::AuthGateway;
use boothrent_backend::repository::{BusinessStore, CloudStore, RenterStore, Subscription};

use crate::store::{StatusFilter, UiState, UiStatePatch, UiStore};

/// Identifies the live query currently feeding the renter list.
#[derive(Clone, PartialEq, Eq)]
struct StreamKey {
    uid: String,
    filter: StatusFilter,
}

/// App-wide handles. Cheap to clone; every clone shares the same store,
/// backend, and active-subscription slot.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<UiStore>,
    pub cloud: Arc<dyn CloudStore>,
    pub auth: Arc<dyn AuthGateway>,
    /// Bumped by the store bridge on every merge so views re-render.
    version: RwSignal<u64>,
    renters_sub: Arc<Mutex<Option<Subscription>>>,
    active_stream: Arc<Mutex<Option<StreamKey>>>,
}

/// Locks without propagating poison; the app runs on one logical thread.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppContext {
    pub fn new(cloud: Arc<dyn CloudStore>, auth: Arc<dyn AuthGateway>) -> Self {
        AppContext {
            store: Arc::new(UiStore::new()),
            cloud,
            auth,
            version: RwSignal::new(0),
            renters_sub: Arc::new(Mutex::new(None)),
            active_stream: Arc::new(Mutex::new(None)),
        }
    }

    /// Signals a state change to the rendering layer.
    pub fn bump(&self) {
        self.version.update(|v| *v += 1);
    }

    /// Tracks the store version without reading state; for effects that
    /// fetch what they need through `store` directly.
    pub fn track(&self) {
        self.version.get();
    }

    /// Tracks the store version and returns a fresh state snapshot. Call
    /// from reactive closures so they re-run on every merge.
    pub fn watch(&self) -> UiState {
        self.version.get();
        self.store.snapshot()
    }

    pub fn uid(&self) -> Option<String> {
        self.store
            .state()
            .current_user
            .as_ref()
            .map(|user| user.uid.clone())
    }

    /// Keeps the renters live query in step with the session and the
    /// status filter. Idempotent: called from a reactive effect after every
    /// state merge.
    pub fn sync_renters_stream(&self) {
        let (user, filter) = {
            let state = self.store.state();
            (state.current_user.clone(), state.status_filter)
        };

        match user {
            Some(user) => {
                let key = StreamKey {
                    uid: user.uid.clone(),
                    filter,
                };
                let previous = locked(&self.active_stream).clone();
                if previous.as_ref() == Some(&key) {
                    return;
                }
                let entering = previous.map_or(true, |k| k.uid != key.uid);

                self.store.set_state(UiStatePatch {
                    renters_loading: Some(true),
                    ..UiStatePatch::default()
                });
                self.start_stream(key);
                if entering {
                    self.load_business_profile(&user.uid);
                }
            }
            None => self.leave_session(),
        }
    }

    /// Opens the drawer for a freshly created renter once the live query
    /// has delivered a set containing it, then clears the pending mark.
    /// Creation and the listener-driven refresh are decoupled, so the
    /// creator cannot assume the row is already in the cached list.
    pub fn resolve_pending_open(&self) {
        let arrived = {
            let state = self.store.state();
            match state.pending_open_renter_id.as_ref() {
                Some(id) if state.renters.iter().any(|renter| &renter.id == id) => {
                    Some(id.clone())
                }
                _ => None,
            }
        };

        if let Some(id) = arrived {
            self.store.set_state(UiStatePatch {
                pending_open_renter_id: Some(None),
                selected_renter_id: Some(Some(id)),
                drawer_open: Some(true),
                ..UiStatePatch::default()
            });
        }
    }

    /// Only one renters listener is ever active: any previous one is torn
    /// down before the new registration, so a stale listener can never fire
    /// after its replacement exists.
    fn start_stream(&self, key: StreamKey) {
        self.stop_stream();

        let uid = key.uid.clone();
        let filter = key.filter.as_filter();
        *locked(&self.active_stream) = Some(key);

        let store = Arc::clone(&self.store);
        let sub = self.cloud.listen(
            &uid,
            filter,
            Arc::new(move |rows| {
                store.set_state(UiStatePatch {
                    renters: Some(rows),
                    renters_loading: Some(false),
                    ..UiStatePatch::default()
                });
            }),
        );
        *locked(&self.renters_sub) = Some(sub);
    }

    fn stop_stream(&self) {
        if let Some(sub) = locked(&self.renters_sub).take() {
            sub.unsubscribe();
        }
        *locked(&self.active_stream) = None;
    }

    /// Sign-out path: tear down the live query and clear every user-scoped
    /// field in one merge.
    fn leave_session(&self) {
        if locked(&self.active_stream).is_none() {
            return;
        }
        self.stop_stream();
        web_sys::console::log_1(&"[app] session closed, clearing user state".into());
        self.store.set_state(UiStatePatch {
            renters: Some(Vec::new()),
            renters_loading: Some(false),
            business: Some(None),
            selected_renter_id: Some(None),
            drawer_open: Some(false),
            search_query: Some(String::new()),
            pending_open_renter_id: Some(None),
            menu_open: Some(false),
            payment_method: Some(String::new()),
            other_method: Some(String::new()),
            notes_draft_by_renter_id: Some(Default::default()),
            ..UiStatePatch::default()
        });
    }

    fn load_business_profile(&self, uid: &str) {
        let cloud = Arc::clone(&self.cloud);
        let store = Arc::clone(&self.store);
        let uid = uid.to_string();
        spawn_local(async move {
            match cloud.profile(&uid).await {
                Ok(profile) => store.set_state(UiStatePatch {
                    business: Some(profile),
                    ..UiStatePatch::default()
                }),
                Err(err) => web_sys::console::warn_1(
                    &format!("[app] business profile load failed: {}", err).into(),
                ),
            }
        });
    }
}

/// Fetches the context or panics: every component lives under `App`, which
/// provides it.
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
