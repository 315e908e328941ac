//! UI State Store
//!
//! One owned record of everything the views read, mutated only through the
//! merge operation. `set_state` applies a partial patch, then synchronously
//! invokes every subscriber in registration order with the fully merged
//! state. The store knows nothing about the rendering layer; the app
//! installs a single subscriber that bridges changes into Leptos signals.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use boothrent_backend::auth::AuthUser;
use boothrent_backend::domain::{BusinessProfile, Renter};
use boothrent_backend::repository::{RenterFilter, Subscription};

/// Which tab of the auth card is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthViewMode {
    #[default]
    SignIn,
    SignUp,
}

/// Which slice of renters the dashboard is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Active,
    Archived,
    All,
}

impl StatusFilter {
    pub fn as_filter(self) -> RenterFilter {
        match self {
            StatusFilter::Active => RenterFilter::active(),
            StatusFilter::Archived => RenterFilter::archived(),
            StatusFilter::All => RenterFilter::any(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::Active => "Active",
            StatusFilter::Archived => "Archived",
            StatusFilter::All => "All",
        }
    }
}

/// The singleton UI state record.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_user: Option<AuthUser>,
    pub auth_ready: bool,
    pub auth_view_mode: AuthViewMode,
    pub auth_loading: bool,
    pub auth_error: String,
    pub selected_renter_id: Option<String>,
    pub drawer_open: bool,
    pub renters: Vec<Renter>,
    pub renters_loading: bool,
    pub search_query: String,
    pub status_filter: StatusFilter,
    pub business: Option<BusinessProfile>,
    pub pending_open_renter_id: Option<String>,
    pub menu_open: bool,
    pub payment_method: String,
    pub other_method: String,
    pub notes_draft_by_renter_id: HashMap<String, String>,
}

impl UiState {
    /// The renter currently shown in the drawer, looked up in the loaded
    /// rows. `None` while the drawer is closed or once the row is gone.
    pub fn selected_renter(&self) -> Option<&Renter> {
        if !self.drawer_open {
            return None;
        }
        let id = self.selected_renter_id.as_ref()?;
        self.renters.iter().find(|renter| &renter.id == id)
    }

    fn apply(&mut self, patch: UiStatePatch) {
        if let Some(v) = patch.current_user {
            self.current_user = v;
        }
        if let Some(v) = patch.auth_ready {
            self.auth_ready = v;
        }
        if let Some(v) = patch.auth_view_mode {
            self.auth_view_mode = v;
        }
        if let Some(v) = patch.auth_loading {
            self.auth_loading = v;
        }
        if let Some(v) = patch.auth_error {
            self.auth_error = v;
        }
        if let Some(v) = patch.selected_renter_id {
            self.selected_renter_id = v;
        }
        if let Some(v) = patch.drawer_open {
            self.drawer_open = v;
        }
        if let Some(v) = patch.renters {
            self.renters = v;
        }
        if let Some(v) = patch.renters_loading {
            self.renters_loading = v;
        }
        if let Some(v) = patch.search_query {
            self.search_query = v;
        }
        if let Some(v) = patch.status_filter {
            self.status_filter = v;
        }
        if let Some(v) = patch.business {
            self.business = v;
        }
        if let Some(v) = patch.pending_open_renter_id {
            self.pending_open_renter_id = v;
        }
        if let Some(v) = patch.menu_open {
            self.menu_open = v;
        }
        if let Some(v) = patch.payment_method {
            self.payment_method = v;
        }
        if let Some(v) = patch.other_method {
            self.other_method = v;
        }
        if let Some(v) = patch.notes_draft_by_renter_id {
            self.notes_draft_by_renter_id = v;
        }
    }
}

/// A shallow-merge patch: populated fields overwrite, absent fields keep
/// their current value. Build with struct-update syntax over `default()`.
#[derive(Debug, Default)]
pub struct UiStatePatch {
    pub current_user: Option<Option<AuthUser>>,
    pub auth_ready: Option<bool>,
    pub auth_view_mode: Option<AuthViewMode>,
    pub auth_loading: Option<bool>,
    pub auth_error: Option<String>,
    pub selected_renter_id: Option<Option<String>>,
    pub drawer_open: Option<bool>,
    pub renters: Option<Vec<Renter>>,
    pub renters_loading: Option<bool>,
    pub search_query: Option<String>,
    pub status_filter: Option<StatusFilter>,
    pub business: Option<Option<BusinessProfile>>,
    pub pending_open_renter_id: Option<Option<String>>,
    pub menu_open: Option<bool>,
    pub payment_method: Option<String>,
    pub other_method: Option<String>,
    pub notes_draft_by_renter_id: Option<HashMap<String, String>>,
}

pub type StateListener = Arc<dyn Fn(&UiState) + Send + Sync>;

/// Locks without propagating poison; the app runs on one logical thread.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct UiStore {
    state: Mutex<UiState>,
    listeners: Arc<Mutex<Vec<(u64, StateListener)>>>,
    next_listener_id: AtomicU64,
}

impl UiStore {
    pub fn new() -> Self {
        UiStore {
            state: Mutex::new(UiState::default()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Current state by shared reference. Callers must not hold the guard
    /// across a `set_state` call.
    pub fn state(&self) -> MutexGuard<'_, UiState> {
        locked(&self.state)
    }

    pub fn snapshot(&self) -> UiState {
        locked(&self.state).clone()
    }

    /// Merges the patch, then notifies every subscriber exactly once, in
    /// registration order, with the merged state. Unconditional; there are
    /// no error conditions. A listener that calls back into `set_state`
    /// starts a nested notification round — no cycle guard exists.
    pub fn set_state(&self, patch: UiStatePatch) {
        locked(&self.state).apply(patch);
        self.notify();
    }

    /// Writes one renter's note draft and notifies, leaving the other
    /// drafts alone.
    pub fn set_renter_note_draft(&self, renter_id: &str, value: &str) {
        locked(&self.state)
            .notes_draft_by_renter_id
            .insert(renter_id.to_string(), value.to_string());
        self.notify();
    }

    /// Registers a listener; the returned handle removes it again without
    /// affecting the others.
    pub fn subscribe(&self, listener: StateListener) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        locked(&self.listeners).push((id, listener));

        let listeners: Weak<Mutex<Vec<(u64, StateListener)>>> = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                locked(&listeners).retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    fn notify(&self) {
        let listeners: Vec<StateListener> = locked(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        let merged = self.snapshot();
        for listener in listeners {
            listener(&merged);
        }
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_populated_fields() {
        let store = UiStore::new();
        store.set_state(UiStatePatch {
            search_query: Some("maya".to_string()),
            drawer_open: Some(true),
            ..UiStatePatch::default()
        });
        store.set_state(UiStatePatch {
            auth_loading: Some(true),
            ..UiStatePatch::default()
        });

        let state = store.state();
        assert_eq!(state.search_query, "maya");
        assert!(state.drawer_open);
        assert!(state.auth_loading);
        assert!(!state.auth_ready);
    }

    #[test]
    fn every_set_state_notifies_each_listener_once_in_order() {
        let store = UiStore::new();
        let calls: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&calls);
        let _first = store.subscribe(Arc::new(move |state: &UiState| {
            assert_eq!(state.search_query, "jordan");
            locked(&sink).push("first");
        }));
        let sink = Arc::clone(&calls);
        let _second = store.subscribe(Arc::new(move |state: &UiState| {
            assert_eq!(state.search_query, "jordan");
            locked(&sink).push("second");
        }));

        store.set_state(UiStatePatch {
            search_query: Some("jordan".to_string()),
            ..UiStatePatch::default()
        });

        assert_eq!(*locked(&calls), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let store = UiStore::new();
        let count_a = Arc::new(AtomicU64::new(0));
        let count_b = Arc::new(AtomicU64::new(0));

        let a = Arc::clone(&count_a);
        let sub_a = store.subscribe(Arc::new(move |_| {
            a.fetch_add(1, Ordering::Relaxed);
        }));
        let b = Arc::clone(&count_b);
        let _sub_b = store.subscribe(Arc::new(move |_| {
            b.fetch_add(1, Ordering::Relaxed);
        }));

        store.set_state(UiStatePatch::default());
        sub_a.unsubscribe();
        store.set_state(UiStatePatch::default());

        assert_eq!(count_a.load(Ordering::Relaxed), 1);
        assert_eq!(count_b.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn note_drafts_merge_per_renter_and_notify() {
        let store = UiStore::new();
        let notified = Arc::new(AtomicU64::new(0));
        let n = Arc::clone(&notified);
        let _sub = store.subscribe(Arc::new(move |_| {
            n.fetch_add(1, Ordering::Relaxed);
        }));

        store.set_renter_note_draft("r1", "prefers text reminders");
        store.set_renter_note_draft("r2", "pays in cash");
        store.set_renter_note_draft("r1", "prefers email reminders");

        assert_eq!(notified.load(Ordering::Relaxed), 3);
        let state = store.state();
        assert_eq!(
            state.notes_draft_by_renter_id.get("r1").map(String::as_str),
            Some("prefers email reminders")
        );
        assert_eq!(state.notes_draft_by_renter_id.len(), 2);
    }

    #[test]
    fn selected_renter_requires_open_drawer_and_loaded_row() {
        use boothrent_backend::domain::{Renter, RenterStatus};
        use chrono::Utc;

        let store = UiStore::new();
        let renter = Renter {
            id: "r1".to_string(),
            name: "Maya Torres".to_string(),
            email: String::new(),
            phone: String::new(),
            status: RenterStatus::Active,
            monthly_rent: 850.0,
            due_day_of_month: 1,
            color: None,
            grade_score: None,
            grade_letter: None,
            updated_at: Utc::now(),
        };
        store.set_state(UiStatePatch {
            renters: Some(vec![renter]),
            selected_renter_id: Some(Some("r1".to_string())),
            ..UiStatePatch::default()
        });
        assert!(store.state().selected_renter().is_none(), "drawer closed");

        store.set_state(UiStatePatch {
            drawer_open: Some(true),
            ..UiStatePatch::default()
        });
        assert_eq!(
            store.state().selected_renter().map(|r| r.id.as_str()),
            Some("r1")
        );

        store.set_state(UiStatePatch {
            renters: Some(Vec::new()),
            ..UiStatePatch::default()
        });
        assert!(store.state().selected_renter().is_none(), "row gone");
    }
}
