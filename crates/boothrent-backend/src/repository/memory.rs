//! In-memory document store.
//!
//! A multi-tenant stand-in for the cloud document backend: every collection
//! is keyed first by the owning uid, and every mutation re-notifies that
//! uid's live queries with a freshly computed, freshly copied result set —
//! never a diff. Full recompute trades efficiency for simplicity and is the
//! design baseline here.
//!
//! Locks are uncontended formalities: everything runs on one logical
//! thread, and no lock is ever held while a listener callback runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::listeners::{locked, ListenerSet, Subscription};
use super::traits::{
    BusinessStore, EventStore, LedgerStore, PurgeOutcome, ReminderCallback, RenterCallback,
    RenterFilter, RenterStore,
};
use crate::domain::{
    month_key, BusinessProfile, BusinessProfileInput, DomainError, DomainResult, Entity,
    EventKind, LedgerDraft, LedgerEntry, Renter, RenterDraft, RenterEvent, RenterStatus,
};

/// Batch size for the internal cascade-delete loops. An implementation
/// detail, not part of the contract: callers observe all-or-nothing.
const DELETE_CHUNK: usize = 200;

struct RenterListener {
    filter: RenterFilter,
    on_change: RenterCallback,
}

struct ReminderListener {
    month_key: String,
    on_change: ReminderCallback,
}

/// Wholesale replacement data for one uid's collections.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub renters: Vec<Renter>,
    pub events: Vec<RenterEvent>,
    pub ledger: Vec<LedgerEntry>,
}

/// The in-memory backend, shared as `Arc<InMemoryDb>`.
pub struct InMemoryDb {
    renters_by_uid: Mutex<HashMap<String, Vec<Renter>>>,
    events_by_uid: Mutex<HashMap<String, Vec<RenterEvent>>>,
    ledger_by_uid: Mutex<HashMap<String, Vec<LedgerEntry>>>,
    businesses_by_uid: Mutex<HashMap<String, BusinessProfile>>,
    renter_listeners: ListenerSet<String, Arc<RenterListener>>,
    reminder_listeners: ListenerSet<String, Arc<ReminderListener>>,
    id_seq: AtomicU64,
}

fn index_of<T: Entity>(rows: &[T], id: &T::Id) -> Option<usize> {
    rows.iter().position(|row| row.id() == id)
}

impl InMemoryDb {
    pub fn new() -> Self {
        InMemoryDb {
            renters_by_uid: Mutex::new(HashMap::new()),
            events_by_uid: Mutex::new(HashMap::new()),
            ledger_by_uid: Mutex::new(HashMap::new()),
            businesses_by_uid: Mutex::new(HashMap::new()),
            renter_listeners: ListenerSet::new(),
            reminder_listeners: ListenerSet::new(),
            id_seq: AtomicU64::new(0),
        }
    }

    /// Replaces a uid's collections wholesale. Seeding does not notify
    /// listeners; it runs before any live query exists.
    pub fn seed_user(&self, uid: &str, seed: SeedData) {
        locked(&self.renters_by_uid).insert(uid.to_string(), seed.renters);
        locked(&self.events_by_uid).insert(uid.to_string(), seed.events);
        locked(&self.ledger_by_uid).insert(uid.to_string(), seed.ledger);
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.id_seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }

    /// Re-invokes every renter listener of the uid with its own freshly
    /// filtered, freshly cloned snapshot. All locks are released before the
    /// first callback runs; a callback that mutates this store triggers a
    /// nested notification round (no cycle guard).
    fn notify_renter_listeners(&self, uid: &str) {
        let rows: Vec<Renter> = locked(&self.renters_by_uid)
            .get(uid)
            .cloned()
            .unwrap_or_default();
        let listeners = self.renter_listeners.snapshot_for(&uid.to_string());
        log::debug!(
            "renters[{}]: notifying {} listener(s) over {} row(s)",
            uid,
            listeners.len(),
            rows.len()
        );
        for listener in listeners {
            let snapshot: Vec<Renter> = rows
                .iter()
                .filter(|renter| listener.filter.matches(renter))
                .cloned()
                .collect();
            (listener.on_change)(snapshot);
        }
    }

    fn reminder_events_for_month(&self, uid: &str, month: &str) -> Vec<RenterEvent> {
        locked(&self.events_by_uid)
            .get(uid)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| {
                        event.user_uid == uid
                            && event.kind == EventKind::ReminderMarkedSent
                            && event.month_key == month
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn notify_reminder_listeners(&self, uid: &str) {
        let listeners = self.reminder_listeners.snapshot_for(&uid.to_string());
        for listener in listeners {
            (listener.on_change)(self.reminder_events_for_month(uid, &listener.month_key));
        }
    }

    fn set_status(&self, uid: &str, renter_id: &str, status: RenterStatus) -> DomainResult<()> {
        {
            let mut map = locked(&self.renters_by_uid);
            let rows = map.entry(uid.to_string()).or_default();
            let Some(index) = index_of(rows, &renter_id.to_string()) else {
                return Err(DomainError::NotFound("Renter not found.".into()));
            };
            rows[index].status = status;
            rows[index].updated_at = Utc::now();
        }
        self.notify_renter_listeners(uid);
        Ok(())
    }
}

impl Default for InMemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenterStore for InMemoryDb {
    fn listen(&self, uid: &str, filter: RenterFilter, on_change: RenterCallback) -> Subscription {
        let sub = self
            .renter_listeners
            .insert(uid.to_string(), Arc::new(RenterListener { filter, on_change }));
        // Registration re-broadcasts to every listener of the uid; the new
        // listener gets its immediate first delivery this way.
        self.notify_renter_listeners(uid);
        sub
    }

    async fn list(&self, uid: &str) -> DomainResult<Vec<Renter>> {
        Ok(locked(&self.renters_by_uid)
            .get(uid)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, uid: &str, draft: RenterDraft) -> DomainResult<Renter> {
        let renter = Renter {
            id: self.next_id("r"),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            status: RenterStatus::Active,
            monthly_rent: draft.monthly_rent,
            due_day_of_month: draft.due_day_of_month,
            color: None,
            grade_score: None,
            grade_letter: None,
            updated_at: Utc::now(),
        };
        locked(&self.renters_by_uid)
            .entry(uid.to_string())
            .or_default()
            .push(renter.clone());
        log::debug!("renters[{}]: created {}", uid, renter.id);
        self.notify_renter_listeners(uid);
        Ok(renter)
    }

    async fn save(&self, uid: &str, renter: Renter) -> DomainResult<Renter> {
        let saved = Renter {
            updated_at: Utc::now(),
            ..renter
        };
        {
            let mut map = locked(&self.renters_by_uid);
            let rows = map.entry(uid.to_string()).or_default();
            match index_of(rows, &saved.id) {
                Some(index) => rows[index] = saved.clone(),
                None => rows.push(saved.clone()),
            }
        }
        self.notify_renter_listeners(uid);
        Ok(saved)
    }

    async fn archive(&self, uid: &str, renter_id: &str) -> DomainResult<()> {
        self.set_status(uid, renter_id, RenterStatus::Archived)
    }

    async fn restore(&self, uid: &str, renter_id: &str) -> DomainResult<()> {
        self.set_status(uid, renter_id, RenterStatus::Active)
    }

    async fn permanently_delete(&self, uid: &str, renter_id: &str) -> DomainResult<PurgeOutcome> {
        // 1) the renter's events, in bounded batches
        let mut events_deleted = 0;
        {
            let mut map = locked(&self.events_by_uid);
            if let Some(events) = map.get_mut(uid) {
                loop {
                    let batch: Vec<String> = events
                        .iter()
                        .filter(|event| event.renter_id == renter_id)
                        .take(DELETE_CHUNK)
                        .map(|event| event.id.clone())
                        .collect();
                    if batch.is_empty() {
                        break;
                    }
                    for id in batch {
                        if let Some(index) = index_of(events, &id) {
                            events.remove(index);
                            events_deleted += 1;
                        }
                    }
                }
            }
        }

        // 2) ledger entries whose renterId matches, same batching
        let mut ledger_deleted = 0;
        {
            let mut map = locked(&self.ledger_by_uid);
            if let Some(entries) = map.get_mut(uid) {
                loop {
                    let batch: Vec<String> = entries
                        .iter()
                        .filter(|entry| entry.renter_id == renter_id)
                        .take(DELETE_CHUNK)
                        .map(|entry| entry.id.clone())
                        .collect();
                    if batch.is_empty() {
                        break;
                    }
                    for id in batch {
                        if let Some(index) = index_of(entries, &id) {
                            entries.remove(index);
                            ledger_deleted += 1;
                        }
                    }
                }
            }
        }

        // 3) the renter record itself
        let renter_deleted = {
            let mut map = locked(&self.renters_by_uid);
            match map.get_mut(uid) {
                Some(rows) => match index_of(rows, &renter_id.to_string()) {
                    Some(index) => {
                        rows.remove(index);
                        true
                    }
                    None => false,
                },
                None => false,
            }
        };

        log::debug!(
            "renters[{}]: purged {} ({} event(s), {} ledger entr(ies))",
            uid,
            renter_id,
            events_deleted,
            ledger_deleted
        );

        // Renter listeners first, then reminder listeners, so dependent UI
        // drops stale references in one turn.
        self.notify_renter_listeners(uid);
        self.notify_reminder_listeners(uid);

        Ok(PurgeOutcome {
            renter_deleted,
            events_deleted,
            ledger_deleted,
        })
    }
}

#[async_trait]
impl LedgerStore for InMemoryDb {
    async fn list_for_renter(&self, uid: &str, renter_id: &str) -> DomainResult<Vec<LedgerEntry>> {
        Ok(locked(&self.ledger_by_uid)
            .get(uid)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.renter_id == renter_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn add(&self, uid: &str, draft: LedgerDraft) -> DomainResult<LedgerEntry> {
        let entry = LedgerEntry {
            id: self.next_id("led"),
            renter_id: draft.renter_id,
            amount: draft.amount,
            method: draft.method,
            note: draft.note,
            date: draft.date,
        };
        locked(&self.ledger_by_uid)
            .entry(uid.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }
}

#[async_trait]
impl EventStore for InMemoryDb {
    fn listen_reminders_for_month(
        &self,
        uid: &str,
        month: &str,
        on_change: ReminderCallback,
    ) -> Subscription {
        let listener = Arc::new(ReminderListener {
            month_key: month.to_string(),
            on_change,
        });
        let sub = self
            .reminder_listeners
            .insert(uid.to_string(), Arc::clone(&listener));
        // Immediate first delivery goes to the new listener only.
        (listener.on_change)(self.reminder_events_for_month(uid, month));
        sub
    }

    async fn log_reminder_sent(
        &self,
        uid: &str,
        renter_id: &str,
        sent_at: Option<DateTime<Utc>>,
    ) -> DomainResult<RenterEvent> {
        let sent_at = sent_at.unwrap_or_else(Utc::now);
        let event = RenterEvent {
            id: self.next_id("evt"),
            user_uid: uid.to_string(),
            renter_id: renter_id.to_string(),
            kind: EventKind::ReminderMarkedSent,
            month_key: month_key(&sent_at),
            sent_at,
            created_at: Utc::now(),
            message: "Marked sent".to_string(),
        };
        locked(&self.events_by_uid)
            .entry(uid.to_string())
            .or_default()
            .push(event.clone());
        self.notify_reminder_listeners(uid);
        Ok(event)
    }

    async fn list_by_renter(&self, uid: &str, renter_id: &str) -> DomainResult<Vec<RenterEvent>> {
        Ok(locked(&self.events_by_uid)
            .get(uid)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| event.renter_id == renter_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl BusinessStore for InMemoryDb {
    async fn profile(&self, uid: &str) -> DomainResult<Option<BusinessProfile>> {
        Ok(locked(&self.businesses_by_uid).get(uid).cloned())
    }

    async fn create_profile(
        &self,
        uid: &str,
        input: BusinessProfileInput,
    ) -> DomainResult<BusinessProfile> {
        let profile = input.into_profile(uid, Utc::now());
        locked(&self.businesses_by_uid).insert(uid.to_string(), profile.clone());
        Ok(profile)
    }
}
