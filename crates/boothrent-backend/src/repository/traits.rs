//! Repository Layer - Contract Traits
//!
//! One explicit contract both the in-memory store and a real document
//! backend satisfy, so the application swaps implementations at compile
//! time instead of relying on shape parity.
//!
//! The runtime is one logical thread, but the traits are `Send + Sync` so
//! implementations slot into a thread-safe reactive UI layer unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::listeners::Subscription;
use crate::domain::{
    BusinessProfile, BusinessProfileInput, DomainResult, LedgerDraft, LedgerEntry, Renter,
    RenterDraft, RenterEvent, RenterStatus,
};

/// Live-query callback: receives a freshly copied result set, never a diff.
pub type RenterCallback = Arc<dyn Fn(Vec<Renter>) + Send + Sync>;
pub type ReminderCallback = Arc<dyn Fn(Vec<RenterEvent>) + Send + Sync>;

/// Optional status-equality filter for renter live queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenterFilter {
    pub status: Option<RenterStatus>,
}

impl RenterFilter {
    pub fn active() -> Self {
        RenterFilter {
            status: Some(RenterStatus::Active),
        }
    }

    pub fn archived() -> Self {
        RenterFilter {
            status: Some(RenterStatus::Archived),
        }
    }

    /// No filter: every renter of the uid matches.
    pub fn any() -> Self {
        RenterFilter::default()
    }

    pub fn matches(&self, renter: &Renter) -> bool {
        match self.status {
            Some(status) => renter.status == status,
            None => true,
        }
    }
}

/// Counts reported by a cascading permanent delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgeOutcome {
    pub renter_deleted: bool,
    pub events_deleted: usize,
    pub ledger_deleted: usize,
}

/// Renter collection of one owning uid.
#[async_trait]
pub trait RenterStore: Send + Sync {
    /// Registers a live query over the uid's renters. `on_change` fires
    /// immediately with the current matching set and again after every
    /// mutation affecting that uid.
    fn listen(&self, uid: &str, filter: RenterFilter, on_change: RenterCallback) -> Subscription;

    /// One-shot defensive-copied snapshot of every renter of the uid.
    async fn list(&self, uid: &str) -> DomainResult<Vec<Renter>>;

    /// Creates a renter: assigns the id, defaults status to active, stamps
    /// the timestamp, and notifies renter listeners.
    async fn create(&self, uid: &str, draft: RenterDraft) -> DomainResult<Renter>;

    /// Upsert by id: replaces an existing record or appends a new one, and
    /// stamps the timestamp either way.
    async fn save(&self, uid: &str, renter: Renter) -> DomainResult<Renter>;

    async fn archive(&self, uid: &str, renter_id: &str) -> DomainResult<()>;

    async fn restore(&self, uid: &str, renter_id: &str) -> DomainResult<()>;

    /// Cascading hard delete: the renter's events, its ledger entries, then
    /// the renter record itself. Atomic from the caller's point of view.
    async fn permanently_delete(&self, uid: &str, renter_id: &str) -> DomainResult<PurgeOutcome>;
}

/// Payment ledger of one owning uid.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn list_for_renter(&self, uid: &str, renter_id: &str) -> DomainResult<Vec<LedgerEntry>>;

    async fn add(&self, uid: &str, draft: LedgerDraft) -> DomainResult<LedgerEntry>;
}

/// Renter-scoped activity events of one owning uid.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Live query filtered by uid + month key + reminder kind; immediate
    /// first delivery.
    fn listen_reminders_for_month(
        &self,
        uid: &str,
        month_key: &str,
        on_change: ReminderCallback,
    ) -> Subscription;

    /// Appends a "reminder marked sent" event (default `sent_at` = now) and
    /// notifies the uid's reminder-month listeners.
    async fn log_reminder_sent(
        &self,
        uid: &str,
        renter_id: &str,
        sent_at: Option<DateTime<Utc>>,
    ) -> DomainResult<RenterEvent>;

    async fn list_by_renter(&self, uid: &str, renter_id: &str) -> DomainResult<Vec<RenterEvent>>;
}

/// Business profile documents, keyed by uid.
#[async_trait]
pub trait BusinessStore: Send + Sync {
    async fn profile(&self, uid: &str) -> DomainResult<Option<BusinessProfile>>;

    async fn create_profile(
        &self,
        uid: &str,
        input: BusinessProfileInput,
    ) -> DomainResult<BusinessProfile>;
}

/// The full document-store surface the application programs against.
pub trait CloudStore: RenterStore + LedgerStore + EventStore + BusinessStore {}

impl<T: RenterStore + LedgerStore + EventStore + BusinessStore> CloudStore for T {}
