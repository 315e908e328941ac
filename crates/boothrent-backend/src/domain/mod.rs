//! Domain Layer
//!
//! Entities, validation rules and error types shared by every backend
//! implementation. Everything is keyed by the owning user id (`uid`), the
//! tenancy boundary for the whole system.

mod business;
mod entity;
mod event;
mod ledger;
mod renter;

pub use business::{BusinessProfile, BusinessProfileInput};
pub use entity::{DomainError, DomainResult, Entity};
pub use event::{month_key, EventKind, RenterEvent};
pub use ledger::{group_by_month, LedgerDraft, LedgerEntry};
pub use renter::{NewRenterInput, Renter, RenterDraft, RenterStatus};
