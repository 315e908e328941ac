//! Renter-scoped activity events.
//!
//! Events are bucketed by a derived `YYYY-MM` month key so the UI can watch
//! one calendar month at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Event type tag. Today the only kind is "reminder marked sent"; the enum
/// keeps the wire tag stable if more kinds arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ReminderMarkedSent,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ReminderMarkedSent => "reminder_marked_sent",
        }
    }
}

/// A timestamped activity record scoped to one renter of one uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenterEvent {
    pub id: String,
    pub user_uid: String,
    pub renter_id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub month_key: String,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

impl Entity for RenterEvent {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Derives the `YYYY-MM` month key used to bucket events by calendar month.
pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn month_key_zero_pads_the_month() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 5, 10, 30, 0).unwrap();
        assert_eq!(month_key(&ts), "2026-02");

        let ts = Utc.with_ymd_and_hms(2025, 11, 30, 23, 59, 59).unwrap();
        assert_eq!(month_key(&ts), "2025-11");
    }
}
