//! Ledger entries: recorded payments against a renter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// One recorded payment. Many-to-one with a renter; removed when the owning
/// renter is permanently deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub renter_id: String,
    pub amount: f64,
    pub method: String,
    pub note: String,
    pub date: NaiveDate,
}

impl Entity for LedgerEntry {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Input for recording a payment; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerDraft {
    pub renter_id: String,
    pub amount: f64,
    pub method: String,
    pub note: String,
    pub date: NaiveDate,
}

/// Buckets entries by `YYYY-MM` month key, newest month first. Entries keep
/// their stored order within a month.
pub fn group_by_month(entries: &[LedgerEntry]) -> Vec<(String, Vec<LedgerEntry>)> {
    let mut groups: Vec<(String, Vec<LedgerEntry>)> = Vec::new();
    for entry in entries {
        let key = entry.date.format("%Y-%m").to_string();
        match groups.iter_mut().find(|(month, _)| *month == key) {
            Some((_, bucket)) => bucket.push(entry.clone()),
            None => groups.push((key, vec![entry.clone()])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| b.cmp(a));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            renter_id: "r1".to_string(),
            amount: 100.0,
            method: "Card".to_string(),
            note: String::new(),
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn groups_by_month_newest_first() {
        let entries = vec![
            entry("led_1", "2026-01-03"),
            entry("led_2", "2026-02-12"),
            entry("led_3", "2026-01-20"),
        ];

        let grouped = group_by_month(&entries);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "2026-02");
        assert_eq!(grouped[1].0, "2026-01");
        assert_eq!(grouped[1].1.len(), 2);
        assert_eq!(grouped[1].1[0].id, "led_1");
    }
}
