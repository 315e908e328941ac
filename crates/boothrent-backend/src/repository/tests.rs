//! Repository Integration Tests
//!
//! Exercises the in-memory store end to end: live-query notification,
//! uid scoping, status transitions, and the cascading permanent delete.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    use crate::domain::{
        BusinessProfileInput, DomainError, EventKind, LedgerDraft, LedgerEntry, Renter,
        RenterDraft, RenterEvent, RenterStatus,
    };
    use crate::repository::{
        locked, BusinessStore, EventStore, InMemoryDb, LedgerStore, RenterFilter, RenterStore,
        SeedData,
    };

    fn renter(id: &str, name: &str, rent: f64, due_day: u8) -> Renter {
        Renter {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone: "(555) 010-1001".to_string(),
            status: RenterStatus::Active,
            monthly_rent: rent,
            due_day_of_month: due_day,
            color: None,
            grade_score: None,
            grade_letter: None,
            updated_at: Utc::now(),
        }
    }

    fn ledger_entry(id: &str, renter_id: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            renter_id: renter_id.to_string(),
            amount,
            method: "Card".to_string(),
            note: String::new(),
            date: "2026-01-05".parse().unwrap(),
        }
    }

    fn reminder_event(id: &str, uid: &str, renter_id: &str, month: &str) -> RenterEvent {
        let sent_at = Utc::now();
        RenterEvent {
            id: id.to_string(),
            user_uid: uid.to_string(),
            renter_id: renter_id.to_string(),
            kind: EventKind::ReminderMarkedSent,
            month_key: month.to_string(),
            sent_at,
            created_at: sent_at,
            message: "Marked sent".to_string(),
        }
    }

    fn draft(name: &str) -> RenterDraft {
        RenterDraft {
            name: name.to_string(),
            email: String::new(),
            phone: String::new(),
            monthly_rent: 500.0,
            due_day_of_month: 1,
        }
    }

    type Deliveries = Arc<Mutex<Vec<Vec<Renter>>>>;

    fn watch_renters(db: &InMemoryDb, uid: &str, filter: RenterFilter) -> Deliveries {
        let deliveries: Deliveries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&deliveries);
        // The handle is dropped on purpose: dropping never unsubscribes.
        let _ = db.listen(uid, filter, Arc::new(move |rows| locked(&sink).push(rows)));
        deliveries
    }

    #[tokio::test]
    async fn active_filter_never_delivers_non_active_renters() {
        let db = InMemoryDb::new();
        let mut archived = renter("r2", "Jordan Lee", 720.0, 10);
        archived.status = RenterStatus::Archived;
        db.seed_user(
            "u1",
            SeedData {
                renters: vec![renter("r1", "Maya Torres", 850.0, 1), archived],
                ..SeedData::default()
            },
        );

        let deliveries = watch_renters(&db, "u1", RenterFilter::active());
        db.create("u1", draft("Avery Patel")).await.unwrap();
        db.archive("u1", "r1").await.unwrap();
        db.restore("u1", "r1").await.unwrap();

        let deliveries = locked(&deliveries);
        assert!(deliveries.len() >= 4);
        for rows in deliveries.iter() {
            assert!(rows.iter().all(|r| r.status == RenterStatus::Active));
        }
        // First delivery is the current matching set at registration time.
        assert_eq!(deliveries[0].len(), 1);
        assert_eq!(deliveries[0][0].id, "r1");
    }

    #[tokio::test]
    async fn archive_then_restore_round_trip() {
        let db = InMemoryDb::new();
        db.seed_user(
            "u1",
            SeedData {
                renters: vec![renter("r1", "Maya Torres", 850.0, 1)],
                ..SeedData::default()
            },
        );

        db.restore("u1", "r1").await.unwrap();
        db.archive("u1", "r1").await.unwrap();

        let active = watch_renters(&db, "u1", RenterFilter::active());
        assert_eq!(locked(&active)[0].len(), 0);

        let all = watch_renters(&db, "u1", RenterFilter::any());
        let all = locked(&all);
        let first = &all[0];
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "r1");
        assert_eq!(first[0].status, RenterStatus::Archived);
        assert_eq!(first[0].monthly_rent, 850.0);
    }

    #[tokio::test]
    async fn missing_renter_is_a_structured_error_not_a_panic() {
        let db = InMemoryDb::new();

        let err = db.archive("u1", "nope").await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("Renter not found.".into()));
        assert_eq!(err.message(), "Renter not found.");

        let err = db.restore("u1", "nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        // The cascade reports absence through the outcome flag instead.
        let outcome = db.permanently_delete("u1", "nope").await.unwrap();
        assert!(!outcome.renter_deleted);
        assert_eq!(outcome.events_deleted, 0);
        assert_eq!(outcome.ledger_deleted, 0);
    }

    #[tokio::test]
    async fn permanent_delete_cascades_to_events_and_ledger() {
        let db = InMemoryDb::new();
        db.seed_user(
            "u1",
            SeedData {
                renters: vec![
                    renter("r1", "Maya Torres", 850.0, 1),
                    renter("r2", "Jordan Lee", 720.0, 10),
                ],
                events: vec![
                    reminder_event("evt_a", "u1", "r1", "2026-01"),
                    reminder_event("evt_b", "u1", "r1", "2026-02"),
                    reminder_event("evt_c", "u1", "r2", "2026-02"),
                ],
                ledger: vec![
                    ledger_entry("led_a", "r1", 300.0),
                    ledger_entry("led_b", "r1", 275.0),
                    ledger_entry("led_c", "r2", 400.0),
                ],
            },
        );

        let outcome = db.permanently_delete("u1", "r1").await.unwrap();
        assert!(outcome.renter_deleted);
        assert_eq!(outcome.events_deleted, 2);
        assert_eq!(outcome.ledger_deleted, 2);

        assert!(db.list_by_renter("u1", "r1").await.unwrap().is_empty());
        assert!(db.list_for_renter("u1", "r1").await.unwrap().is_empty());

        // The sibling renter's records are untouched.
        assert_eq!(db.list_by_renter("u1", "r2").await.unwrap().len(), 1);
        assert_eq!(db.list_for_renter("u1", "r2").await.unwrap().len(), 1);
        let remaining = db.list("u1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "r2");
    }

    #[tokio::test]
    async fn permanent_delete_counts_survive_batching() {
        // More records than one internal batch, so the loops run twice.
        let db = InMemoryDb::new();
        let events = (0..205)
            .map(|n| reminder_event(&format!("evt_{}", n), "u1", "r1", "2026-01"))
            .collect();
        let ledger = (0..203)
            .map(|n| ledger_entry(&format!("led_{}", n), "r1", 10.0))
            .collect();
        db.seed_user(
            "u1",
            SeedData {
                renters: vec![renter("r1", "Maya Torres", 850.0, 1)],
                events,
                ledger,
            },
        );

        let outcome = db.permanently_delete("u1", "r1").await.unwrap();
        assert!(outcome.renter_deleted);
        assert_eq!(outcome.events_deleted, 205);
        assert_eq!(outcome.ledger_deleted, 203);
        assert!(db.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn permanent_delete_notifies_renter_and_reminder_listeners() {
        let db = InMemoryDb::new();
        db.seed_user(
            "u1",
            SeedData {
                renters: vec![renter("r1", "Maya Torres", 850.0, 1)],
                events: vec![reminder_event("evt_a", "u1", "r1", "2026-02")],
                ..SeedData::default()
            },
        );

        let renter_rows = watch_renters(&db, "u1", RenterFilter::any());
        let reminder_rows: Arc<Mutex<Vec<Vec<RenterEvent>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reminder_rows);
        let _ = db.listen_reminders_for_month(
            "u1",
            "2026-02",
            Arc::new(move |events| locked(&sink).push(events)),
        );
        assert_eq!(locked(&reminder_rows)[0].len(), 1);

        db.permanently_delete("u1", "r1").await.unwrap();

        assert!(locked(&renter_rows).last().unwrap().is_empty());
        assert!(locked(&reminder_rows).last().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reminder_listener_is_scoped_to_month_and_kind() {
        let db = InMemoryDb::new();
        let sent_at = Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap();
        let logged = db
            .log_reminder_sent("u1", "r1", Some(sent_at))
            .await
            .unwrap();
        assert_eq!(logged.month_key, "2026-02");
        assert_eq!(logged.message, "Marked sent");

        let february: Arc<Mutex<Vec<Vec<RenterEvent>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&february);
        let _ = db.listen_reminders_for_month(
            "u1",
            "2026-02",
            Arc::new(move |events| locked(&sink).push(events)),
        );

        let february = locked(&february);
        let first = &february[0];
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind, EventKind::ReminderMarkedSent);
        assert_eq!(first[0].renter_id, "r1");

        let march: Arc<Mutex<Vec<Vec<RenterEvent>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&march);
        let _ = db.listen_reminders_for_month(
            "u1",
            "2026-03",
            Arc::new(move |events| locked(&sink).push(events)),
        );
        assert!(locked(&march)[0].is_empty());
    }

    #[tokio::test]
    async fn notifications_never_cross_the_uid_boundary() {
        let db = InMemoryDb::new();
        let u1_rows = watch_renters(&db, "u1", RenterFilter::any());
        let u2_rows = watch_renters(&db, "u2", RenterFilter::any());
        assert_eq!(locked(&u1_rows).len(), 1);
        assert_eq!(locked(&u2_rows).len(), 1);

        db.create("u1", draft("Maya Torres")).await.unwrap();

        assert_eq!(locked(&u1_rows).len(), 2);
        assert_eq!(locked(&u2_rows).len(), 1, "u2 must not hear about u1");
        assert!(locked(&u2_rows)[0].is_empty());
    }

    #[tokio::test]
    async fn unsubscribe_detaches_one_listener_without_touching_others() {
        let db = InMemoryDb::new();
        let first: Deliveries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&first);
        let sub = db.listen(
            "u1",
            RenterFilter::any(),
            Arc::new(move |rows| locked(&sink).push(rows)),
        );
        let second = watch_renters(&db, "u1", RenterFilter::any());

        // Registering the second listener re-broadcast to the first.
        assert_eq!(locked(&first).len(), 2);

        sub.unsubscribe();
        db.create("u1", draft("Maya Torres")).await.unwrap();

        assert_eq!(locked(&first).len(), 2, "detached listener stays silent");
        assert_eq!(locked(&second).len(), 2);
        assert_eq!(locked(&second).last().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_assigns_ids_and_defaults() {
        let db = InMemoryDb::new();
        let created = db.create("u1", draft("Maya Torres")).await.unwrap();
        assert!(created.id.starts_with("r_"));
        assert_eq!(created.status, RenterStatus::Active);

        let again = db.create("u1", draft("Jordan Lee")).await.unwrap();
        assert_ne!(created.id, again.id);
    }

    #[tokio::test]
    async fn save_upserts_by_id() {
        let db = InMemoryDb::new();
        let mut created = db.create("u1", draft("Maya Torres")).await.unwrap();

        created.monthly_rent = 900.0;
        created.name = "Maya T.".to_string();
        db.save("u1", created.clone()).await.unwrap();

        let rows = db.list("u1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].monthly_rent, 900.0);
        assert_eq!(rows[0].name, "Maya T.");

        // Unknown id appends instead.
        let fresh = renter("imported", "Avery Patel", 930.0, 18);
        db.save("u1", fresh).await.unwrap();
        assert_eq!(db.list("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ledger_add_and_snapshot() {
        let db = InMemoryDb::new();
        let entry = db
            .add(
                "u1",
                LedgerDraft {
                    renter_id: "r1".to_string(),
                    amount: 300.0,
                    method: "Cash App".to_string(),
                    note: "First installment".to_string(),
                    date: "2026-02-03".parse().unwrap(),
                },
            )
            .await
            .unwrap();
        assert!(entry.id.starts_with("led_"));

        let entries = db.list_for_renter("u1", "r1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].method, "Cash App");
        assert!(db.list_for_renter("u1", "r2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn business_profile_round_trip() {
        let db = InMemoryDb::new();
        assert!(db.profile("u1").await.unwrap().is_none());

        db.create_profile(
            "u1",
            BusinessProfileInput {
                business_name: "Shear Luck Studio".to_string(),
                phone: "(555) 010-0000".to_string(),
                ..BusinessProfileInput::default()
            },
        )
        .await
        .unwrap();

        let profile = db.profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.business_name, "Shear Luck Studio");
        assert_eq!(profile.owner_uid, "u1");
        assert!(!profile.members_enabled);
    }

    #[test]
    fn wire_shapes_match_the_cloud_document_layout() {
        let value = serde_json::to_value(renter("r1", "Maya Torres", 850.0, 1)).unwrap();
        assert_eq!(value["status"], "active");
        assert_eq!(value["dueDayOfMonth"], 1);
        assert_eq!(value["monthlyRent"], 850.0);
        assert!(value.get("updatedAt").is_some());

        let value = serde_json::to_value(reminder_event("evt_1", "u1", "r1", "2026-02")).unwrap();
        assert_eq!(value["type"], "reminder_marked_sent");
        assert_eq!(value["monthKey"], "2026-02");
        assert_eq!(value["userUid"], "u1");

        let input = BusinessProfileInput {
            business_name: "Shear Luck Studio".to_string(),
            ..BusinessProfileInput::default()
        };
        let value = serde_json::to_value(input.into_profile("u1", Utc::now())).unwrap();
        assert_eq!(value["businessName"], "Shear Luck Studio");
        assert_eq!(value["ownerUid"], "u1");
        assert_eq!(value["membersEnabled"], false);
        assert!(value.get("logoUrl").is_none());
    }
}
