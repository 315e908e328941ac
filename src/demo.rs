//! Demo tenant seed.
//!
//! Provisions one account plus a small roster of renters with payments
//! spread over the current and previous month, so the app has something to
//! show without a real backend.

use chrono::{Datelike, Months, NaiveDate, Utc};

use boothrent_backend::domain::{LedgerEntry, Renter, RenterStatus};
use boothrent_backend::repository::{InMemoryDb, SeedData};

pub const DEMO_UID: &str = "u_demo";
pub const DEMO_EMAIL: &str = "demo@boothrent.app";
pub const DEMO_PASSWORD: &str = "booth-rent";

#[allow(clippy::too_many_arguments)]
fn renter(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    rent: f64,
    due_day: u8,
    color: &str,
    grade_score: u32,
    grade_letter: &str,
) -> Renter {
    Renter {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        status: RenterStatus::Active,
        monthly_rent: rent,
        due_day_of_month: due_day,
        color: Some(color.to_string()),
        grade_score: Some(grade_score),
        grade_letter: Some(grade_letter.to_string()),
        updated_at: Utc::now(),
    }
}

fn payment(
    id: &str,
    renter_id: &str,
    amount: f64,
    method: &str,
    note: &str,
    date: NaiveDate,
) -> LedgerEntry {
    LedgerEntry {
        id: id.to_string(),
        renter_id: renter_id.to_string(),
        amount,
        method: method.to_string(),
        note: note.to_string(),
        date,
    }
}

pub fn seed(db: &InMemoryDb) {
    let today = Utc::now().date_naive();
    let last_month = today.checked_sub_months(Months::new(1)).unwrap_or(today);
    let on_day = |base: NaiveDate, day: u32| base.with_day(day).unwrap_or(base);

    let renters = vec![
        renter(
            "r1",
            "Maya Torres",
            "maya@example.com",
            "(555) 010-1001",
            850.0,
            1,
            "#d5efe2",
            92,
            "A",
        ),
        renter(
            "r2",
            "Jordan Lee",
            "jordan@example.com",
            "(555) 010-2222",
            720.0,
            10,
            "#fde6d5",
            81,
            "B",
        ),
        renter(
            "r3",
            "Avery Patel",
            "avery@example.com",
            "(555) 010-3003",
            930.0,
            18,
            "#e5e2ff",
            75,
            "C",
        ),
    ];

    let ledger = vec![
        payment("led_seed_1", "r1", 300.0, "Card", "First installment", on_day(today, 3)),
        payment("led_seed_2", "r1", 275.0, "Cash App", "Second installment", on_day(today, 12)),
        payment("led_seed_3", "r1", 850.0, "Cash", "Paid in full", on_day(last_month, 1)),
        payment("led_seed_4", "r2", 400.0, "Venmo", "Mid-month payment", on_day(today, 10)),
        payment("led_seed_5", "r2", 720.0, "Card", "", on_day(last_month, 9)),
        payment("led_seed_6", "r3", 930.0, "Zelle", "On time", on_day(last_month, 18)),
    ];

    db.seed_user(
        DEMO_UID,
        SeedData {
            renters,
            events: Vec::new(),
            ledger,
        },
    );
}
