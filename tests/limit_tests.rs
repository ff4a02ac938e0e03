use chrono::NaiveDate;
use uuid::Uuid;

use moniflow_core::core::services::{AlertLevel, ExpenseService, LimitService, NewExpense};
use moniflow_core::currency::{Currency, RateTable};
use moniflow_core::domain::{CategoryId, ExpenseBook, ZeroLimitPolicy};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add(book: &mut ExpenseBook, amount: f64, category: &str, day: NaiveDate) -> Uuid {
    ExpenseService::add(
        book,
        &RateTable::default(),
        NewExpense {
            amount,
            currency: Currency::Dop,
            category: CategoryId::new(category),
            date: day,
            time: None,
            description: None,
        },
        day,
    )
    .expect("add expense")
}

#[test]
fn spec_scenario_month_over_limit_is_critical() {
    let today = date(2025, 6, 17);
    let mut book = ExpenseBook::new();
    book.limits.monthly_limit = 100.0;
    add(&mut book, 100.0, "comida", today);
    add(&mut book, 50.0, "transporte", today);

    let status = LimitService::monthly_status(&book, today);
    assert!((status.spent - 150.0).abs() < 1e-9);
    assert_eq!(status.level, AlertLevel::Critical);
    assert!(status.is_over_budget());
    assert!((status.available() + 50.0).abs() < 1e-9);
}

#[test]
fn empty_book_reports_no_alert() {
    let today = date(2025, 6, 17);
    let book = ExpenseBook::new();
    let status = LimitService::monthly_status(&book, today);
    assert_eq!(status.level, AlertLevel::None);
    assert_eq!(status.spent, 0.0);
    assert!(LimitService::alert_message(&status).is_none());
}

#[test]
fn category_statuses_use_individual_caps() {
    let today = date(2025, 6, 17);
    let mut book = ExpenseBook::new();
    // defaults: comida 5000, transporte 2000
    add(&mut book, 4_200.0, "comida", today); // 84% -> Warning
    add(&mut book, 2_500.0, "transporte", today); // 125% -> Critical

    let statuses = LimitService::category_statuses(&book, today);
    let find = |id: &str| {
        statuses
            .iter()
            .find(|entry| entry.category.as_str() == id)
            .unwrap()
    };

    assert_eq!(find("comida").status.level, AlertLevel::Warning);
    assert_eq!(find("transporte").status.level, AlertLevel::Critical);
    assert!((find("transporte").status.available() + 500.0).abs() < 1e-9);
    assert_eq!(find("salud").status.level, AlertLevel::None);
    assert_eq!(find("salud").status.spent, 0.0);
}

#[test]
fn zero_monthly_limit_follows_the_configured_policy() {
    let today = date(2025, 6, 17);
    let mut book = ExpenseBook::new();
    book.limits.monthly_limit = 0.0;
    add(&mut book, 1.0, "comida", today);

    assert_eq!(
        LimitService::monthly_status(&book, today).level,
        AlertLevel::Critical
    );

    book.limits.zero_limit_policy = ZeroLimitPolicy::NoLimit;
    assert_eq!(
        LimitService::monthly_status(&book, today).level,
        AlertLevel::None
    );
}

#[test]
fn alert_message_mentions_spent_and_limit() {
    let today = date(2025, 6, 17);
    let mut book = ExpenseBook::new();
    book.limits.monthly_limit = 1_000.0;
    add(&mut book, 850.0, "comida", today);

    let status = LimitService::monthly_status(&book, today);
    assert_eq!(status.level, AlertLevel::Warning);
    let message = LimitService::alert_message(&status).unwrap();
    assert!(message.contains("RD$ 850.00"));
    assert!(message.contains("RD$ 1,000.00"));
}
