use chrono::NaiveDate;
use fincast::api::api_set_budget;
use fincast::{ledger_warnings, CategoryService, CoreError, TransactionService};
use fincast_domain::{Ledger, DEFAULT_CATEGORY};
use rust_decimal_macros::dec;

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ledger_with_food_activity() -> Ledger {
    let mut ledger = Ledger::with_default_categories("Cascade");
    TransactionService::add_expense(
        &mut ledger,
        dec!(45.20),
        sample_date(2024, 5, 3),
        "Food",
        Some("corner deli".into()),
    )
    .unwrap();
    api_set_budget(&mut ledger, "Food", "2024-05", dec!(200)).unwrap();
    ledger
}

#[test]
fn delete_reassigns_every_reference_to_other() {
    let mut ledger = ledger_with_food_activity();
    let food = ledger.category_by_name("Food").unwrap().id;

    CategoryService::remove(&mut ledger, food).unwrap();

    assert!(ledger.category_by_name("Food").is_none());
    assert!(ledger
        .transactions
        .iter()
        .all(|txn| txn.category.as_deref() == Some(DEFAULT_CATEGORY)));
    assert!(ledger
        .budgets
        .iter()
        .all(|budget| budget.category == DEFAULT_CATEGORY));
    assert!(ledger
        .hints
        .iter()
        .all(|hint| hint.category == DEFAULT_CATEGORY));
    // The cascade leaves no dangling reference behind.
    assert!(ledger_warnings(&ledger).is_empty());
}

#[test]
fn the_default_category_is_undeletable() {
    let mut ledger = ledger_with_food_activity();
    let other = ledger.category_by_name(DEFAULT_CATEGORY).unwrap().id;
    let err = CategoryService::remove(&mut ledger, other).expect_err("undeletable");
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(ledger.category_by_name(DEFAULT_CATEGORY).is_some());
}

#[test]
fn rename_preserves_id_and_cascades() {
    let mut ledger = ledger_with_food_activity();
    let food = ledger.category_by_name("Food").unwrap().id;

    CategoryService::rename(&mut ledger, food, "Groceries").unwrap();

    assert_eq!(ledger.category(food).unwrap().name, "Groceries");
    assert!(ledger
        .transactions
        .iter()
        .all(|txn| txn.category.as_deref() == Some("Groceries")));
    assert!(ledger
        .budgets
        .iter()
        .all(|budget| budget.category == "Groceries"));
    assert!(ledger_warnings(&ledger).is_empty());
}

#[test]
fn suggestions_survive_the_rename() {
    let mut ledger = ledger_with_food_activity();
    let food = ledger.category_by_name("Food").unwrap().id;
    CategoryService::rename(&mut ledger, food, "Groceries").unwrap();

    let suggestion = CategoryService::suggest(&ledger, "corner deli").unwrap();
    assert_eq!(suggestion.category, "Groceries");
}
