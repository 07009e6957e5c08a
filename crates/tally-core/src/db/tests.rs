//! Database tests

use super::*;
use crate::error::Error;
use crate::models::*;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add(db: &Database, day: &str, amount: f64, category: &str, payment: &str) -> i64 {
    db.create_expense(&NewExpense::new(day, amount, category, "", payment))
        .unwrap()
}

#[test]
fn test_in_memory_db() {
    let db = Database::in_memory().unwrap();
    let expenses = db.all_expenses().unwrap();
    assert!(expenses.is_empty());
    assert_eq!(db.count_expenses(&ExpenseFilter::new()).unwrap(), 0);
}

#[test]
fn test_expenses_schema_exists() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let result: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('expenses') WHERE name IN ('id', 'date', 'amount', 'category', 'description', 'payment_method', 'created_at')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(result, 7, "expenses table should have 7 expected columns");
}

#[test]
fn test_create_and_list() {
    let db = Database::in_memory().unwrap();

    let id = db
        .create_expense(&NewExpense::new(
            "2024-01-10",
            12.5,
            "Food & Dining",
            "Lunch",
            "Cash",
        ))
        .unwrap();
    assert!(id > 0);

    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    let expense = &all[0];
    assert_eq!(expense.id, id);
    assert_eq!(expense.date, date(2024, 1, 10));
    assert_eq!(expense.amount, 12.5);
    assert_eq!(expense.category, Category::FoodDining);
    assert_eq!(expense.description, "Lunch");
    assert_eq!(expense.payment_method, PaymentMethod::Cash);
}

#[test]
fn test_create_assigns_unique_ids() {
    let db = Database::in_memory().unwrap();
    let a = add(&db, "2024-01-01", 1.0, "Other", "Cash");
    let b = add(&db, "2024-01-01", 1.0, "Other", "Cash");
    assert_ne!(a, b);
}

#[test]
fn test_create_rejects_invalid_input() {
    let db = Database::in_memory().unwrap();

    let cases = [
        NewExpense::new("2024-01-01", 0.0, "Other", "", "Cash"),
        NewExpense::new("2024-01-01", -5.0, "Other", "", "Cash"),
        NewExpense::new("2024-01-01", f64::NAN, "Other", "", "Cash"),
        NewExpense::new("", 5.0, "Other", "", "Cash"),
        NewExpense::new("01/02/2024", 5.0, "Other", "", "Cash"),
        NewExpense::new("2024-02-30", 5.0, "Other", "", "Cash"),
        NewExpense::new("2024-01-01", 5.0, "Other", "", "  "),
        NewExpense::new("2024-01-01", 5.0, "", "", "Cash"),
    ];

    for case in &cases {
        let result = db.create_expense(case);
        assert!(
            matches!(result, Err(Error::Validation(_))),
            "expected validation error for {:?}",
            case
        );
    }

    assert!(db.all_expenses().unwrap().is_empty());
}

#[test]
fn test_create_canonicalizes_known_labels() {
    let db = Database::in_memory().unwrap();
    add(&db, "2024-01-01", 3.0, "food", "credit_card");

    let conn = db.conn().unwrap();
    let (category, payment): (String, String) = conn
        .query_row(
            "SELECT category, payment_method FROM expenses",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(category, "Food & Dining");
    assert_eq!(payment, "Credit Card");
}

#[test]
fn test_unknown_labels_read_back_as_other() {
    let db = Database::in_memory().unwrap();
    let id = add(&db, "2024-01-01", 3.0, "Pets", "Cheque");

    // Stored verbatim
    let conn = db.conn().unwrap();
    let category: String = conn
        .query_row("SELECT category FROM expenses WHERE id = ?", [id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(category, "Pets");

    let expense = db.require_expense(id).unwrap();
    assert_eq!(expense.category, Category::Other);
    assert_eq!(expense.payment_method, PaymentMethod::Other);
}

#[test]
fn test_other_filter_includes_unknown_labels() {
    let db = Database::in_memory().unwrap();
    add(&db, "2024-01-01", 10.0, "Other", "Cash");
    add(&db, "2024-01-02", 25.0, "Pets", "Cash");
    add(&db, "2024-01-03", 40.0, "Shopping", "Cash");

    let filter = ExpenseFilter::new().category(Some(Category::Other));
    let filtered = db.list_expenses(&filter).unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|e| e.category == Category::Other));
    assert_eq!(db.count_expenses(&filter).unwrap(), 2);

    // Agrees with grouping the whole ledger
    let grouped = crate::analysis::by_category(&db.all_expenses().unwrap());
    let other = grouped[&Category::Other];
    assert_eq!(other.count, filtered.len());
    assert_eq!(other.total, crate::analysis::total_spending(&filtered));

    // Known categories still match only themselves
    let shopping = db
        .list_expenses(&ExpenseFilter::new().category(Some(Category::Shopping)))
        .unwrap();
    assert_eq!(shopping.len(), 1);
    assert_eq!(shopping[0].amount, 40.0);
}

#[test]
fn test_missing_created_at_is_stable() {
    let db = Database::in_memory().unwrap();
    let id = add(&db, "2024-03-05", 8.0, "Shopping", "Cash");
    let bad = add(&db, "2024-03-06", 9.0, "Shopping", "Cash");

    let conn = db.conn().unwrap();
    conn.execute("UPDATE expenses SET created_at = NULL WHERE id = ?", [id])
        .unwrap();
    conn.execute(
        "UPDATE expenses SET created_at = 'not a time' WHERE id = ?",
        [bad],
    )
    .unwrap();
    drop(conn);

    let first = db.require_expense(id).unwrap();
    let second = db.require_expense(id).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.created_at.naive_utc(),
        date(2024, 3, 5).and_hms_opt(0, 0, 0).unwrap()
    );

    let malformed = db.require_expense(bad).unwrap();
    assert_eq!(
        malformed.created_at.naive_utc(),
        date(2024, 3, 6).and_hms_opt(0, 0, 0).unwrap()
    );
}

#[test]
fn test_delete_expense() {
    let db = Database::in_memory().unwrap();
    let keep = add(&db, "2024-01-01", 10.0, "Shopping", "Cash");
    let gone = add(&db, "2024-01-02", 20.0, "Shopping", "Cash");

    assert!(db.delete_expense(gone).unwrap());

    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, keep);
    assert!(db.get_expense(gone).unwrap().is_none());
}

#[test]
fn test_delete_missing_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let id = add(&db, "2024-01-01", 10.0, "Shopping", "Cash");

    assert!(!db.delete_expense(9999).unwrap());
    assert!(db.delete_expense(id).unwrap());
    assert!(!db.delete_expense(id).unwrap());
    assert!(db.all_expenses().unwrap().is_empty());
}

#[test]
fn test_ids_not_reused_after_delete() {
    let db = Database::in_memory().unwrap();
    let first = add(&db, "2024-01-01", 10.0, "Other", "Cash");
    let second = add(&db, "2024-01-02", 10.0, "Other", "Cash");
    db.delete_expense(second).unwrap();

    let third = add(&db, "2024-01-03", 10.0, "Other", "Cash");
    assert!(third > second);
    assert!(third > first);
}

#[test]
fn test_list_order_by_date_then_id() {
    let db = Database::in_memory().unwrap();
    let late = add(&db, "2024-03-01", 1.0, "Other", "Cash");
    let early_a = add(&db, "2024-01-15", 2.0, "Other", "Cash");
    let early_b = add(&db, "2024-01-15", 3.0, "Other", "Cash");
    let middle = add(&db, "2024-02-01", 4.0, "Other", "Cash");

    let ids: Vec<i64> = db.all_expenses().unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![early_a, early_b, middle, late]);
}

#[test]
fn test_list_with_filters() {
    let db = Database::in_memory().unwrap();
    add(&db, "2024-01-05", 10.0, "Food & Dining", "Cash");
    add(&db, "2024-01-20", 20.0, "Shopping", "Cash");
    add(&db, "2024-02-03", 30.0, "Food & Dining", "Debit Card");
    add(&db, "2024-03-10", 40.0, "Food & Dining", "Cash");

    let food = db
        .list_expenses(&ExpenseFilter::new().category(Some(Category::FoodDining)))
        .unwrap();
    assert_eq!(food.len(), 3);

    // Bounds are inclusive
    let range = ExpenseFilter::new().date_range(date(2024, 1, 20), date(2024, 2, 3));
    let in_range = db.list_expenses(&range).unwrap();
    let amounts: Vec<f64> = in_range.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![20.0, 30.0]);

    let food_in_range = db
        .list_expenses(&range.category(Some(Category::FoodDining)))
        .unwrap();
    assert_eq!(food_in_range.len(), 1);
    assert_eq!(food_in_range[0].amount, 30.0);

    let open_ended = db
        .list_expenses(&ExpenseFilter::new().date_from(Some(date(2024, 2, 1))))
        .unwrap();
    assert_eq!(open_ended.len(), 2);

    let until = db
        .list_expenses(&ExpenseFilter::new().date_to(Some(date(2024, 1, 31))))
        .unwrap();
    assert_eq!(until.len(), 2);

    assert_eq!(db.count_expenses(&range).unwrap(), 2);
}

#[test]
fn test_list_with_limit() {
    let db = Database::in_memory().unwrap();
    for day in 1..=5 {
        add(&db, &format!("2024-01-0{}", day), day as f64, "Other", "Cash");
    }

    let limited = db
        .list_expenses(&ExpenseFilter::new().limit(Some(2)))
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].date, date(2024, 1, 1));

    // Count ignores the limit
    assert_eq!(
        db.count_expenses(&ExpenseFilter::new().limit(Some(2)))
            .unwrap(),
        5
    );
}

#[test]
fn test_require_missing_is_not_found() {
    let db = Database::in_memory().unwrap();
    let result = db.require_expense(42);
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ledger.db");

    let id = {
        let db = Database::new(&path).unwrap();
        db.create_expense(&NewExpense::new(
            "2024-05-01",
            99.99,
            "Healthcare",
            "Dentist",
            "Debit Card",
        ))
        .unwrap()
    };

    let reopened = Database::new(&path).unwrap();
    let all = reopened.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, id);
    assert_eq!(all[0].amount, 99.99);
    assert_eq!(all[0].description, "Dentist");
    assert_eq!(all[0].category, Category::Healthcare);
}

#[test]
fn test_reads_survive_added_column() {
    let db = Database::in_memory().unwrap();
    add(&db, "2024-01-01", 5.0, "Other", "Cash");

    let conn = db.conn().unwrap();
    conn.execute("ALTER TABLE expenses ADD COLUMN notes TEXT", [])
        .unwrap();
    drop(conn);

    let all = db.all_expenses().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].amount, 5.0);
}
