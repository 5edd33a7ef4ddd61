// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::models::SaveOutcome;
use daybook::reconcile::{self, CONFIRM_UPDATE};
use daybook::sanitize::{Field, FormFields, ValidationError};
use daybook::store::{ExpenseStore, MemoryStore, SqliteStore};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn form(milk: &str, bread: &str, online: &str, cash: &str, material: &str) -> FormFields {
    FormFields {
        milk: milk.into(),
        bread: bread.into(),
        online_payment: online.into(),
        cash_payment: cash.into(),
        material: material.into(),
    }
}

fn memory_store() -> ExpenseStore {
    ExpenseStore::new(Box::new(MemoryStore::new()))
}

#[test]
fn save_creates_when_date_is_new() {
    let mut store = memory_store();
    let mut records = Vec::new();
    let mut asked = false;
    let outcome = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "20", "100", "50", "5"),
        &mut |_| {
            asked = true;
            true
        },
    )
    .unwrap();

    assert!(!asked);
    let SaveOutcome::Created(id) = outcome else {
        panic!("expected a create, got {:?}", outcome);
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some(id.as_str()));
    assert_eq!(records[0].total, Decimal::from(150));

    let stored = store.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, date("2024-03-15"));
    assert_eq!(stored[0].total, Decimal::from(150));
}

#[test]
fn new_record_is_prepended() {
    let mut store = memory_store();
    let mut records = Vec::new();
    for d in ["2024-03-14", "2024-03-15"] {
        reconcile::save(
            &mut store,
            &mut records,
            date(d),
            &form("1", "1", "1", "1", "1"),
            &mut |_| true,
        )
        .unwrap();
    }
    assert_eq!(records[0].date, date("2024-03-15"));
    assert_eq!(records[1].date, date("2024-03-14"));
}

#[test]
fn confirmed_save_updates_in_place() {
    let mut store = memory_store();
    let mut records = Vec::new();
    reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "20", "100", "50", "5"),
        &mut |_| true,
    )
    .unwrap();
    let original_id = records[0].id.clone().unwrap();

    let mut prompt = String::new();
    let outcome = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("11", "21", "200", "25", "6"),
        &mut |msg| {
            prompt = msg.to_string();
            true
        },
    )
    .unwrap();

    assert_eq!(prompt, CONFIRM_UPDATE);
    assert_eq!(outcome, SaveOutcome::Updated(original_id.clone()));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some(original_id.as_str()));
    assert_eq!(records[0].milk, Decimal::from(11));
    assert_eq!(records[0].total, Decimal::from(225));

    let stored = store.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], records[0]);
}

#[test]
fn declined_save_changes_nothing() {
    let mut store = memory_store();
    let mut records = Vec::new();
    reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "20", "100", "50", "5"),
        &mut |_| true,
    )
    .unwrap();
    let before = records.clone();

    let outcome = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("99", "99", "99", "99", "99"),
        &mut |_| false,
    )
    .unwrap();

    assert_eq!(outcome, SaveOutcome::Declined);
    assert_eq!(records, before);
    assert_eq!(store.list().unwrap(), before);
}

#[test]
fn invalid_field_blocks_any_store_call() {
    let mut store = memory_store();
    let mut records = Vec::new();
    let err = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "2.5", "100", "50", "5"),
        &mut |_| true,
    )
    .unwrap_err();

    let v = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(v.field, Field::Bread);
    assert!(records.is_empty());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn local_record_without_id_is_an_error() {
    let mut store = memory_store();
    let fields = form("1", "1", "1", "1", "1").validate().unwrap();
    let mut records = vec![daybook::models::ExpenseRecord::new(date("2024-03-15"), &fields)];
    let res = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("2", "2", "2", "2", "2"),
        &mut |_| true,
    );
    assert!(res.is_err());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn sqlite_store_round_trips_through_save() {
    let conn = daybook::db::open_in_memory().unwrap();
    let mut store = ExpenseStore::new(Box::new(SqliteStore::new(conn)));
    let mut records = store.list().unwrap();
    reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "20", "100", "50", "5"),
        &mut |_| true,
    )
    .unwrap();
    reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("10", "20", "300", "0", "5"),
        &mut |_| true,
    )
    .unwrap();

    let stored = store.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, records[0].id);
    assert_eq!(format!("{:.2}", stored[0].total), "300.00");
}

#[test]
fn save_rejects_overflowing_total() {
    let mut store = memory_store();
    let mut records = Vec::new();
    let err = reconcile::save(
        &mut store,
        &mut records,
        date("2024-03-15"),
        &form("1", "1", "79228162514264337593543950335", "1", "1"),
        &mut |_| true,
    )
    .unwrap_err();

    let v = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(v.field, Field::CashPayment);
    assert!(records.is_empty());
    assert!(store.list().unwrap().is_empty());
}
