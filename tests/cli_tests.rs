// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use daybook::commands::{expenses, exporter, month};
use daybook::models::SaveOutcome;
use daybook::store::{ExpenseStore, SqliteStore};
use daybook::{cli, db};
use tempfile::tempdir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> ExpenseStore {
    ExpenseStore::new(Box::new(SqliteStore::new(db::open_in_memory().unwrap())))
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["daybook"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some((_, sub)) => sub.clone(),
        None => panic!("no subcommand parsed"),
    }
}

fn add(store: &mut ExpenseStore, d: &str, online: &str, cash: &str, yes: bool) -> SaveOutcome {
    let m = sub_matches(&[
        "add", "--date", d, "--milk", "10", "--bread", "20", "--online", online, "--cash",
        cash, "--material", "5",
    ]);
    expenses::add(store, &m, date(d), &mut |_| yes).unwrap()
}

#[test]
fn add_creates_then_updates_on_confirm() {
    let mut store = setup();
    assert!(matches!(
        add(&mut store, "2024-03-15", "100", "50", true),
        SaveOutcome::Created(_)
    ));
    assert!(matches!(
        add(&mut store, "2024-03-15", "10", "5", true),
        SaveOutcome::Updated(_)
    ));
    assert_eq!(
        add(&mut store, "2024-03-15", "1", "1", false),
        SaveOutcome::Declined
    );
    let rows = store.list().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(format!("{:.2}", rows[0].total), "15.00");
}

#[test]
fn add_rejects_decimal_input() {
    let mut store = setup();
    let m = sub_matches(&[
        "add", "--milk", "1.5", "--bread", "2", "--online", "3", "--cash", "4", "--material",
        "5",
    ]);
    let err = expenses::add(&mut store, &m, date("2024-03-15"), &mut |_| true).unwrap_err();
    assert!(err.to_string().contains("Milk"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn list_limit_and_month_filters() {
    let mut store = setup();
    for d in ["2024-02-28", "2024-03-01", "2024-03-02", "2024-03-03"] {
        add(&mut store, d, "1", "1", true);
    }
    let rows = expenses::query_rows(&store, &sub_matches(&["list", "--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, date("2024-03-03"));

    let rows =
        expenses::query_rows(&store, &sub_matches(&["list", "--month", "2024-02"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, date("2024-02-28"));

    assert!(expenses::query_rows(&store, &sub_matches(&["list", "--month", "2024-13"])).is_err());
}

#[test]
fn month_uses_as_of_window() {
    let mut store = setup();
    add(&mut store, "2024-02-11", "100", "50", true);
    add(&mut store, "2024-03-11", "100", "50", true);
    let s = month::compute(
        &store,
        &sub_matches(&["month", "--as-of", "2024-02-20"]),
        date("2024-06-01"),
    )
    .unwrap();
    assert_eq!(s.records, 1);
    assert_eq!(format!("{:.2}", s.total_payment), "150.00");
    assert_eq!(month::summary_rows(&s)[5], vec!["Total".to_string(), "150.00".to_string()]);
}

#[test]
fn export_writes_csv_and_json() {
    let mut store = setup();
    add(&mut store, "2024-03-02", "100", "50", true);
    add(&mut store, "2024-03-01", "7", "3", true);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("out.csv");
    let csv_str = csv_path.to_string_lossy().to_string();
    exporter::handle(
        &store,
        &sub_matches(&["export", "--format", "csv", "--out", &csv_str]),
    )
    .unwrap();
    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(recs.len(), 2);
    assert_eq!(&recs[0][1], "2024-03-01");
    assert_eq!(&recs[0][7], "10");

    let json_path = dir.path().join("out.json");
    let json_str = json_path.to_string_lossy().to_string();
    exporter::handle(
        &store,
        &sub_matches(&["export", "--format", "json", "--out", &json_str]),
    )
    .unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1]["date"], "2024-03-02");
    assert_eq!(arr[1]["onlinePayment"], "100");
    assert_eq!(arr[1]["total"], "150");
    assert!(arr[1]["id"].is_string());
}

#[test]
fn export_rejects_unknown_format() {
    let store = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();
    let m = sub_matches(&["export", "--format", "xml", "--out", &out_str]);
    assert!(exporter::handle(&store, &m).is_err());
    assert!(!out_path.exists());
}
