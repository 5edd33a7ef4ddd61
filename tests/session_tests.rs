// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;
use std::io::Cursor;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use daybook::app::App;
use daybook::commands::session;
use daybook::models::SaveOutcome;
use daybook::sanitize::Field;
use daybook::store::{ExpenseStore, MemoryStore};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
}

fn app() -> App {
    App::load(ExpenseStore::new(Box::new(MemoryStore::new())), today()).unwrap()
}

fn run_script(app: &mut App, script: &str, clock: &dyn Fn() -> Instant) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    session::run(app, &mut input, &mut out, today(), clock).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn app_clears_form_after_save_only() {
    let mut app = app();
    assert_eq!(app.state().selected_date, today());
    for f in Field::ALL {
        assert!(app.set_field(f, "5"));
    }
    assert!(matches!(app.save(&mut |_| true).unwrap(), SaveOutcome::Created(_)));
    assert_eq!(app.state().form.milk, "");

    for f in Field::ALL {
        app.set_field(f, "6");
    }
    assert_eq!(app.save(&mut |_| false).unwrap(), SaveOutcome::Declined);
    assert_eq!(app.state().form.milk, "6");
    assert_eq!(app.records().len(), 1);
}

#[test]
fn app_summary_hides_after_display_window() {
    let mut app = app();
    let t0 = Instant::now();
    let (summary, token) = app.calculate_month(today(), t0);
    assert_eq!(summary.records, 0);
    assert!(app.visible_summary().is_some());
    assert!(!app.tick(t0 + Duration::from_secs(60)));
    assert!(app.fire_timer(token));
    assert!(app.visible_summary().is_none());
}

#[test]
fn session_saves_and_updates_with_prompt() {
    let mut app = app();
    let t0 = Instant::now();
    let script = "\
date 2024-02-20
milk 10
bread 2
online 100
cash 50
material 4
save
milk 12
bread 2
online 1
cash 1
material 1
save
y
quit
";
    let out = run_script(&mut app, script, &|| t0);
    assert!(out.contains("Saved."));
    assert!(out.contains("already exists"));
    assert!(out.contains("Updated."));
    assert_eq!(app.records().len(), 1);
    assert_eq!(app.records()[0].milk.to_string(), "12");
}

#[test]
fn session_keeps_value_on_bad_keystroke() {
    let mut app = app();
    let t0 = Instant::now();
    let out = run_script(&mut app, "milk 12\nmilk 12.5\nsave\n", &|| t0);
    assert!(out.contains("keeping '12'"));
    assert_eq!(app.state().form.milk, "12");
    // bread is still empty, so the save is refused
    assert!(out.contains("numeric values"));
    assert!(app.records().is_empty());
}

#[test]
fn session_reports_unknown_command_and_continues() {
    let mut app = app();
    let t0 = Instant::now();
    let out = run_script(&mut app, "eggs 3\ndate 2024-13-01\nhelp\n", &|| t0);
    assert!(out.contains("Unknown command 'eggs'"));
    assert!(out.contains("Invalid date"));
    assert!(out.contains("commands:"));
}

#[test]
fn session_summary_hides_on_next_event_after_two_minutes() {
    let mut app = app();
    let t0 = Instant::now();
    let now = Cell::new(t0);
    let clock = || now.get();

    let mut input = Cursor::new(b"month\nshow\n".to_vec());
    let mut out = Vec::new();
    session::run(&mut app, &mut input, &mut out, today(), &clock).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Monthly expense 2024-02-11 .. 2024-03-10"));
    assert!(app.visible_summary().is_some());

    now.set(t0 + Duration::from_secs(121));
    let mut input = Cursor::new(b"show\n".to_vec());
    let mut out = Vec::new();
    session::run(&mut app, &mut input, &mut out, today(), &clock).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("(monthly summary hidden)"));
    assert!(!text.contains("Monthly expense"));
}

#[test]
fn ask_accepts_only_yes() {
    let mut out = Vec::new();
    for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        assert_eq!(daybook::utils::ask(&mut input, &mut out, "Update?"), expected, "{:?}", answer);
    }
    assert!(String::from_utf8(out).unwrap().starts_with("Update? [y/N] "));
}
