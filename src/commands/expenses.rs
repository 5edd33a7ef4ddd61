// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ExpenseRecord, SaveOutcome};
use crate::reconcile;
use crate::sanitize::FormFields;
use crate::store::ExpenseStore;
use crate::utils::{
    ask, maybe_print_json, parse_date, parse_month, pretty_table, record_row, RECORD_HEADERS,
};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle_add(
    store: &mut ExpenseStore,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let yes = sub.get_flag("yes");
    let mut confirm = |msg: &str| {
        yes || ask(&mut std::io::stdin().lock(), &mut std::io::stdout().lock(), msg)
    };
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?
        .unwrap_or(today);
    match add(store, sub, date, &mut confirm)? {
        SaveOutcome::Created(id) => println!("Saved {} (id {})", date, id),
        SaveOutcome::Updated(id) => println!("Updated {} (id {})", date, id),
        SaveOutcome::Declined => println!("Kept the existing entry for {}", date),
    }
    Ok(())
}

/// Runs one save against a fresh snapshot of the collection.
pub fn add(
    store: &mut ExpenseStore,
    sub: &clap::ArgMatches,
    date: NaiveDate,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<SaveOutcome> {
    let arg = |name: &str| {
        sub.get_one::<String>(name)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let form = FormFields {
        milk: arg("milk"),
        bread: arg("bread"),
        online_payment: arg("online"),
        cash_payment: arg("cash"),
        material: arg("material"),
    };
    let mut records = store.list()?;
    reconcile::save(store, &mut records, date, &form, confirm)
}

pub fn handle_list(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data.iter().map(record_row).collect();
        println!("{}", pretty_table(&RECORD_HEADERS, rows));
    }
    Ok(())
}

pub fn query_rows(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRecord>> {
    let mut data = store.list()?;
    if let Some(month) = sub.get_one::<String>("month") {
        let month = parse_month(month)?;
        data.retain(|r| r.date.format("%Y-%m").to_string() == month);
    }
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
