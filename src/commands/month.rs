// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::aggregate;
use crate::models::MonthlySummary;
use crate::store::ExpenseStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;

pub fn handle(store: &ExpenseStore, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let summary = compute(store, sub, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        println!("Monthly expense {} .. {}", summary.start, summary.end);
        println!("{}", summary_table(&summary));
    }
    Ok(())
}

pub fn compute(
    store: &ExpenseStore,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<MonthlySummary> {
    let as_of = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let records = store.list()?;
    Ok(aggregate(&records, as_of))
}

pub fn summary_rows(s: &MonthlySummary) -> Vec<Vec<String>> {
    [
        ("Milk", &s.milk),
        ("Bread", &s.bread),
        ("Online Payment", &s.online_payment),
        ("Cash Payment", &s.cash_payment),
        ("Material", &s.material),
        ("Total", &s.total_payment),
        ("Total Material", &s.total_material),
    ]
    .into_iter()
    .map(|(k, v)| vec![k.to_string(), fmt_amount(v)])
    .collect()
}

pub fn summary_table(s: &MonthlySummary) -> comfy_table::Table {
    pretty_table(&["Item", "Amount"], summary_rows(s))
}
