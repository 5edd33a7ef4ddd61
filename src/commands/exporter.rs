// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};

use crate::sanitize::Field;
use crate::store::ExpenseStore;

pub fn handle(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow::anyhow!("--out is required"))?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut records = store.list()?;
    records.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            let mut header = vec!["id", "date"];
            header.extend(Field::ALL.map(Field::key));
            header.push("total");
            wtr.write_record(&header)?;
            for r in &records {
                wtr.write_record([
                    r.id.clone().unwrap_or_default(),
                    r.date.to_string(),
                    r.milk.to_string(),
                    r.bread.to_string(),
                    r.online_payment.to_string(),
                    r.cash_payment.to_string(),
                    r.material.to_string(),
                    r.total.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)?;
        }
    }
    println!("Exported {} entries to {}", records.len(), out);
    Ok(())
}
