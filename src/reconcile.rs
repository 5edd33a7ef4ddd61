// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::models::{ExpenseRecord, SaveOutcome};
use crate::sanitize::FormFields;
use crate::store::ExpenseStore;

pub const CONFIRM_UPDATE: &str =
    "Expense data already exists for this date. Do you want to update it?";

/// Create-or-update for a single date.
///
/// `records` is the locally fetched snapshot; it is kept in step with the
/// store on success. A record added to the store by someone else after that
/// snapshot was taken is not seen here.
pub fn save(
    store: &mut ExpenseStore,
    records: &mut Vec<ExpenseRecord>,
    date: NaiveDate,
    form: &FormFields,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<SaveOutcome> {
    let fields = form.validate().map_err(|e| {
        warn!(field = %e.field, "rejected non-numeric input");
        e
    })?;

    if let Some(pos) = records.iter().position(|r| r.date == date) {
        if !confirm(CONFIRM_UPDATE) {
            info!(%date, "update declined");
            return Ok(SaveOutcome::Declined);
        }
        let id = records[pos]
            .id
            .clone()
            .with_context(|| format!("Local record for {} has no store id", date))?;
        store.update(&id, &fields)?;
        records[pos].apply(&fields);
        info!(%date, id = %id, total = %fields.total(), "updated expense");
        return Ok(SaveOutcome::Updated(id));
    }

    let mut record = ExpenseRecord::new(date, &fields);
    let id = store.create(&record)?;
    record.id = Some(id.clone());
    records.insert(0, record);
    info!(%date, id = %id, total = %fields.total(), "created expense");
    Ok(SaveOutcome::Created(id))
}
