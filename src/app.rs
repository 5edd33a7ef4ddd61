// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::aggregate::{aggregate, SummaryVisibility, TimerToken};
use crate::models::{ExpenseRecord, MonthlySummary, SaveOutcome};
use crate::reconcile;
use crate::sanitize::{Field, FormFields};
use crate::store::ExpenseStore;

/// Everything the form shows, in one place.
#[derive(Debug, Clone)]
pub struct AppState {
    pub selected_date: NaiveDate,
    pub form: FormFields,
    pub records: Vec<ExpenseRecord>,
    pub summary: Option<MonthlySummary>,
    pub visibility: SummaryVisibility,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            form: FormFields::default(),
            records: Vec::new(),
            summary: None,
            visibility: SummaryVisibility::default(),
        }
    }
}

pub struct App {
    store: ExpenseStore,
    state: AppState,
}

impl App {
    /// Fetches the collection once; there is no later refresh from the store.
    pub fn load(store: ExpenseStore, today: NaiveDate) -> Result<Self> {
        let mut state = AppState::new(today);
        state.records = store.list()?;
        debug!(records = state.records.len(), "loaded expenses");
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.state.records
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.selected_date = date;
    }

    pub fn set_field(&mut self, field: Field, raw: &str) -> bool {
        self.state.form.set(field, raw)
    }

    pub fn save(&mut self, confirm: &mut dyn FnMut(&str) -> bool) -> Result<SaveOutcome> {
        let outcome = reconcile::save(
            &mut self.store,
            &mut self.state.records,
            self.state.selected_date,
            &self.state.form,
            confirm,
        )?;
        if outcome != SaveOutcome::Declined {
            self.state.form.clear();
        }
        Ok(outcome)
    }

    pub fn calculate_month(
        &mut self,
        as_of: NaiveDate,
        now: Instant,
    ) -> (&MonthlySummary, TimerToken) {
        let token = self.state.visibility.arm(now);
        let summary = self.state.summary.insert(aggregate(&self.state.records, as_of));
        (summary, token)
    }

    pub fn fire_timer(&mut self, token: TimerToken) -> bool {
        self.state.visibility.fire(token)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.visibility.tick(now)
    }

    pub fn visible_summary(&self) -> Option<&MonthlySummary> {
        if self.state.visibility.is_visible() {
            self.state.summary.as_ref()
        } else {
            None
        }
    }
}
