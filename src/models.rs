// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day's figures. Field names follow the stored document layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    // Assigned by the store; never written into the document body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub milk: Decimal,
    pub bread: Decimal,
    pub online_payment: Decimal,
    pub cash_payment: Decimal,
    pub material: Decimal,
    pub total: Decimal,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, fields: &ExpenseFields) -> Self {
        Self {
            id: None,
            date,
            milk: fields.milk,
            bread: fields.bread,
            online_payment: fields.online_payment,
            cash_payment: fields.cash_payment,
            material: fields.material,
            total: fields.total(),
        }
    }

    pub fn apply(&mut self, fields: &ExpenseFields) {
        self.milk = fields.milk;
        self.bread = fields.bread;
        self.online_payment = fields.online_payment;
        self.cash_payment = fields.cash_payment;
        self.material = fields.material;
        self.total = fields.total();
    }
}

/// The five user-entered amounts after validation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFields {
    pub milk: Decimal,
    pub bread: Decimal,
    pub online_payment: Decimal,
    pub cash_payment: Decimal,
    pub material: Decimal,
}

impl ExpenseFields {
    /// Payments only; milk, bread and material are not part of the total.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.online_payment.checked_add(self.cash_payment)
    }

    /// Saturates at `Decimal::MAX`; `FormFields::validate` rejects inputs
    /// where that would happen.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub records: usize,
    pub milk: Decimal,
    pub bread: Decimal,
    pub online_payment: Decimal,
    pub cash_payment: Decimal,
    pub material: Decimal,
    pub total_payment: Decimal,
    pub total_material: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
    Declined,
}
