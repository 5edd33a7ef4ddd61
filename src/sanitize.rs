// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ExpenseFields;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Milk,
    Bread,
    OnlinePayment,
    CashPayment,
    Material,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Milk,
        Field::Bread,
        Field::OnlinePayment,
        Field::CashPayment,
        Field::Material,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Milk => "Milk",
            Field::Bread => "Bread",
            Field::OnlinePayment => "Online Payment",
            Field::CashPayment => "Cash Payment",
            Field::Material => "Material",
        }
    }

    /// Key used in stored documents.
    pub fn key(self) -> &'static str {
        match self {
            Field::Milk => "milk",
            Field::Bread => "bread",
            Field::OnlinePayment => "onlinePayment",
            Field::CashPayment => "cashPayment",
            Field::Material => "material",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "milk" => Ok(Field::Milk),
            "bread" => Ok(Field::Bread),
            "online" | "onlinepayment" => Ok(Field::OnlinePayment),
            "cash" | "cashpayment" => Ok(Field::CashPayment),
            "material" => Ok(Field::Material),
            other => Err(anyhow::anyhow!(
                "Unknown field '{}' (use milk|bread|online|cash|material)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please enter only numeric values for the relevant fields ({field} = '{value}')")]
pub struct ValidationError {
    pub field: Field,
    pub value: String,
}

/// One or more ASCII digits. No sign, decimal point or separators.
pub fn is_numeric(s: &str) -> bool {
    DIGITS.is_match(s)
}

/// Keystroke filter: keeps `current` unless `raw` is empty or all digits.
pub fn filter_numeric(current: &str, raw: &str) -> String {
    if raw.is_empty() || is_numeric(raw) {
        raw.to_string()
    } else {
        current.to_string()
    }
}

/// Raw text of the five form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub milk: String,
    pub bread: String,
    pub online_payment: String,
    pub cash_payment: String,
    pub material: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Milk => &self.milk,
            Field::Bread => &self.bread,
            Field::OnlinePayment => &self.online_payment,
            Field::CashPayment => &self.cash_payment,
            Field::Material => &self.material,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Milk => &mut self.milk,
            Field::Bread => &mut self.bread,
            Field::OnlinePayment => &mut self.online_payment,
            Field::CashPayment => &mut self.cash_payment,
            Field::Material => &mut self.material,
        }
    }

    /// Returns false when `raw` was rejected and the old value kept.
    pub fn set(&mut self, field: Field, raw: &str) -> bool {
        let slot = self.slot(field);
        let next = filter_numeric(slot, raw);
        let accepted = next == raw;
        *slot = next;
        accepted
    }

    pub fn clear(&mut self) {
        *self = FormFields::default();
    }

    pub fn validate(&self) -> Result<ExpenseFields, ValidationError> {
        let parse = |field: Field| -> Result<Decimal, ValidationError> {
            let value = self.get(field);
            let invalid = || ValidationError {
                field,
                value: value.to_string(),
            };
            if !is_numeric(value) {
                return Err(invalid());
            }
            value.parse::<Decimal>().map_err(|_| invalid())
        };
        let fields = ExpenseFields {
            milk: parse(Field::Milk)?,
            bread: parse(Field::Bread)?,
            online_payment: parse(Field::OnlinePayment)?,
            cash_payment: parse(Field::CashPayment)?,
            material: parse(Field::Material)?,
        };
        if fields.checked_total().is_none() {
            return Err(ValidationError {
                field: Field::CashPayment,
                value: self.cash_payment.clone(),
            });
        }
        Ok(fields)
    }
}
