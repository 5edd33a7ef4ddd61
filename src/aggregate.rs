// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::models::{ExpenseRecord, MonthlySummary};

/// How long a calculated summary stays on screen.
pub const SUMMARY_DISPLAY: Duration = Duration::from_secs(2 * 60);

const WINDOW_START_DAY: u32 = 11;
const WINDOW_END_DAY: u32 = 10;

/// Billing month containing the 11th of `as_of`'s month: the 11th through the
/// 10th of the following month, both inclusive.
pub fn billing_window(as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = as_of.with_day(1).unwrap_or(as_of);
    let start = first.with_day(WINDOW_START_DAY).unwrap_or(first);
    let end = (first + Months::new(1)).with_day(WINDOW_END_DAY).unwrap_or(first);
    (start, end)
}

pub fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn aggregate(records: &[ExpenseRecord], as_of: NaiveDate) -> MonthlySummary {
    let (start, end) = billing_window(as_of);
    let mut s = MonthlySummary {
        start,
        end,
        records: 0,
        milk: Decimal::ZERO,
        bread: Decimal::ZERO,
        online_payment: Decimal::ZERO,
        cash_payment: Decimal::ZERO,
        material: Decimal::ZERO,
        total_payment: Decimal::ZERO,
        total_material: Decimal::ZERO,
    };
    for r in records.iter().filter(|r| r.date >= start && r.date <= end) {
        let sums = (|| {
            Some((
                s.milk.checked_add(r.milk)?,
                s.bread.checked_add(r.bread)?,
                s.online_payment.checked_add(r.online_payment)?,
                s.cash_payment.checked_add(r.cash_payment)?,
                s.material.checked_add(r.material)?,
            ))
        })();
        let Some((milk, bread, online, cash, material)) = sums else {
            warn!(date = %r.date, id = ?r.id, "skipping record, monthly sum overflows");
            continue;
        };
        s.records += 1;
        s.milk = milk;
        s.bread = bread;
        s.online_payment = online;
        s.cash_payment = cash;
        s.material = material;
    }
    s.total_payment = round2(s.online_payment.saturating_add(s.cash_payment));
    s.total_material = round2(s.milk.saturating_add(s.bread).saturating_add(s.material));
    s.milk = round2(s.milk);
    s.bread = round2(s.bread);
    s.online_payment = round2(s.online_payment);
    s.cash_payment = round2(s.cash_payment);
    s.material = round2(s.material);
    s
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// Auto-hide flag for the monthly summary.
///
/// Re-arming replaces the pending deadline; a token from an earlier arm no
/// longer hides anything.
#[derive(Debug, Default, Clone)]
pub struct SummaryVisibility {
    generation: u64,
    deadline: Option<Instant>,
}

impl SummaryVisibility {
    pub fn arm(&mut self, now: Instant) -> TimerToken {
        self.generation += 1;
        self.deadline = Some(now + SUMMARY_DISPLAY);
        TimerToken(self.generation)
    }

    /// Timer callback. Returns true if it hid the summary.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if token.0 == self.generation && self.deadline.is_some() {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Fires the current timer if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => self.fire(TimerToken(self.generation)),
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.deadline.is_some()
    }
}
