// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented entry form.
//!
//! Each input line is one event. The summary auto-hide deadline is checked
//! before every event, so a summary disappears on the first interaction after
//! its two minutes are up.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::warn;

use crate::app::App;
use crate::commands::month::summary_rows;
use crate::models::SaveOutcome;
use crate::sanitize::{Field, ValidationError};
use crate::utils::{ask, parse_date, pretty_table, record_row, RECORD_HEADERS};

const HELP: &str = "\
commands:
  date YYYY-MM-DD     select the entry date
  milk|bread|online|cash|material <digits>
                      set a field (empty value clears it)
  save                save the selected date
  month               calculate the billing month
  list                show saved entries
  show                show the form and any visible summary
  help                this text
  quit                leave";

pub fn run<R: BufRead, W: Write>(
    app: &mut App,
    input: &mut R,
    out: &mut W,
    today: NaiveDate,
    clock: &dyn Fn() -> Instant,
) -> Result<()> {
    writeln!(out, "Daily Expenses Tracker ({} entries). Type `help`.", app.records().len())?;
    let mut line = String::new();
    loop {
        write!(out, "{}> ", app.state().selected_date)?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if app.tick(clock()) {
            writeln!(out, "(monthly summary hidden)")?;
        }
        let cmd = line.trim().to_string();
        match step(app, &cmd, input, out, today, clock) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!(error = %e, "session command failed");
                writeln!(out, "error: {:#}", e)?;
            }
        }
    }
    Ok(())
}

fn step<R: BufRead, W: Write>(
    app: &mut App,
    cmd: &str,
    input: &mut R,
    out: &mut W,
    today: NaiveDate,
    clock: &dyn Fn() -> Instant,
) -> Result<bool> {
    let (head, rest) = match cmd.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (cmd, ""),
    };
    match head {
        "" => {}
        "quit" | "exit" => return Ok(false),
        "help" => writeln!(out, "{}", HELP)?,
        "date" => {
            let date = if rest.is_empty() { today } else { parse_date(rest)? };
            app.select_date(date);
        }
        "save" => {
            let mut confirm = |msg: &str| ask(input, out, msg);
            match app.save(&mut confirm) {
                Ok(SaveOutcome::Created(_)) => writeln!(out, "Saved.")?,
                Ok(SaveOutcome::Updated(_)) => writeln!(out, "Updated.")?,
                Ok(SaveOutcome::Declined) => writeln!(out, "Not updated.")?,
                Err(e) => match e.downcast_ref::<ValidationError>() {
                    Some(v) => writeln!(out, "{}", v)?,
                    None => return Err(e),
                },
            }
        }
        "month" => {
            let (summary, _) = app.calculate_month(today, clock());
            let rows = summary_rows(summary);
            writeln!(out, "Monthly expense {} .. {}", summary.start, summary.end)?;
            writeln!(out, "{}", pretty_table(&["Item", "Amount"], rows))?;
        }
        "list" => {
            let rows = app.records().iter().map(record_row).collect();
            writeln!(out, "{}", pretty_table(&RECORD_HEADERS, rows))?;
        }
        "show" => show(app, out)?,
        other => {
            let field: Field = other
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown command '{}'; type `help`", other))?;
            if !app.set_field(field, rest) {
                writeln!(
                    out,
                    "{} accepts digits only; keeping '{}'",
                    field,
                    app.state().form.get(field)
                )?;
            }
        }
    }
    Ok(true)
}

fn show<W: Write>(app: &App, out: &mut W) -> Result<()> {
    let form = &app.state().form;
    writeln!(out, "Date: {}", app.state().selected_date)?;
    for f in Field::ALL {
        writeln!(out, "{}: {}", f, form.get(f))?;
    }
    if let Some(s) = app.visible_summary() {
        writeln!(out, "Monthly expense {} .. {}", s.start, s.end)?;
        writeln!(out, "{}", pretty_table(&["Item", "Amount"], summary_rows(s)))?;
    }
    Ok(())
}
