// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure planning of ledger writes.
//!
//! Every function here is deterministic over its inputs: the caller
//! supplies the rate material and any stored advances, and gets back
//! the exact upsert/delete set to execute. The lifecycle rule is
//! uniform across keyed rows: a row exists iff at least one of its
//! quantitative inputs is non-zero.

use std::collections::BTreeMap;

use crate::command::{CopyFlags, DaySheet, DepartmentLine, TeamLine};
use crate::error::CoreError;
use crate::plan::{
    AdvanceAction, CopyPlan, DayRows, DaySheetPlan, DepartmentLinePlan, NoteAction, RowAction,
    TeamLinePlan,
};
use site_ledger_domain::{
    CivilAdvance, CivilDailyWork, DefaultRate, DepartmentWork, DomainError, MaterialEntry,
    OtherExpense, SiteDailyNote, TeamRate, civil_labour, department_labour, material_line_total,
    net_total, resolve_team_rate,
};
use time::Date;

fn is_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

/// Plans one team's civil line.
///
/// The effective advance is the submitted value, or the stored one
/// when no advance field was submitted (0 if none is stored). Labour
/// comes from the resolved rate; no effective rate means labour 0. Any
/// non-zero count or effective advance keeps the work row alive with
/// freshly computed amounts; otherwise the row is deleted.
#[must_use]
pub fn plan_team_line(
    site_id: i64,
    date: Date,
    line: &TeamLine,
    rate: Option<&TeamRate>,
    existing_advance: f64,
) -> TeamLinePlan {
    let advance = line.advance.unwrap_or(existing_advance);
    let labour = civil_labour(
        line.mason_full,
        line.helper_full,
        line.mason_half,
        line.helper_half,
        rate,
    );

    let has_counts = line.mason_full != 0
        || line.mason_half != 0
        || line.helper_full != 0
        || line.helper_half != 0;

    let work = if has_counts || !is_zero(advance) {
        RowAction::Upsert(CivilDailyWork {
            site_id,
            team_id: line.team_id,
            date,
            mason_full: line.mason_full,
            mason_half: line.mason_half,
            helper_full: line.helper_full,
            helper_half: line.helper_half,
            labour_amount: labour,
            total_amount: net_total(labour, advance),
        })
    } else {
        RowAction::Delete
    };

    let advance_action = match line.advance {
        None => AdvanceAction::Keep,
        Some(value) if is_zero(value) => AdvanceAction::Clear,
        Some(value) => AdvanceAction::Write(value),
    };

    TeamLinePlan {
        team_id: line.team_id,
        work,
        advance: advance_action,
    }
}

/// Plans one department line.
///
/// All-zero input deletes the keyed row and needs no rate. Otherwise
/// the department must have a configured default rate; the plan
/// snapshots it (full plus floored half) so later rate edits do not
/// rewrite history.
///
/// # Errors
///
/// Returns `RateNotConfigured` when the line has non-zero input and
/// the department has no default rate.
pub fn plan_department_line(
    site_id: i64,
    date: Date,
    line: &DepartmentLine,
    rate: Option<&DefaultRate>,
) -> Result<DepartmentLinePlan, CoreError> {
    let has_input =
        line.full_day_count != 0 || line.half_day_count != 0 || !is_zero(line.advance);

    if !has_input {
        return Ok(DepartmentLinePlan {
            department_id: line.department_id,
            work: RowAction::Delete,
        });
    }

    let rate = rate.ok_or(CoreError::DomainViolation(DomainError::RateNotConfigured {
        department_id: line.department_id,
    }))?;

    let labour = department_labour(line.full_day_count, line.half_day_count, rate);

    Ok(DepartmentLinePlan {
        department_id: line.department_id,
        work: RowAction::Upsert(DepartmentWork {
            site_id,
            department_id: line.department_id,
            date,
            full_day_count: line.full_day_count,
            half_day_count: line.half_day_count,
            full_day_rate: rate.full_day_rate,
            half_day_rate: rate.half_day_rate(),
            labour_amount: labour,
            advance_amount: line.advance,
            total_amount: net_total(labour, line.advance),
        }),
    })
}

/// Plans a full day-sheet save for one site and date.
///
/// # Arguments
///
/// * `site_id` - The site being edited
/// * `date` - The work date
/// * `sheet` - The submitted sheet
/// * `rate_histories` - Team rate history per team id
/// * `default_rates` - Default rate per department id
/// * `existing_advances` - Stored advance per team id for (site, date)
///
/// # Errors
///
/// Returns `RateNotConfigured` when a department line with non-zero
/// input has no default rate.
pub fn plan_day_sheet(
    site_id: i64,
    date: Date,
    sheet: &DaySheet,
    rate_histories: &BTreeMap<i64, Vec<TeamRate>>,
    default_rates: &BTreeMap<i64, DefaultRate>,
    existing_advances: &BTreeMap<i64, f64>,
) -> Result<DaySheetPlan, CoreError> {
    let teams = sheet
        .teams
        .iter()
        .map(|line| {
            let rate = rate_histories
                .get(&line.team_id)
                .and_then(|history| resolve_team_rate(history, date));
            let existing = existing_advances.get(&line.team_id).copied().unwrap_or(0.0);
            plan_team_line(site_id, date, line, rate, existing)
        })
        .collect();

    let departments = sheet
        .departments
        .iter()
        .map(|line| {
            plan_department_line(site_id, date, line, default_rates.get(&line.department_id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Ordered lists terminate at the first blank name/title.
    let materials = sheet
        .materials
        .iter()
        .take_while(|line| !line.name.trim().is_empty())
        .map(|line| MaterialEntry {
            entry_id: None,
            site_id,
            date,
            agent_name: line.agent_name.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit: line.unit.clone(),
            rate: line.rate,
            advance: line.advance,
            total: material_line_total(line.quantity, line.rate),
        })
        .collect();

    let expenses = sheet
        .expenses
        .iter()
        .take_while(|line| !line.title.trim().is_empty())
        .map(|line| OtherExpense {
            expense_id: None,
            site_id,
            date,
            title: line.title.clone(),
            owner: line.owner.clone(),
            amount: line.amount,
            notes: line.notes.clone(),
        })
        .collect();

    let note = match &sheet.note {
        None => NoteAction::Keep,
        Some(text) if text.trim().is_empty() => NoteAction::Clear,
        Some(text) => NoteAction::Write(text.clone()),
    };

    Ok(DaySheetPlan {
        teams,
        departments,
        materials,
        expenses,
        note,
    })
}

/// Plans a previous-day copy onto `target_date`.
///
/// The source rows are the prior date's; copied rows carry their
/// pre-computed amounts verbatim, re-dated to the target. Under
/// `replace` every source row is written (the executor deletes the
/// target key first); otherwise only keys absent on the target date
/// are written, and materials copy all-or-nothing (only when the
/// target has none).
#[must_use]
pub fn plan_day_copy(
    flags: &CopyFlags,
    source: &DayRows,
    target: &DayRows,
    target_date: Date,
) -> CopyPlan {
    let mut plan = CopyPlan::default();

    if flags.civil {
        plan.civil = source
            .civil
            .iter()
            .filter(|row| {
                flags.replace || !target.civil.iter().any(|t| t.team_id == row.team_id)
            })
            .map(|row| CivilDailyWork {
                date: target_date,
                ..row.clone()
            })
            .collect();

        plan.advances = source
            .advances
            .iter()
            .filter(|row| {
                flags.replace || !target.advances.iter().any(|t| t.team_id == row.team_id)
            })
            .map(|row| CivilAdvance {
                date: target_date,
                ..row.clone()
            })
            .collect();
    }

    if flags.department {
        plan.departments = source
            .departments
            .iter()
            .filter(|row| {
                flags.replace
                    || !target
                        .departments
                        .iter()
                        .any(|t| t.department_id == row.department_id)
            })
            .map(|row| DepartmentWork {
                date: target_date,
                ..row.clone()
            })
            .collect();
    }

    if flags.material
        && !source.materials.is_empty()
        && (flags.replace || target.materials.is_empty())
    {
        plan.clear_materials = flags.replace;
        plan.materials = source
            .materials
            .iter()
            .map(|row| MaterialEntry {
                entry_id: None,
                date: target_date,
                ..row.clone()
            })
            .collect();
    }

    if flags.description
        && let Some(note) = &source.note
        && (flags.replace || target.note.is_none())
    {
        plan.note = Some(SiteDailyNote {
            date: target_date,
            ..note.clone()
        });
    }

    plan
}
