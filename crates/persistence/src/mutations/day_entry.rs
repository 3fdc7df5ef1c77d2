// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-sheet plan execution.
//!
//! Keyed rows are written as delete-key-then-insert, which makes the
//! planner's upsert and the copy engine's replace mode the same
//! operation. Material and expense lists are replaced wholesale for
//! the (site, date). The `Persistence` adapter wraps each call in one
//! transaction.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::{
    civil_advances, civil_daily_work, department_work, material_entries, other_expenses,
    site_daily_notes,
};
use crate::error::PersistenceError;
use crate::sqlite::to_db_date;
use site_ledger::{AdvanceAction, DaySheetPlan, NoteAction, RowAction};
use site_ledger_domain::{
    CivilAdvance, CivilDailyWork, DepartmentWork, MaterialEntry, OtherExpense, SiteDailyNote,
};
use time::Date;

pub(crate) fn delete_civil_row(
    conn: &mut SqliteConnection,
    site_id: i64,
    team_id: i64,
    date_text: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        civil_daily_work::table
            .filter(civil_daily_work::site_id.eq(site_id))
            .filter(civil_daily_work::team_id.eq(team_id))
            .filter(civil_daily_work::work_date.eq(date_text)),
    )
    .execute(conn)?)
}

pub(crate) fn insert_civil_row(
    conn: &mut SqliteConnection,
    row: &CivilDailyWork,
) -> Result<(), PersistenceError> {
    diesel::insert_into(civil_daily_work::table)
        .values((
            civil_daily_work::site_id.eq(row.site_id),
            civil_daily_work::team_id.eq(row.team_id),
            civil_daily_work::work_date.eq(to_db_date(row.date)),
            civil_daily_work::mason_full.eq(row.mason_full),
            civil_daily_work::mason_half.eq(row.mason_half),
            civil_daily_work::helper_full.eq(row.helper_full),
            civil_daily_work::helper_half.eq(row.helper_half),
            civil_daily_work::labour_amount.eq(row.labour_amount),
            civil_daily_work::total_amount.eq(row.total_amount),
        ))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn delete_advance_row(
    conn: &mut SqliteConnection,
    site_id: i64,
    team_id: i64,
    date_text: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        civil_advances::table
            .filter(civil_advances::site_id.eq(site_id))
            .filter(civil_advances::team_id.eq(team_id))
            .filter(civil_advances::work_date.eq(date_text)),
    )
    .execute(conn)?)
}

pub(crate) fn insert_advance_row(
    conn: &mut SqliteConnection,
    row: &CivilAdvance,
) -> Result<(), PersistenceError> {
    diesel::insert_into(civil_advances::table)
        .values((
            civil_advances::site_id.eq(row.site_id),
            civil_advances::team_id.eq(row.team_id),
            civil_advances::work_date.eq(to_db_date(row.date)),
            civil_advances::amount.eq(row.amount),
        ))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn delete_department_row(
    conn: &mut SqliteConnection,
    site_id: i64,
    department_id: i64,
    date_text: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        department_work::table
            .filter(department_work::site_id.eq(site_id))
            .filter(department_work::department_id.eq(department_id))
            .filter(department_work::work_date.eq(date_text)),
    )
    .execute(conn)?)
}

pub(crate) fn insert_department_row(
    conn: &mut SqliteConnection,
    row: &DepartmentWork,
) -> Result<(), PersistenceError> {
    diesel::insert_into(department_work::table)
        .values((
            department_work::site_id.eq(row.site_id),
            department_work::department_id.eq(row.department_id),
            department_work::work_date.eq(to_db_date(row.date)),
            department_work::full_day_count.eq(row.full_day_count),
            department_work::half_day_count.eq(row.half_day_count),
            department_work::full_day_rate.eq(row.full_day_rate),
            department_work::half_day_rate.eq(row.half_day_rate),
            department_work::labour_amount.eq(row.labour_amount),
            department_work::advance_amount.eq(row.advance_amount),
            department_work::total_amount.eq(row.total_amount),
        ))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn insert_material_row(
    conn: &mut SqliteConnection,
    row: &MaterialEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(material_entries::table)
        .values((
            material_entries::site_id.eq(row.site_id),
            material_entries::work_date.eq(to_db_date(row.date)),
            material_entries::agent_name.eq(&row.agent_name),
            material_entries::name.eq(&row.name),
            material_entries::quantity.eq(row.quantity),
            material_entries::unit.eq(&row.unit),
            material_entries::rate.eq(row.rate),
            material_entries::advance.eq(row.advance),
            material_entries::total.eq(row.total),
        ))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn delete_materials_for_day(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        material_entries::table
            .filter(material_entries::site_id.eq(site_id))
            .filter(material_entries::work_date.eq(date_text)),
    )
    .execute(conn)?)
}

fn insert_expense_row(
    conn: &mut SqliteConnection,
    row: &OtherExpense,
) -> Result<(), PersistenceError> {
    diesel::insert_into(other_expenses::table)
        .values((
            other_expenses::site_id.eq(row.site_id),
            other_expenses::work_date.eq(to_db_date(row.date)),
            other_expenses::title.eq(&row.title),
            other_expenses::owner.eq(row.owner.as_deref()),
            other_expenses::amount.eq(row.amount),
            other_expenses::notes.eq(&row.notes),
        ))
        .execute(conn)?;
    Ok(())
}

pub(crate) fn delete_note_row(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(
        site_daily_notes::table
            .filter(site_daily_notes::site_id.eq(site_id))
            .filter(site_daily_notes::work_date.eq(date_text)),
    )
    .execute(conn)?)
}

pub(crate) fn upsert_note_row(
    conn: &mut SqliteConnection,
    row: &SiteDailyNote,
) -> Result<(), PersistenceError> {
    let date_text = to_db_date(row.date);
    delete_note_row(conn, row.site_id, &date_text)?;
    diesel::insert_into(site_daily_notes::table)
        .values((
            site_daily_notes::site_id.eq(row.site_id),
            site_daily_notes::work_date.eq(&date_text),
            site_daily_notes::description.eq(&row.description),
        ))
        .execute(conn)?;
    Ok(())
}

/// Executes one planned day-sheet save for a site and date.
///
/// # Arguments
///
/// * `conn` - The database connection (inside an open transaction)
/// * `site_id` - The site being saved
/// * `date` - The work date
/// * `plan` - The planned write set
///
/// # Errors
///
/// Returns an error if any write fails; the surrounding transaction
/// rolls the whole save back.
pub fn execute_day_sheet_plan(
    conn: &mut SqliteConnection,
    site_id: i64,
    date: Date,
    plan: &DaySheetPlan,
) -> Result<(), PersistenceError> {
    let date_text = to_db_date(date);

    for team_plan in &plan.teams {
        match &team_plan.work {
            RowAction::Upsert(row) => {
                delete_civil_row(conn, site_id, team_plan.team_id, &date_text)?;
                insert_civil_row(conn, row)?;
            }
            RowAction::Delete => {
                delete_civil_row(conn, site_id, team_plan.team_id, &date_text)?;
            }
        }

        match team_plan.advance {
            AdvanceAction::Keep => {}
            AdvanceAction::Write(amount) => {
                delete_advance_row(conn, site_id, team_plan.team_id, &date_text)?;
                insert_advance_row(
                    conn,
                    &CivilAdvance {
                        site_id,
                        team_id: team_plan.team_id,
                        date,
                        amount,
                    },
                )?;
            }
            AdvanceAction::Clear => {
                delete_advance_row(conn, site_id, team_plan.team_id, &date_text)?;
            }
        }
    }

    for department_plan in &plan.departments {
        match &department_plan.work {
            RowAction::Upsert(row) => {
                delete_department_row(conn, site_id, department_plan.department_id, &date_text)?;
                insert_department_row(conn, row)?;
            }
            RowAction::Delete => {
                delete_department_row(conn, site_id, department_plan.department_id, &date_text)?;
            }
        }
    }

    let removed_materials = delete_materials_for_day(conn, site_id, &date_text)?;
    for row in &plan.materials {
        insert_material_row(conn, row)?;
    }
    debug!(
        site_id,
        date = %date_text,
        removed = removed_materials,
        inserted = plan.materials.len(),
        "Replaced material rows"
    );

    let removed_expenses = diesel::delete(
        other_expenses::table
            .filter(other_expenses::site_id.eq(site_id))
            .filter(other_expenses::work_date.eq(&date_text)),
    )
    .execute(conn)?;
    for row in &plan.expenses {
        insert_expense_row(conn, row)?;
    }
    debug!(
        site_id,
        date = %date_text,
        removed = removed_expenses,
        inserted = plan.expenses.len(),
        "Replaced expense rows"
    );

    match &plan.note {
        NoteAction::Keep => {}
        NoteAction::Write(text) => {
            upsert_note_row(
                conn,
                &SiteDailyNote {
                    site_id,
                    date,
                    description: text.clone(),
                },
            )?;
        }
        NoteAction::Clear => {
            delete_note_row(conn, site_id, &date_text)?;
        }
    }

    info!(site_id, date = %date_text, "Saved day sheet");
    Ok(())
}

/// Deletes every category's rows for one site and date.
///
/// # Errors
///
/// Returns an error if any delete fails.
pub fn clear_day(
    conn: &mut SqliteConnection,
    site_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    clear_range(conn, site_id, date, date)
}

/// Deletes every category's rows for one site over an inclusive date
/// range.
///
/// # Errors
///
/// Returns an error if any delete fails.
pub fn clear_range(
    conn: &mut SqliteConnection,
    site_id: i64,
    from: Date,
    to: Date,
) -> Result<(), PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    diesel::delete(
        civil_daily_work::table
            .filter(civil_daily_work::site_id.eq(site_id))
            .filter(civil_daily_work::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;
    diesel::delete(
        civil_advances::table
            .filter(civil_advances::site_id.eq(site_id))
            .filter(civil_advances::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;
    diesel::delete(
        department_work::table
            .filter(department_work::site_id.eq(site_id))
            .filter(department_work::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;
    diesel::delete(
        material_entries::table
            .filter(material_entries::site_id.eq(site_id))
            .filter(material_entries::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;
    diesel::delete(
        other_expenses::table
            .filter(other_expenses::site_id.eq(site_id))
            .filter(other_expenses::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;
    diesel::delete(
        site_daily_notes::table
            .filter(site_daily_notes::site_id.eq(site_id))
            .filter(site_daily_notes::work_date.between(&from_text, &to_text)),
    )
    .execute(conn)?;

    info!(site_id, from = %from_text, to = %to_text, "Cleared ledger rows");
    Ok(())
}
