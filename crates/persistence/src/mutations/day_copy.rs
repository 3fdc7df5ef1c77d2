// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Previous-day copy execution.
//!
//! The plan already carries re-dated source rows with their
//! pre-computed amounts; execution is delete-key-then-insert per keyed
//! row, an optional wholesale material clear, and a note upsert. The
//! `Persistence` adapter wraps the whole copy in one transaction.

use diesel::prelude::*;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::day_entry::{
    delete_advance_row, delete_civil_row, delete_department_row, delete_materials_for_day,
    insert_advance_row, insert_civil_row, insert_department_row, insert_material_row,
    upsert_note_row,
};
use crate::sqlite::to_db_date;
use site_ledger::CopyPlan;
use time::Date;

/// Executes one planned previous-day copy.
///
/// # Arguments
///
/// * `conn` - The database connection (inside an open transaction)
/// * `site_id` - The site being copied
/// * `target_date` - The date being written
/// * `plan` - The planned copy set
///
/// # Returns
///
/// Whether at least one row was written, so the caller can report
/// "nothing to copy" distinctly from "copied".
///
/// # Errors
///
/// Returns an error if any write fails; the surrounding transaction
/// rolls the whole copy back.
pub fn execute_copy_plan(
    conn: &mut SqliteConnection,
    site_id: i64,
    target_date: Date,
    plan: &CopyPlan,
) -> Result<bool, PersistenceError> {
    if plan.is_empty() {
        info!(site_id, "Nothing to copy");
        return Ok(false);
    }

    let date_text = to_db_date(target_date);

    for row in &plan.civil {
        delete_civil_row(conn, site_id, row.team_id, &date_text)?;
        insert_civil_row(conn, row)?;
    }

    for row in &plan.advances {
        delete_advance_row(conn, site_id, row.team_id, &date_text)?;
        insert_advance_row(conn, row)?;
    }

    for row in &plan.departments {
        delete_department_row(conn, site_id, row.department_id, &date_text)?;
        insert_department_row(conn, row)?;
    }

    if plan.clear_materials {
        delete_materials_for_day(conn, site_id, &date_text)?;
    }
    for row in &plan.materials {
        insert_material_row(conn, row)?;
    }

    if let Some(note) = &plan.note {
        upsert_note_row(conn, note)?;
    }

    info!(
        site_id,
        target_date = %date_text,
        civil = plan.civil.len(),
        advances = plan.advances.len(),
        departments = plan.departments.len(),
        materials = plan.materials.len(),
        note = plan.note.is_some(),
        "Copied previous day"
    );
    Ok(true)
}
