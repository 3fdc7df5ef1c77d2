// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day rows and the day-view read model.
//!
//! `load_day_rows` returns the raw stored rows for one site and date,
//! feeding the copy planner. `load_day_view` builds the data-entry
//! screen's read model; its rate fallback to "today" is display-only
//! and never reaches cost computation or stored amounts.

use std::collections::BTreeMap;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{
    civil_advances, civil_daily_work, department_work, material_entries, other_expenses,
    site_daily_notes,
};
use crate::error::PersistenceError;
use crate::queries::masters::{list_teams, workable_departments};
use crate::queries::rates::{load_all_team_rates, load_default_rates};
use crate::sqlite::{from_db_date, to_db_date};
use site_ledger::{BootstrapConfig, DayRows};
use site_ledger_domain::{
    CivilAdvance, CivilDailyWork, DefaultRate, Department, DepartmentWork, MaterialEntry,
    OtherExpense, SiteDailyNote, Team, TeamRate, resolve_team_rate,
};
use time::Date;

/// One team's line on the data-entry screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDayView {
    pub team: Team,
    /// The rate shown next to the line: the version effective on the
    /// viewed date, or today's version when the date predates the
    /// history. Teams with no rate at all are omitted from the view.
    pub display_rate: TeamRate,
    pub work: Option<CivilDailyWork>,
    pub advance: f64,
}

/// One department's line on the data-entry screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDayView {
    pub department: Department,
    pub default_rate: Option<DefaultRate>,
    pub work: Option<DepartmentWork>,
}

/// The full data-entry read model for one site and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    pub civil: Vec<TeamDayView>,
    pub departments: Vec<DepartmentDayView>,
    pub materials: Vec<MaterialEntry>,
    pub expenses: Vec<OtherExpense>,
    pub note: Option<String>,
}

fn load_civil_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Vec<CivilDailyWork>, PersistenceError> {
    let rows = civil_daily_work::table
        .filter(civil_daily_work::site_id.eq(site_id))
        .filter(civil_daily_work::work_date.eq(date_text))
        .select((
            civil_daily_work::site_id,
            civil_daily_work::team_id,
            civil_daily_work::work_date,
            civil_daily_work::mason_full,
            civil_daily_work::mason_half,
            civil_daily_work::helper_full,
            civil_daily_work::helper_half,
            civil_daily_work::labour_amount,
            civil_daily_work::total_amount,
        ))
        .load::<(i64, i64, String, i64, i64, i64, i64, f64, f64)>(conn)?;

    rows.into_iter()
        .map(
            |(site_id, team_id, work_date, mf, mh, hf, hh, labour, total)| {
                Ok(CivilDailyWork {
                    site_id,
                    team_id,
                    date: from_db_date(&work_date)?,
                    mason_full: mf,
                    mason_half: mh,
                    helper_full: hf,
                    helper_half: hh,
                    labour_amount: labour,
                    total_amount: total,
                })
            },
        )
        .collect()
}

fn load_advance_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Vec<CivilAdvance>, PersistenceError> {
    let rows = civil_advances::table
        .filter(civil_advances::site_id.eq(site_id))
        .filter(civil_advances::work_date.eq(date_text))
        .select((
            civil_advances::site_id,
            civil_advances::team_id,
            civil_advances::work_date,
            civil_advances::amount,
        ))
        .load::<(i64, i64, String, f64)>(conn)?;

    rows.into_iter()
        .map(|(site_id, team_id, work_date, amount)| {
            Ok(CivilAdvance {
                site_id,
                team_id,
                date: from_db_date(&work_date)?,
                amount,
            })
        })
        .collect()
}

fn load_department_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Vec<DepartmentWork>, PersistenceError> {
    let rows = department_work::table
        .filter(department_work::site_id.eq(site_id))
        .filter(department_work::work_date.eq(date_text))
        .select((
            department_work::site_id,
            department_work::department_id,
            department_work::work_date,
            department_work::full_day_count,
            department_work::half_day_count,
            department_work::full_day_rate,
            department_work::half_day_rate,
            department_work::labour_amount,
            department_work::advance_amount,
            department_work::total_amount,
        ))
        .load::<(i64, i64, String, i64, i64, i64, i64, f64, f64, f64)>(conn)?;

    rows.into_iter()
        .map(
            |(site_id, department_id, work_date, full, half, full_rate, half_rate, labour, advance, total)| {
                Ok(DepartmentWork {
                    site_id,
                    department_id,
                    date: from_db_date(&work_date)?,
                    full_day_count: full,
                    half_day_count: half,
                    full_day_rate: full_rate,
                    half_day_rate: half_rate,
                    labour_amount: labour,
                    advance_amount: advance,
                    total_amount: total,
                })
            },
        )
        .collect()
}

fn load_material_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Vec<MaterialEntry>, PersistenceError> {
    let rows = material_entries::table
        .filter(material_entries::site_id.eq(site_id))
        .filter(material_entries::work_date.eq(date_text))
        .order(material_entries::entry_id.asc())
        .select((
            material_entries::entry_id,
            material_entries::site_id,
            material_entries::work_date,
            material_entries::agent_name,
            material_entries::name,
            material_entries::quantity,
            material_entries::unit,
            material_entries::rate,
            material_entries::advance,
            material_entries::total,
        ))
        .load::<(i64, i64, String, String, String, f64, String, f64, f64, f64)>(conn)?;

    rows.into_iter()
        .map(
            |(entry_id, site_id, work_date, agent_name, name, quantity, unit, rate, advance, total)| {
                Ok(MaterialEntry {
                    entry_id: Some(entry_id),
                    site_id,
                    date: from_db_date(&work_date)?,
                    agent_name,
                    name,
                    quantity,
                    unit,
                    rate,
                    advance,
                    total,
                })
            },
        )
        .collect()
}

fn load_expense_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Vec<OtherExpense>, PersistenceError> {
    let rows = other_expenses::table
        .filter(other_expenses::site_id.eq(site_id))
        .filter(other_expenses::work_date.eq(date_text))
        .order(other_expenses::expense_id.asc())
        .select((
            other_expenses::expense_id,
            other_expenses::site_id,
            other_expenses::work_date,
            other_expenses::title,
            other_expenses::owner,
            other_expenses::amount,
            other_expenses::notes,
        ))
        .load::<(i64, i64, String, String, Option<String>, f64, String)>(conn)?;

    rows.into_iter()
        .map(
            |(expense_id, site_id, work_date, title, owner, amount, notes)| {
                Ok(OtherExpense {
                    expense_id: Some(expense_id),
                    site_id,
                    date: from_db_date(&work_date)?,
                    title,
                    owner,
                    amount,
                    notes,
                })
            },
        )
        .collect()
}

fn load_note_row(
    conn: &mut SqliteConnection,
    site_id: i64,
    date_text: &str,
) -> Result<Option<SiteDailyNote>, PersistenceError> {
    let row: Option<(i64, String, String)> = site_daily_notes::table
        .filter(site_daily_notes::site_id.eq(site_id))
        .filter(site_daily_notes::work_date.eq(date_text))
        .select((
            site_daily_notes::site_id,
            site_daily_notes::work_date,
            site_daily_notes::description,
        ))
        .first(conn)
        .optional()?;

    row.map(|(site_id, work_date, description)| {
        Ok(SiteDailyNote {
            site_id,
            date: from_db_date(&work_date)?,
            description,
        })
    })
    .transpose()
}

/// Loads every stored row for one site and date.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn load_day_rows(
    conn: &mut SqliteConnection,
    site_id: i64,
    date: Date,
) -> Result<DayRows, PersistenceError> {
    let date_text = to_db_date(date);
    Ok(DayRows {
        civil: load_civil_rows(conn, site_id, &date_text)?,
        advances: load_advance_rows(conn, site_id, &date_text)?,
        departments: load_department_rows(conn, site_id, &date_text)?,
        materials: load_material_rows(conn, site_id, &date_text)?,
        note: load_note_row(conn, site_id, &date_text)?,
    })
}

/// Loads the advances stored for one site and date, keyed by team id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_existing_advances(
    conn: &mut SqliteConnection,
    site_id: i64,
    date: Date,
) -> Result<BTreeMap<i64, f64>, PersistenceError> {
    let date_text = to_db_date(date);
    let rows = civil_advances::table
        .filter(civil_advances::site_id.eq(site_id))
        .filter(civil_advances::work_date.eq(&date_text))
        .select((civil_advances::team_id, civil_advances::amount))
        .load::<(i64, f64)>(conn)?;

    Ok(rows.into_iter().collect())
}

/// Builds the data-entry read model for one site and date.
///
/// `today` drives the display-only rate fallback for dates with no
/// effective historical rate.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn load_day_view(
    conn: &mut SqliteConnection,
    site_id: i64,
    date: Date,
    today: Date,
    config: &BootstrapConfig,
) -> Result<DayView, PersistenceError> {
    let date_text = to_db_date(date);

    let histories = load_all_team_rates(conn)?;
    let work_by_team: BTreeMap<i64, CivilDailyWork> = load_civil_rows(conn, site_id, &date_text)?
        .into_iter()
        .map(|row| (row.team_id, row))
        .collect();
    let advances = load_existing_advances(conn, site_id, date)?;

    let mut civil = Vec::new();
    for team in list_teams(conn)? {
        let Some(team_id) = team.team_id else {
            continue;
        };
        let history = histories.get(&team_id).map_or(&[] as &[TeamRate], Vec::as_slice);
        let display_rate = resolve_team_rate(history, date)
            .or_else(|| resolve_team_rate(history, today))
            .cloned();
        // No rate configured at all: the line cannot be entered.
        let Some(display_rate) = display_rate else {
            continue;
        };

        civil.push(TeamDayView {
            work: work_by_team.get(&team_id).cloned(),
            advance: advances.get(&team_id).copied().unwrap_or(0.0),
            team,
            display_rate,
        });
    }

    let default_rates = load_default_rates(conn)?;
    let work_by_department: BTreeMap<i64, DepartmentWork> =
        load_department_rows(conn, site_id, &date_text)?
            .into_iter()
            .map(|row| (row.department_id, row))
            .collect();

    let departments = workable_departments(conn, config)?
        .into_iter()
        .map(|department| {
            let department_id = department.department_id.unwrap_or(0);
            DepartmentDayView {
                default_rate: default_rates.get(&department_id).cloned(),
                work: work_by_department.get(&department_id).cloned(),
                department,
            }
        })
        .collect();

    Ok(DayView {
        civil,
        departments,
        materials: load_material_rows(conn, site_id, &date_text)?,
        expenses: load_expense_rows(conn, site_id, &date_text)?,
        note: load_note_row(conn, site_id, &date_text)?.map(|note| note.description),
    })
}
