// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report source loading.
//!
//! Loads the four source categories with their display names joined
//! in, plus the civil advance map keyed by (site, team, date), then
//! delegates the arithmetic to the core aggregator. Category inclusion
//! uses the filter's own predicates so SQL and aggregation can never
//! disagree on which sources belong in a report.

use std::collections::BTreeMap;

use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{
    civil_advances, civil_daily_work, department_work, departments, material_entries,
    other_expenses, sites, teams,
};
use crate::error::PersistenceError;
use crate::sqlite::{from_db_date, to_db_date};
use site_ledger::{
    CivilSourceRow, DepartmentSourceRow, ExpenseSourceRow, MaterialSourceRow, Report,
    ReportFilter, ReportOrder, ReportTotals, SourceRows, aggregate,
};
use site_ledger_domain::{CivilDailyWork, DepartmentWork, MaterialEntry, OtherExpense};
use time::Date;

pub(crate) fn load_civil_sources(
    conn: &mut SqliteConnection,
    site_id: Option<i64>,
    team_id: Option<i64>,
    from: Date,
    to: Date,
) -> Result<Vec<CivilSourceRow>, PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    let mut query = civil_daily_work::table
        .inner_join(sites::table)
        .inner_join(teams::table)
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
            sites::name,
            teams::name,
        ))
        .filter(civil_daily_work::work_date.between(from_text, to_text))
        .into_boxed();
    if let Some(site_id) = site_id {
        query = query.filter(civil_daily_work::site_id.eq(site_id));
    }
    if let Some(team_id) = team_id {
        query = query.filter(civil_daily_work::team_id.eq(team_id));
    }

    let rows =
        query.load::<(i64, i64, String, i64, i64, i64, i64, f64, f64, String, String)>(conn)?;

    rows.into_iter()
        .map(
            |(site_id, team_id, work_date, mf, mh, hf, hh, labour, total, site_name, team_name)| {
                Ok(CivilSourceRow {
                    row: CivilDailyWork {
                        site_id,
                        team_id,
                        date: from_db_date(&work_date)?,
                        mason_full: mf,
                        mason_half: mh,
                        helper_full: hf,
                        helper_half: hh,
                        labour_amount: labour,
                        total_amount: total,
                    },
                    site_name,
                    team_name,
                })
            },
        )
        .collect()
}

pub(crate) fn load_advance_map(
    conn: &mut SqliteConnection,
    site_id: Option<i64>,
    team_id: Option<i64>,
    from: Date,
    to: Date,
) -> Result<BTreeMap<(i64, i64, Date), f64>, PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    let mut query = civil_advances::table
        .select((
            civil_advances::site_id,
            civil_advances::team_id,
            civil_advances::work_date,
            civil_advances::amount,
        ))
        .filter(civil_advances::work_date.between(from_text, to_text))
        .into_boxed();
    if let Some(site_id) = site_id {
        query = query.filter(civil_advances::site_id.eq(site_id));
    }
    if let Some(team_id) = team_id {
        query = query.filter(civil_advances::team_id.eq(team_id));
    }

    let rows = query.load::<(i64, i64, String, f64)>(conn)?;

    let mut map = BTreeMap::new();
    for (site_id, team_id, work_date, amount) in rows {
        map.insert((site_id, team_id, from_db_date(&work_date)?), amount);
    }
    Ok(map)
}

pub(crate) fn load_department_sources(
    conn: &mut SqliteConnection,
    site_id: Option<i64>,
    department_id: Option<i64>,
    from: Date,
    to: Date,
) -> Result<Vec<DepartmentSourceRow>, PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    let mut query = department_work::table
        .inner_join(sites::table)
        .inner_join(departments::table)
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
            sites::name,
            departments::name,
        ))
        .filter(department_work::work_date.between(from_text, to_text))
        .into_boxed();
    if let Some(site_id) = site_id {
        query = query.filter(department_work::site_id.eq(site_id));
    }
    if let Some(department_id) = department_id {
        query = query.filter(department_work::department_id.eq(department_id));
    }

    let rows = query.load::<(
            i64,
            i64,
            String,
            i64,
            i64,
            i64,
            i64,
            f64,
            f64,
            f64,
            String,
            String,
        )>(conn)?;

    rows.into_iter()
        .map(
            |(
                site_id,
                department_id,
                work_date,
                full,
                half,
                full_rate,
                half_rate,
                labour,
                advance,
                total,
                site_name,
                department_name,
            )| {
                Ok(DepartmentSourceRow {
                    row: DepartmentWork {
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
                    },
                    site_name,
                    department_name,
                })
            },
        )
        .collect()
}

pub(crate) fn load_material_sources(
    conn: &mut SqliteConnection,
    site_id: Option<i64>,
    agent_name: Option<&str>,
    from: Date,
    to: Date,
) -> Result<Vec<MaterialSourceRow>, PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    let mut query = material_entries::table
        .inner_join(sites::table)
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
            sites::name,
        ))
        .filter(material_entries::work_date.between(from_text, to_text))
        .into_boxed();
    if let Some(site_id) = site_id {
        query = query.filter(material_entries::site_id.eq(site_id));
    }
    if let Some(agent_name) = agent_name {
        query = query.filter(material_entries::agent_name.eq(agent_name.to_string()));
    }

    let rows = query.load::<(
            i64,
            i64,
            String,
            String,
            String,
            f64,
            String,
            f64,
            f64,
            f64,
            String,
        )>(conn)?;

    rows.into_iter()
        .map(
            |(
                entry_id,
                site_id,
                work_date,
                agent_name,
                name,
                quantity,
                unit,
                rate,
                advance,
                total,
                site_name,
            )| {
                Ok(MaterialSourceRow {
                    row: MaterialEntry {
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
                    },
                    site_name,
                })
            },
        )
        .collect()
}

pub(crate) fn load_expense_sources(
    conn: &mut SqliteConnection,
    site_id: Option<i64>,
    title: Option<&str>,
    from: Date,
    to: Date,
) -> Result<Vec<ExpenseSourceRow>, PersistenceError> {
    let from_text = to_db_date(from);
    let to_text = to_db_date(to);

    let mut query = other_expenses::table
        .inner_join(sites::table)
        .select((
            other_expenses::expense_id,
            other_expenses::site_id,
            other_expenses::work_date,
            other_expenses::title,
            other_expenses::owner,
            other_expenses::amount,
            other_expenses::notes,
            sites::name,
        ))
        .filter(other_expenses::work_date.between(from_text, to_text))
        .into_boxed();
    if let Some(site_id) = site_id {
        query = query.filter(other_expenses::site_id.eq(site_id));
    }
    if let Some(title) = title {
        query = query.filter(other_expenses::title.eq(title.to_string()));
    }

    let rows = query.load::<(i64, i64, String, String, Option<String>, f64, String, String)>(conn)?;

    rows.into_iter()
        .map(
            |(expense_id, site_id, work_date, title, owner, amount, notes, site_name)| {
                Ok(ExpenseSourceRow {
                    row: OtherExpense {
                        expense_id: Some(expense_id),
                        site_id,
                        date: from_db_date(&work_date)?,
                        title,
                        owner,
                        amount,
                        notes,
                    },
                    site_name,
                })
            },
        )
        .collect()
}

/// Loads the sources a filter includes and aggregates them into a
/// report for the inclusive date range.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn fetch_report(
    conn: &mut SqliteConnection,
    filter: &ReportFilter,
    from: Date,
    to: Date,
    order: ReportOrder,
) -> Result<Report, PersistenceError> {
    let mut sources = SourceRows::default();

    if filter.includes_civil() {
        sources.civil = load_civil_sources(conn, filter.site_id, filter.team_id, from, to)?;
        sources.civil_advances = load_advance_map(conn, filter.site_id, filter.team_id, from, to)?;
    }
    if filter.includes_departments() {
        sources.departments =
            load_department_sources(conn, filter.site_id, filter.department_id, from, to)?;
    }
    if filter.includes_materials() {
        sources.materials = load_material_sources(conn, filter.site_id, None, from, to)?;
    }
    if filter.includes_expenses() {
        sources.expenses = load_expense_sources(conn, filter.site_id, None, from, to)?;
    }

    debug!(
        civil = sources.civil.len(),
        departments = sources.departments.len(),
        materials = sources.materials.len(),
        expenses = sources.expenses.len(),
        "Loaded report sources"
    );

    Ok(aggregate(&sources, filter, order))
}

/// Grand totals for one site over an inclusive date range, powering
/// the dashboard's today/week/month cards.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn site_period_totals(
    conn: &mut SqliteConnection,
    site_id: i64,
    from: Date,
    to: Date,
) -> Result<ReportTotals, PersistenceError> {
    let filter = ReportFilter {
        site_id: Some(site_id),
        ..ReportFilter::default()
    };
    Ok(fetch_report(conn, &filter, from, to, ReportOrder::DateDescending)?.totals)
}
