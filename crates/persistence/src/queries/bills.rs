// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-dimension bill details.
//!
//! Each bill lists one dimension's (site, advance, total) lines over a
//! date range plus the advance/grand total summary the detail view
//! renders. Grouping and summation live in the core crate.

use diesel::prelude::*;

use crate::error::PersistenceError;
use crate::queries::reports::{
    load_advance_map, load_civil_sources, load_department_sources, load_expense_sources,
    load_material_sources,
};
use site_ledger::{BillDetail, civil_bill, department_bill, expense_bill, material_bill};
use time::Date;

/// A team's civil bill over an inclusive date range.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn team_bill(
    conn: &mut SqliteConnection,
    team_id: i64,
    from: Date,
    to: Date,
) -> Result<BillDetail, PersistenceError> {
    let rows = load_civil_sources(conn, None, Some(team_id), from, to)?;
    let advances = load_advance_map(conn, None, Some(team_id), from, to)?;
    Ok(civil_bill(&rows, &advances))
}

/// A department's bill over an inclusive date range.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn department_bill_detail(
    conn: &mut SqliteConnection,
    department_id: i64,
    from: Date,
    to: Date,
) -> Result<BillDetail, PersistenceError> {
    let rows = load_department_sources(conn, None, Some(department_id), from, to)?;
    Ok(department_bill(&rows))
}

/// A material agent's bill over an inclusive date range.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn material_agent_bill(
    conn: &mut SqliteConnection,
    agent_name: &str,
    from: Date,
    to: Date,
) -> Result<BillDetail, PersistenceError> {
    let rows = load_material_sources(conn, None, Some(agent_name), from, to)?;
    Ok(material_bill(&rows))
}

/// An expense title's bill over an inclusive date range.
///
/// # Errors
///
/// Returns an error if a query fails or a stored date is invalid.
pub fn expense_title_bill(
    conn: &mut SqliteConnection,
    title: &str,
    from: Date,
    to: Date,
) -> Result<BillDetail, PersistenceError> {
    let rows = load_expense_sources(conn, None, Some(title), from, to)?;
    Ok(expense_bill(&rows))
}
