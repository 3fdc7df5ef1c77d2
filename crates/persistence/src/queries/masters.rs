// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master-data queries.

use diesel::prelude::*;

use crate::diesel_schema::{departments, sites, teams};
use crate::error::PersistenceError;
use site_ledger::BootstrapConfig;
use site_ledger_domain::{Department, DomainError, Site, Team};

/// Lists all sites, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_sites(conn: &mut SqliteConnection) -> Result<Vec<Site>, PersistenceError> {
    let rows = sites::table
        .order(sites::name.asc())
        .select((sites::site_id, sites::name))
        .load::<(i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(site_id, name)| Site {
            site_id: Some(site_id),
            name,
        })
        .collect())
}

/// Gets a single site by id.
///
/// # Errors
///
/// Returns `SiteNotFound` when the site does not exist.
pub fn get_site(conn: &mut SqliteConnection, site_id: i64) -> Result<Site, PersistenceError> {
    let row: Option<(i64, String)> = sites::table
        .filter(sites::site_id.eq(site_id))
        .select((sites::site_id, sites::name))
        .first(conn)
        .optional()?;

    row.map(|(id, name)| Site {
        site_id: Some(id),
        name,
    })
    .ok_or_else(|| DomainError::SiteNotFound(site_id).into())
}

/// Lists all teams, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_teams(conn: &mut SqliteConnection) -> Result<Vec<Team>, PersistenceError> {
    let rows = teams::table
        .order(teams::name.asc())
        .select((teams::team_id, teams::name))
        .load::<(i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(team_id, name)| Team {
            team_id: Some(team_id),
            name,
        })
        .collect())
}

/// Lists all departments, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Department>, PersistenceError> {
    let rows = departments::table
        .order(departments::name.asc())
        .select((departments::department_id, departments::name))
        .load::<(i64, String)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(department_id, name)| Department {
            department_id: Some(department_id),
            name,
        })
        .collect())
}

/// Lists the departments that take department-work entries, excluding
/// the reserved civil department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn workable_departments(
    conn: &mut SqliteConnection,
    config: &BootstrapConfig,
) -> Result<Vec<Department>, PersistenceError> {
    Ok(list_departments(conn)?
        .into_iter()
        .filter(|department| !config.is_civil(&department.name))
        .collect())
}
