// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate history loading and as-of resolution.
//!
//! Resolution ordering lives in the domain crate; these queries load
//! history rows and delegate, so there is a single resolver contract.

use std::collections::BTreeMap;

use diesel::prelude::*;

use crate::diesel_schema::{default_rates, team_rates};
use crate::error::PersistenceError;
use crate::sqlite::from_db_date;
use site_ledger_domain::{DefaultRate, TeamRate, resolve_team_rate};
use time::Date;

type TeamRateRow = (i64, i64, i64, i64, String, i32);

fn map_team_rate(row: TeamRateRow) -> Result<TeamRate, PersistenceError> {
    let (rate_id, team_id, mason_full_rate, helper_full_rate, from_date, is_locked) = row;
    Ok(TeamRate {
        rate_id: Some(rate_id),
        team_id,
        mason_full_rate,
        helper_full_rate,
        from_date: from_db_date(&from_date)?,
        is_locked: is_locked != 0,
    })
}

/// Loads one team's full rate history, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn load_team_rates(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<TeamRate>, PersistenceError> {
    let rows = team_rates::table
        .filter(team_rates::team_id.eq(team_id))
        .order(team_rates::from_date.desc())
        .select((
            team_rates::rate_id,
            team_rates::team_id,
            team_rates::mason_full_rate,
            team_rates::helper_full_rate,
            team_rates::from_date,
            team_rates::is_locked,
        ))
        .load::<TeamRateRow>(conn)?;

    rows.into_iter().map(map_team_rate).collect()
}

/// Loads every team's rate history keyed by team id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn load_all_team_rates(
    conn: &mut SqliteConnection,
) -> Result<BTreeMap<i64, Vec<TeamRate>>, PersistenceError> {
    let rows = team_rates::table
        .select((
            team_rates::rate_id,
            team_rates::team_id,
            team_rates::mason_full_rate,
            team_rates::helper_full_rate,
            team_rates::from_date,
            team_rates::is_locked,
        ))
        .load::<TeamRateRow>(conn)?;

    let mut histories: BTreeMap<i64, Vec<TeamRate>> = BTreeMap::new();
    for row in rows {
        let rate = map_team_rate(row)?;
        histories.entry(rate.team_id).or_default().push(rate);
    }
    Ok(histories)
}

/// Resolves the rate version effective for a team on `as_of`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is invalid.
pub fn resolve_rate_for(
    conn: &mut SqliteConnection,
    team_id: i64,
    as_of: Date,
) -> Result<Option<TeamRate>, PersistenceError> {
    let history = load_team_rates(conn, team_id)?;
    Ok(resolve_team_rate(&history, as_of).cloned())
}

/// Loads every department's default rate keyed by department id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_default_rates(
    conn: &mut SqliteConnection,
) -> Result<BTreeMap<i64, DefaultRate>, PersistenceError> {
    let rows = default_rates::table
        .select((
            default_rates::rate_id,
            default_rates::department_id,
            default_rates::full_day_rate,
            default_rates::is_locked,
        ))
        .load::<(i64, i64, i64, i32)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(rate_id, department_id, full_day_rate, is_locked)| {
            (
                department_id,
                DefaultRate {
                    rate_id: Some(rate_id),
                    department_id,
                    full_day_rate,
                    is_locked: is_locked != 0,
                },
            )
        })
        .collect())
}

/// Loads one department's default rate, if configured.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_default_rate(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<DefaultRate>, PersistenceError> {
    let row: Option<(i64, i64, i64, i32)> = default_rates::table
        .filter(default_rates::department_id.eq(department_id))
        .select((
            default_rates::rate_id,
            default_rates::department_id,
            default_rates::full_day_rate,
            default_rates::is_locked,
        ))
        .first(conn)
        .optional()?;

    Ok(row.map(|(rate_id, department_id, full_day_rate, is_locked)| DefaultRate {
        rate_id: Some(rate_id),
        department_id,
        full_day_rate,
        is_locked: is_locked != 0,
    }))
}
