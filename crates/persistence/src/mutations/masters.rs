// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master-data mutations.
//!
//! Site creation runs an explicit initialization step: the configured
//! default departments are ensured to exist and every non-civil one
//! gets a zero, unlocked default rate. The department list comes from
//! the injected `BootstrapConfig`, never from the engine itself.

use diesel::prelude::*;
use tracing::{debug, info};

use crate::diesel_schema::{
    civil_advances, civil_daily_work, default_rates, department_work, departments, sites,
    team_rates, teams,
};
use crate::error::PersistenceError;
use crate::sqlite::{get_last_insert_rowid, to_db_date};
use site_ledger::BootstrapConfig;
use site_ledger_domain::{
    DomainError, NameKind, validate_entity_name, validate_workable_department,
};
use time::Date;

/// Ensures a department with this name exists, returning its id.
///
/// Non-civil departments get a zero, unlocked default rate when first
/// created so department-work entry has a rate row to mutate.
fn ensure_department(
    conn: &mut SqliteConnection,
    name: &str,
    config: &BootstrapConfig,
) -> Result<i64, PersistenceError> {
    let existing: Option<i64> = departments::table
        .filter(departments::name.eq(name))
        .select(departments::department_id)
        .first(conn)
        .optional()?;

    let department_id = match existing {
        Some(id) => id,
        None => {
            diesel::insert_into(departments::table)
                .values(departments::name.eq(name))
                .execute(conn)?;
            let id = get_last_insert_rowid(conn)?;
            debug!(department_id = id, name, "Created department");
            id
        }
    };

    if !config.is_civil(name) {
        let has_rate: Option<i64> = default_rates::table
            .filter(default_rates::department_id.eq(department_id))
            .select(default_rates::rate_id)
            .first(conn)
            .optional()?;

        if has_rate.is_none() {
            diesel::insert_into(default_rates::table)
                .values((
                    default_rates::department_id.eq(department_id),
                    default_rates::full_day_rate.eq(0_i64),
                    default_rates::is_locked.eq(0),
                ))
                .execute(conn)?;
            debug!(department_id, "Seeded zero default rate");
        }
    }

    Ok(department_id)
}

/// Creates a site and runs default-department initialization.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The site name
/// * `config` - Deployment bootstrap configuration
///
/// # Errors
///
/// Returns an error if the name is invalid or the insert fails.
pub fn create_site(
    conn: &mut SqliteConnection,
    name: &str,
    config: &BootstrapConfig,
) -> Result<i64, PersistenceError> {
    validate_entity_name(NameKind::Site, name)?;

    diesel::insert_into(sites::table)
        .values(sites::name.eq(name.trim()))
        .execute(conn)?;
    let site_id = get_last_insert_rowid(conn)?;

    for department in &config.default_departments {
        ensure_department(conn, department, config)?;
    }

    info!(site_id, name, "Created site");
    Ok(site_id)
}

/// Creates a team.
///
/// # Errors
///
/// Returns an error if the name is invalid or the insert fails.
pub fn create_team(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    validate_entity_name(NameKind::Team, name)?;

    diesel::insert_into(teams::table)
        .values(teams::name.eq(name.trim()))
        .execute(conn)?;
    let team_id = get_last_insert_rowid(conn)?;

    info!(team_id, name, "Created team");
    Ok(team_id)
}

/// Creates a department (or returns the existing one with this name),
/// seeding its default rate when it is not the reserved civil
/// department.
///
/// # Errors
///
/// Returns an error if the name is invalid or the insert fails.
pub fn create_department(
    conn: &mut SqliteConnection,
    name: &str,
    config: &BootstrapConfig,
) -> Result<i64, PersistenceError> {
    validate_entity_name(NameKind::Department, name)?;

    let department_id = ensure_department(conn, name.trim(), config)?;
    info!(department_id, name, "Ensured department");
    Ok(department_id)
}

/// Deletes a site and every daily row recorded against it.
///
/// # Errors
///
/// Returns `SiteNotFound` when the site does not exist.
pub fn delete_site(conn: &mut SqliteConnection, site_id: i64) -> Result<(), PersistenceError> {
    use crate::diesel_schema::{material_entries, other_expenses, site_daily_notes};

    let deleted =
        diesel::delete(civil_daily_work::table.filter(civil_daily_work::site_id.eq(site_id)))
            .execute(conn)?;
    debug!(site_id, deleted, "Deleted civil rows for site");

    diesel::delete(civil_advances::table.filter(civil_advances::site_id.eq(site_id)))
        .execute(conn)?;
    diesel::delete(department_work::table.filter(department_work::site_id.eq(site_id)))
        .execute(conn)?;
    diesel::delete(material_entries::table.filter(material_entries::site_id.eq(site_id)))
        .execute(conn)?;
    diesel::delete(other_expenses::table.filter(other_expenses::site_id.eq(site_id)))
        .execute(conn)?;
    diesel::delete(site_daily_notes::table.filter(site_daily_notes::site_id.eq(site_id)))
        .execute(conn)?;

    let removed = diesel::delete(sites::table.filter(sites::site_id.eq(site_id))).execute(conn)?;
    if removed == 0 {
        return Err(DomainError::SiteNotFound(site_id).into());
    }

    info!(site_id, "Deleted site");
    Ok(())
}

/// Deletes a team, failing when work, advance, or rate rows still
/// reference it.
///
/// # Errors
///
/// Returns `TeamInUse` when referencing rows exist, `TeamNotFound`
/// when the team does not exist.
pub fn delete_team(conn: &mut SqliteConnection, team_id: i64) -> Result<(), PersistenceError> {
    let work_rows: i64 = civil_daily_work::table
        .filter(civil_daily_work::team_id.eq(team_id))
        .count()
        .get_result(conn)?;
    let advance_rows: i64 = civil_advances::table
        .filter(civil_advances::team_id.eq(team_id))
        .count()
        .get_result(conn)?;
    let rate_rows: i64 = team_rates::table
        .filter(team_rates::team_id.eq(team_id))
        .count()
        .get_result(conn)?;

    if work_rows > 0 || advance_rows > 0 || rate_rows > 0 {
        return Err(DomainError::TeamInUse { team_id }.into());
    }

    let removed = diesel::delete(teams::table.filter(teams::team_id.eq(team_id))).execute(conn)?;
    if removed == 0 {
        return Err(DomainError::TeamNotFound(team_id).into());
    }

    info!(team_id, "Deleted team");
    Ok(())
}

/// Deletes a department, failing when work rows still reference it.
/// The department's default rate row goes with it.
///
/// # Errors
///
/// Returns `DepartmentInUse` when work rows exist, `DepartmentNotFound`
/// when the department does not exist.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<(), PersistenceError> {
    let work_rows: i64 = department_work::table
        .filter(department_work::department_id.eq(department_id))
        .count()
        .get_result(conn)?;

    if work_rows > 0 {
        return Err(DomainError::DepartmentInUse { department_id }.into());
    }

    diesel::delete(default_rates::table.filter(default_rates::department_id.eq(department_id)))
        .execute(conn)?;
    let removed =
        diesel::delete(departments::table.filter(departments::department_id.eq(department_id)))
            .execute(conn)?;
    if removed == 0 {
        return Err(DomainError::DepartmentNotFound(department_id).into());
    }

    info!(department_id, "Deleted department");
    Ok(())
}

/// Upserts one version of a team's rate history, keyed by
/// (team, `from_date`). Editing an existing effective date rewrites
/// that version; a new date appends to the history.
///
/// # Errors
///
/// Returns `TeamNotFound` when the team does not exist.
pub fn set_team_rate(
    conn: &mut SqliteConnection,
    team_id: i64,
    mason_full_rate: i64,
    helper_full_rate: i64,
    from_date: Date,
    is_locked: bool,
) -> Result<i64, PersistenceError> {
    let team_exists: Option<i64> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(teams::team_id)
        .first(conn)
        .optional()?;
    if team_exists.is_none() {
        return Err(DomainError::TeamNotFound(team_id).into());
    }

    let date_text = to_db_date(from_date);
    let existing: Option<i64> = team_rates::table
        .filter(team_rates::team_id.eq(team_id))
        .filter(team_rates::from_date.eq(&date_text))
        .select(team_rates::rate_id)
        .first(conn)
        .optional()?;

    let rate_id = if let Some(rate_id) = existing {
        diesel::update(team_rates::table.filter(team_rates::rate_id.eq(rate_id)))
            .set((
                team_rates::mason_full_rate.eq(mason_full_rate),
                team_rates::helper_full_rate.eq(helper_full_rate),
                team_rates::is_locked.eq(i32::from(is_locked)),
            ))
            .execute(conn)?;
        rate_id
    } else {
        diesel::insert_into(team_rates::table)
            .values((
                team_rates::team_id.eq(team_id),
                team_rates::mason_full_rate.eq(mason_full_rate),
                team_rates::helper_full_rate.eq(helper_full_rate),
                team_rates::from_date.eq(&date_text),
                team_rates::is_locked.eq(i32::from(is_locked)),
            ))
            .execute(conn)?;
        get_last_insert_rowid(conn)?
    };

    info!(
        team_id,
        rate_id,
        mason_full_rate,
        helper_full_rate,
        from_date = %date_text,
        is_locked,
        "Set team rate version"
    );
    Ok(rate_id)
}

/// Marks a team rate version as locked, pinning it for dates it
/// covers.
///
/// # Errors
///
/// Returns `NotFound` when the rate version does not exist.
pub fn lock_team_rate(conn: &mut SqliteConnection, rate_id: i64) -> Result<(), PersistenceError> {
    let updated = diesel::update(team_rates::table.filter(team_rates::rate_id.eq(rate_id)))
        .set(team_rates::is_locked.eq(1))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "team rate version {rate_id}"
        )));
    }

    info!(rate_id, "Locked team rate version");
    Ok(())
}

/// Sets a department's default rate in place.
///
/// The reserved civil department cannot carry a default rate. Existing
/// daily entries keep their snapshotted rates.
///
/// # Errors
///
/// Returns `DepartmentNotFound` for an unknown department and
/// `ReservedDepartment` for the civil department.
pub fn set_default_rate(
    conn: &mut SqliteConnection,
    department_id: i64,
    full_day_rate: i64,
    config: &BootstrapConfig,
) -> Result<(), PersistenceError> {
    let name: Option<String> = departments::table
        .filter(departments::department_id.eq(department_id))
        .select(departments::name)
        .first(conn)
        .optional()?;
    let Some(name) = name else {
        return Err(DomainError::DepartmentNotFound(department_id).into());
    };
    validate_workable_department(&name, &config.civil_department)?;

    let updated =
        diesel::update(default_rates::table.filter(default_rates::department_id.eq(department_id)))
            .set(default_rates::full_day_rate.eq(full_day_rate))
            .execute(conn)?;

    if updated == 0 {
        diesel::insert_into(default_rates::table)
            .values((
                default_rates::department_id.eq(department_id),
                default_rates::full_day_rate.eq(full_day_rate),
                default_rates::is_locked.eq(0),
            ))
            .execute(conn)?;
    }

    info!(department_id, full_day_rate, "Set default rate");
    Ok(())
}
