// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite`-specific backend utilities.
//!
//! Connection initialization, schema bootstrap, PRAGMA configuration,
//! and the `last_insert_rowid()` workaround live here. All domain
//! queries and mutations use Diesel DSL and live in `queries/` and
//! `mutations/`.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text, which sorts and range-
//! filters correctly as plain text.

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use time::Date;
use time::macros::format_description;
use tracing::info;

use crate::error::PersistenceError;

/// Formats a date for storage.
#[must_use]
pub fn to_db_date(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    // The format is infallible for calendar dates.
    date.format(&format)
        .unwrap_or_else(|_| String::from("0000-00-00"))
}

/// Parses a stored date.
///
/// # Errors
///
/// Returns `CorruptRow` when the stored text is not a valid date.
pub fn from_db_date(raw: &str) -> Result<Date, PersistenceError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format)
        .map_err(|e| PersistenceError::CorruptRow(format!("invalid stored date '{raw}': {e}")))
}

/// Helper row struct for PRAGMA queries.
///
/// Raw SQL is justified here as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Helper function to get the last inserted row ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Initializes the database schema.
///
/// Idempotent: every statement uses `IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    conn.batch_execute(
        "
        CREATE TABLE IF NOT EXISTS sites (
            site_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS teams (
            team_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS departments (
            department_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS team_rates (
            rate_id INTEGER PRIMARY KEY AUTOINCREMENT,
            team_id INTEGER NOT NULL REFERENCES teams(team_id),
            mason_full_rate INTEGER NOT NULL,
            helper_full_rate INTEGER NOT NULL,
            from_date TEXT NOT NULL,
            is_locked INTEGER NOT NULL DEFAULT 0 CHECK(is_locked IN (0, 1)),
            UNIQUE(team_id, from_date)
        );

        CREATE TABLE IF NOT EXISTS default_rates (
            rate_id INTEGER PRIMARY KEY AUTOINCREMENT,
            department_id INTEGER NOT NULL UNIQUE REFERENCES departments(department_id),
            full_day_rate INTEGER NOT NULL DEFAULT 0,
            is_locked INTEGER NOT NULL DEFAULT 0 CHECK(is_locked IN (0, 1))
        );

        CREATE TABLE IF NOT EXISTS civil_daily_work (
            work_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            team_id INTEGER NOT NULL REFERENCES teams(team_id),
            work_date TEXT NOT NULL,
            mason_full INTEGER NOT NULL DEFAULT 0,
            mason_half INTEGER NOT NULL DEFAULT 0,
            helper_full INTEGER NOT NULL DEFAULT 0,
            helper_half INTEGER NOT NULL DEFAULT 0,
            labour_amount REAL NOT NULL DEFAULT 0,
            total_amount REAL NOT NULL DEFAULT 0,
            UNIQUE(site_id, team_id, work_date)
        );

        CREATE TABLE IF NOT EXISTS civil_advances (
            advance_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            team_id INTEGER NOT NULL REFERENCES teams(team_id),
            work_date TEXT NOT NULL,
            amount REAL NOT NULL DEFAULT 0,
            UNIQUE(site_id, team_id, work_date)
        );

        CREATE TABLE IF NOT EXISTS department_work (
            work_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            department_id INTEGER NOT NULL REFERENCES departments(department_id),
            work_date TEXT NOT NULL,
            full_day_count INTEGER NOT NULL DEFAULT 0,
            half_day_count INTEGER NOT NULL DEFAULT 0,
            full_day_rate INTEGER NOT NULL,
            half_day_rate INTEGER NOT NULL,
            labour_amount REAL NOT NULL DEFAULT 0,
            advance_amount REAL NOT NULL DEFAULT 0,
            total_amount REAL NOT NULL DEFAULT 0,
            UNIQUE(site_id, department_id, work_date)
        );

        CREATE TABLE IF NOT EXISTS material_entries (
            entry_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            work_date TEXT NOT NULL,
            agent_name TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL,
            quantity REAL NOT NULL DEFAULT 0,
            unit TEXT NOT NULL DEFAULT '',
            rate REAL NOT NULL DEFAULT 0,
            advance REAL NOT NULL DEFAULT 0,
            total REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS other_expenses (
            expense_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            work_date TEXT NOT NULL,
            title TEXT NOT NULL,
            owner TEXT,
            amount REAL NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS site_daily_notes (
            note_id INTEGER PRIMARY KEY AUTOINCREMENT,
            site_id INTEGER NOT NULL REFERENCES sites(site_id),
            work_date TEXT NOT NULL,
            description TEXT NOT NULL,
            UNIQUE(site_id, work_date)
        );

        CREATE INDEX IF NOT EXISTS idx_civil_daily_work_date
            ON civil_daily_work(work_date);

        CREATE INDEX IF NOT EXISTS idx_civil_advances_date
            ON civil_advances(work_date);

        CREATE INDEX IF NOT EXISTS idx_department_work_date
            ON department_work(work_date);

        CREATE INDEX IF NOT EXISTS idx_material_entries_site_date
            ON material_entries(site_id, work_date);

        CREATE INDEX IF NOT EXISTS idx_other_expenses_site_date
            ON other_expenses(site_id, work_date);
        ",
    )
    .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(())
}

/// Initializes a `SQLite` database at the given URL.
///
/// # Arguments
///
/// * `database_url` - The database URL (e.g., `":memory:"` or a path)
///
/// # Errors
///
/// Returns an error if connection, PRAGMA configuration, or schema
/// creation fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    initialize_schema(&mut conn)?;
    verify_foreign_key_enforcement(&mut conn)?;

    Ok(conn)
}
