// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Site Ledger.
//!
//! Diesel on `SQLite`: the schema is bootstrapped by an idempotent
//! batch, foreign key enforcement is verified at startup, and every
//! multi-row write (day-sheet save, previous-day copy, site deletion)
//! runs inside a single transaction so a failure leaves no partial
//! day observable.
//!
//! ## Concurrency
//!
//! Concurrent edits to the same (site, team/department, date) key
//! resolve by last write wins; there is no optimistic locking. Reads
//! take no locks and see snapshot-consistent state from `SQLite`.
//!
//! ## Testing
//!
//! Standard tests run against in-memory `SQLite` via
//! [`Persistence::new_in_memory`]; no external infrastructure is
//! required.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

use diesel::prelude::*;

pub use error::PersistenceError;
pub use queries::{DayView, DepartmentDayView, TeamDayView};

use site_ledger::{
    BillDetail, BootstrapConfig, CopyFlags, DaySheet, Report, ReportFilter, ReportOrder,
    ReportTotals, plan_day_copy, plan_day_sheet,
};
use site_ledger_domain::{DefaultRate, Department, Site, Team, TeamRate};
use time::Date;

/// The storage adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates an in-memory database with the schema initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or schema creation fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn = sqlite::initialize_database(":memory:")?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a database at the given URL.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or schema creation fails.
    pub fn open(database_url: &str) -> Result<Self, PersistenceError> {
        let conn = sqlite::initialize_database(database_url)?;
        Ok(Self { conn })
    }

    // ---------- Master data ----------

    /// Creates a site and runs default-department initialization, as
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or a write fails.
    pub fn create_site(
        &mut self,
        name: &str,
        config: &BootstrapConfig,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::create_site(conn, name, config))
    }

    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the insert fails.
    pub fn create_team(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::create_team(&mut self.conn, name)
    }

    /// Creates a department (or returns the existing one), seeding its
    /// default rate when it is not the reserved civil department.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or a write fails.
    pub fn create_department(
        &mut self,
        name: &str,
        config: &BootstrapConfig,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::create_department(conn, name, config))
    }

    /// Deletes a site and every daily row recorded against it, as one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` when the site does not exist.
    pub fn delete_site(&mut self, site_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .transaction(|conn| mutations::delete_site(conn, site_id))
    }

    /// Deletes a team.
    ///
    /// # Errors
    ///
    /// Returns `TeamInUse` when work, advance, or rate rows reference
    /// the team.
    pub fn delete_team(&mut self, team_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_team(&mut self.conn, team_id)
    }

    /// Deletes a department and its default rate.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentInUse` when work rows reference the
    /// department.
    pub fn delete_department(&mut self, department_id: i64) -> Result<(), PersistenceError> {
        self.conn
            .transaction(|conn| mutations::delete_department(conn, department_id))
    }

    /// Lists all sites.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sites(&mut self) -> Result<Vec<Site>, PersistenceError> {
        queries::list_sites(&mut self.conn)
    }

    /// Gets one site.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` when the site does not exist.
    pub fn get_site(&mut self, site_id: i64) -> Result<Site, PersistenceError> {
        queries::get_site(&mut self.conn, site_id)
    }

    /// Lists all teams.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_teams(&mut self) -> Result<Vec<Team>, PersistenceError> {
        queries::list_teams(&mut self.conn)
    }

    /// Lists all departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        queries::list_departments(&mut self.conn)
    }

    /// Lists the departments that take department-work entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn workable_departments(
        &mut self,
        config: &BootstrapConfig,
    ) -> Result<Vec<Department>, PersistenceError> {
        queries::workable_departments(&mut self.conn, config)
    }

    // ---------- Rates ----------

    /// Upserts one version of a team's rate history, keyed by
    /// (team, `from_date`).
    ///
    /// # Errors
    ///
    /// Returns `TeamNotFound` when the team does not exist.
    pub fn set_team_rate(
        &mut self,
        team_id: i64,
        mason_full_rate: i64,
        helper_full_rate: i64,
        from_date: Date,
        is_locked: bool,
    ) -> Result<i64, PersistenceError> {
        mutations::set_team_rate(
            &mut self.conn,
            team_id,
            mason_full_rate,
            helper_full_rate,
            from_date,
            is_locked,
        )
    }

    /// Marks a team rate version as locked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the rate version does not exist.
    pub fn lock_team_rate(&mut self, rate_id: i64) -> Result<(), PersistenceError> {
        mutations::lock_team_rate(&mut self.conn, rate_id)
    }

    /// Sets a department's default rate in place.
    ///
    /// # Errors
    ///
    /// Returns `DepartmentNotFound` or `ReservedDepartment`.
    pub fn set_default_rate(
        &mut self,
        department_id: i64,
        full_day_rate: i64,
        config: &BootstrapConfig,
    ) -> Result<(), PersistenceError> {
        mutations::set_default_rate(&mut self.conn, department_id, full_day_rate, config)
    }

    /// Loads one team's full rate history.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn team_rate_history(&mut self, team_id: i64) -> Result<Vec<TeamRate>, PersistenceError> {
        queries::load_team_rates(&mut self.conn, team_id)
    }

    /// Resolves the rate version effective for a team on `as_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn resolve_rate_for(
        &mut self,
        team_id: i64,
        as_of: Date,
    ) -> Result<Option<TeamRate>, PersistenceError> {
        queries::resolve_rate_for(&mut self.conn, team_id, as_of)
    }

    /// Loads one department's default rate, if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn default_rate(
        &mut self,
        department_id: i64,
    ) -> Result<Option<DefaultRate>, PersistenceError> {
        queries::load_default_rate(&mut self.conn, department_id)
    }

    // ---------- Daily entry ----------

    /// Saves one submitted day sheet for a site and date as a single
    /// transaction: rates are resolved, amounts computed, keyed rows
    /// upserted or deleted, material and expense lists replaced
    /// wholesale, and the note upserted or cleared.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an unknown site, `RateNotConfigured`
    /// when a department line with non-zero input has no default rate,
    /// or a database error; any failure rolls the whole save back.
    pub fn save_day_sheet(
        &mut self,
        site_id: i64,
        date: Date,
        sheet: &DaySheet,
    ) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            queries::get_site(conn, site_id)?;

            let histories = queries::load_all_team_rates(conn)?;
            let default_rates = queries::load_default_rates(conn)?;
            let advances = queries::load_existing_advances(conn, site_id, date)?;

            let plan =
                plan_day_sheet(site_id, date, sheet, &histories, &default_rates, &advances)?;
            mutations::execute_day_sheet_plan(conn, site_id, date, &plan)
        })
    }

    /// Copies the previous date's rows onto `target_date` for the
    /// selected categories, as a single transaction.
    ///
    /// # Returns
    ///
    /// Whether at least one row was written.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound` for an unknown site or a database error;
    /// any failure rolls the whole copy back.
    pub fn copy_previous_day(
        &mut self,
        site_id: i64,
        target_date: Date,
        flags: &CopyFlags,
    ) -> Result<bool, PersistenceError> {
        let Some(source_date) = target_date.previous_day() else {
            return Ok(false);
        };

        self.conn.transaction(|conn| {
            queries::get_site(conn, site_id)?;

            let source = queries::load_day_rows(conn, site_id, source_date)?;
            let target = queries::load_day_rows(conn, site_id, target_date)?;

            let plan = plan_day_copy(flags, &source, &target, target_date);
            mutations::execute_copy_plan(conn, site_id, target_date, &plan)
        })
    }

    /// Deletes every category's rows for one site and date.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails.
    pub fn clear_day(&mut self, site_id: i64, date: Date) -> Result<(), PersistenceError> {
        self.conn
            .transaction(|conn| mutations::clear_day(conn, site_id, date))
    }

    /// Deletes every category's rows for one site over an inclusive
    /// date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails.
    pub fn clear_range(
        &mut self,
        site_id: i64,
        from: Date,
        to: Date,
    ) -> Result<(), PersistenceError> {
        self.conn
            .transaction(|conn| mutations::clear_range(conn, site_id, from, to))
    }

    // ---------- Read models ----------

    /// Loads every stored row for one site and date.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_day_rows(
        &mut self,
        site_id: i64,
        date: Date,
    ) -> Result<site_ledger::DayRows, PersistenceError> {
        queries::load_day_rows(&mut self.conn, site_id, date)
    }

    /// Builds the data-entry read model for one site and date.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_day_view(
        &mut self,
        site_id: i64,
        date: Date,
        today: Date,
        config: &BootstrapConfig,
    ) -> Result<DayView, PersistenceError> {
        queries::load_day_view(&mut self.conn, site_id, date, today, config)
    }

    /// Loads and aggregates a report over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn fetch_report(
        &mut self,
        filter: &ReportFilter,
        from: Date,
        to: Date,
        order: ReportOrder,
    ) -> Result<Report, PersistenceError> {
        queries::fetch_report(&mut self.conn, filter, from, to, order)
    }

    /// Grand totals for one site over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn site_period_totals(
        &mut self,
        site_id: i64,
        from: Date,
        to: Date,
    ) -> Result<ReportTotals, PersistenceError> {
        queries::site_period_totals(&mut self.conn, site_id, from, to)
    }

    // ---------- Bills ----------

    /// A team's civil bill over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn team_bill(
        &mut self,
        team_id: i64,
        from: Date,
        to: Date,
    ) -> Result<BillDetail, PersistenceError> {
        queries::team_bill(&mut self.conn, team_id, from, to)
    }

    /// A department's bill over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn department_bill(
        &mut self,
        department_id: i64,
        from: Date,
        to: Date,
    ) -> Result<BillDetail, PersistenceError> {
        queries::department_bill_detail(&mut self.conn, department_id, from, to)
    }

    /// A material agent's bill over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn material_agent_bill(
        &mut self,
        agent_name: &str,
        from: Date,
        to: Date,
    ) -> Result<BillDetail, PersistenceError> {
        queries::material_agent_bill(&mut self.conn, agent_name, from, to)
    }

    /// An expense title's bill over an inclusive date range.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn expense_title_bill(
        &mut self,
        title: &str,
        from: Date,
        to: Date,
    ) -> Result<BillDetail, PersistenceError> {
        queries::expense_title_bill(&mut self.conn, title, from, to)
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}
