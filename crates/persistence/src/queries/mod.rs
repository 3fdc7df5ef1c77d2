// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! All read-only access lives here, written in Diesel DSL. Rows are
//! loaded as tuples and mapped into domain values; aggregation itself
//! is delegated to the core crate so there is exactly one place that
//! knows the billing arithmetic.
//!
//! ## Module Organization
//!
//! - `masters` — Site/team/department listings and lookups
//! - `rates` — Rate history loading and as-of resolution
//! - `day` — Day rows and the day-view read model
//! - `reports` — Report source loading and aggregation
//! - `bills` — Per-dimension bill details

pub mod bills;
pub mod day;
pub mod masters;
pub mod rates;
pub mod reports;

pub use bills::{department_bill_detail, expense_title_bill, material_agent_bill, team_bill};
pub use day::{
    DayView, DepartmentDayView, TeamDayView, load_day_rows, load_day_view, load_existing_advances,
};
pub use masters::{get_site, list_departments, list_sites, list_teams, workable_departments};
pub use rates::{
    load_all_team_rates, load_default_rate, load_default_rates, load_team_rates, resolve_rate_for,
};
pub use reports::{fetch_report, site_period_totals};
