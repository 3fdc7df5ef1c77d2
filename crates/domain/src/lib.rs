// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod costing;
mod error;
mod rates;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use costing::{civil_labour, department_labour, material_line_total, net_total};
pub use error::DomainError;
pub use rates::resolve_team_rate;

// Re-export public types
pub use types::{
    CivilAdvance, CivilDailyWork, DefaultRate, Department, DepartmentWork, MaterialEntry,
    OtherExpense, Site, SiteDailyNote, Team, TeamRate,
};
pub use validation::{NameKind, validate_entity_name, validate_workable_department};
