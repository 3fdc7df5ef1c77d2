// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// A construction site. Root of all daily transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// The numeric identifier assigned by the database.
    /// `None` indicates the site has not been persisted yet.
    pub site_id: Option<i64>,
    /// Display name of the site.
    pub name: String,
}

impl Site {
    /// Creates a new, not-yet-persisted site.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            site_id: None,
            name: name.into(),
        }
    }
}

/// A civil labour team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The numeric identifier assigned by the database.
    pub team_id: Option<i64>,
    /// Display name of the team.
    pub name: String,
}

impl Team {
    /// Creates a new, not-yet-persisted team.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            team_id: None,
            name: name.into(),
        }
    }
}

/// A work department. One configured name (conventionally "Civil") is
/// reserved for team-based civil work and is excluded from
/// department-work entry and default-rate assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The numeric identifier assigned by the database.
    pub department_id: Option<i64>,
    /// Display name of the department.
    pub name: String,
}

impl Department {
    /// Creates a new, not-yet-persisted department.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            department_id: None,
            name: name.into(),
        }
    }
}

/// One version in a team's pay-rate history.
///
/// Multiple rows per team form a history; `resolve_team_rate` selects
/// the version effective on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRate {
    /// The numeric identifier assigned by the database.
    pub rate_id: Option<i64>,
    /// The team this rate version belongs to.
    pub team_id: i64,
    /// Full-day rate for a mason.
    pub mason_full_rate: i64,
    /// Full-day rate for a helper.
    pub helper_full_rate: i64,
    /// First date this version is effective.
    pub from_date: Date,
    /// Locked versions pin the pay scale for finalized bills and win
    /// over newer unlocked versions.
    pub is_locked: bool,
}

impl TeamRate {
    /// Half-day mason rate, floored. Display and snapshot use only;
    /// labour computation divides the full rate exactly.
    #[must_use]
    pub const fn mason_half_rate(&self) -> i64 {
        self.mason_full_rate / 2
    }

    /// Half-day helper rate, floored.
    #[must_use]
    pub const fn helper_half_rate(&self) -> i64 {
        self.helper_full_rate / 2
    }
}

/// The single pay rate of a non-civil department.
///
/// Unlike team rates this is not versioned by date; it is mutated in
/// place. Daily entries snapshot the values in force at entry time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRate {
    /// The numeric identifier assigned by the database.
    pub rate_id: Option<i64>,
    /// The department this rate belongs to (1:1).
    pub department_id: i64,
    /// Full-day rate.
    pub full_day_rate: i64,
    /// Whether the rate has been finalized.
    pub is_locked: bool,
}

impl DefaultRate {
    /// Half-day rate, floored. Display and snapshot use only.
    #[must_use]
    pub const fn half_day_rate(&self) -> i64 {
        self.full_day_rate / 2
    }
}

/// One team's civil work on one site and date.
///
/// Unique per (site, team, date). `labour_amount` and `total_amount`
/// are computed from the counts and the resolved rate, never entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilDailyWork {
    pub site_id: i64,
    pub team_id: i64,
    pub date: Date,
    /// Full-day mason attendance count.
    pub mason_full: i64,
    /// Half-day mason attendance count.
    pub mason_half: i64,
    /// Full-day helper attendance count.
    pub helper_full: i64,
    /// Half-day helper attendance count.
    pub helper_half: i64,
    /// Gross labour cost for the day.
    pub labour_amount: f64,
    /// Labour net of the day's advance.
    pub total_amount: f64,
}

/// A cash advance paid to a team on a site and date, netted against
/// that day's labour. Unique per (site, team, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilAdvance {
    pub site_id: i64,
    pub team_id: i64,
    pub date: Date,
    pub amount: f64,
}

/// One department's work on one site and date.
///
/// Unique per (site, department, date). The rate fields snapshot the
/// department's `DefaultRate` at entry time and do not change
/// retroactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWork {
    pub site_id: i64,
    pub department_id: i64,
    pub date: Date,
    pub full_day_count: i64,
    pub half_day_count: i64,
    /// Full-day rate in force when the entry was saved.
    pub full_day_rate: i64,
    /// Floored half-day rate in force when the entry was saved.
    pub half_day_rate: i64,
    /// Gross labour cost for the day.
    pub labour_amount: f64,
    /// Advance recorded directly on the entry.
    pub advance_amount: f64,
    /// Labour net of the advance.
    pub total_amount: f64,
}

/// One material purchase line for a site and date.
///
/// Line items are not unique-constrained; a day's list is replaced
/// wholesale on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    pub entry_id: Option<i64>,
    pub site_id: i64,
    pub date: Date,
    /// Supplying agent the line is billed under.
    pub agent_name: String,
    /// Material name.
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: f64,
    /// Advance paid against this line.
    pub advance: f64,
    /// Gross line total (`quantity * rate`).
    pub total: f64,
}

/// A miscellaneous expense for a site and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherExpense {
    pub expense_id: Option<i64>,
    pub site_id: i64,
    pub date: Date,
    pub title: String,
    /// Person the expense is attributed to, if any.
    pub owner: Option<String>,
    pub amount: f64,
    pub notes: String,
}

/// Free-text daily log for a site. Unique per (site, date); deleted
/// when cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDailyNote {
    pub site_id: i64,
    pub date: Date,
    pub description: String,
}
