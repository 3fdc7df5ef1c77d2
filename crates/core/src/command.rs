// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data-only intent types for daily entry and day copy.
//!
//! Transport layers parse their representation (form fields, JSON)
//! once into these typed sequences; the engine never probes dynamic
//! field names. Numeric and date input is lenient: unparsable values
//! coerce to zero, unparsable dates to the caller's "today".

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// One team's civil input line for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLine {
    pub team_id: i64,
    pub mason_full: i64,
    pub mason_half: i64,
    pub helper_full: i64,
    pub helper_half: i64,
    /// `None` means no advance field was submitted: any stored advance
    /// for the key stays untouched. `Some(v)` is an explicit write,
    /// including an explicit zero, which clears the stored advance.
    pub advance: Option<f64>,
}

/// One department's input line for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentLine {
    pub department_id: i64,
    pub full_day_count: i64,
    pub half_day_count: i64,
    pub advance: f64,
}

/// One material line item for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub agent_name: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub rate: f64,
    pub advance: f64,
}

/// One miscellaneous expense line item for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub title: String,
    pub owner: Option<String>,
    pub amount: f64,
    pub notes: String,
}

/// The full submitted sheet for one site and date.
///
/// Material and expense lists are ordered; the first line with a blank
/// `name`/`title` terminates its list and everything after it is
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DaySheet {
    pub teams: Vec<TeamLine>,
    pub departments: Vec<DepartmentLine>,
    pub materials: Vec<MaterialLine>,
    pub expenses: Vec<ExpenseLine>,
    /// `None` leaves any stored note untouched; `Some` with blank text
    /// clears it, otherwise upserts.
    pub note: Option<String>,
}

/// Category selection and overwrite mode for a previous-day copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFlags {
    pub civil: bool,
    pub department: bool,
    pub material: bool,
    pub description: bool,
    /// Overwrite rows already present on the target date instead of
    /// leaving them untouched.
    pub replace: bool,
}

impl CopyFlags {
    /// Copies every category, preserving existing target rows.
    #[must_use]
    pub const fn all_preserving() -> Self {
        Self {
            civil: true,
            department: true,
            material: true,
            description: true,
            replace: false,
        }
    }

    /// Copies every category, overwriting existing target rows.
    #[must_use]
    pub const fn all_replacing() -> Self {
        Self {
            civil: true,
            department: true,
            material: true,
            description: true,
            replace: true,
        }
    }
}

/// Parses a count field, coercing unparsable input to 0.
#[must_use]
pub fn parse_count(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Parses an amount field, coercing unparsable input to 0.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Parses a `YYYY-MM-DD` work date, defaulting to `today` when the
/// input is absent or malformed. The engine never reads the wall clock
/// itself; request layers supply `today`.
#[must_use]
pub fn parse_work_date(raw: Option<&str>, today: Date) -> Date {
    let format = format_description!("[year]-[month]-[day]");
    raw.and_then(|value| Date::parse(value.trim(), &format).ok())
        .unwrap_or(today)
}
