// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planned storage actions.
//!
//! Planning is pure: `apply` turns a submitted sheet (or a day copy
//! request) into these action sets, and the persistence layer executes
//! one whole plan inside a single transaction.

use serde::{Deserialize, Serialize};
use site_ledger_domain::{
    CivilAdvance, CivilDailyWork, DepartmentWork, MaterialEntry, OtherExpense, SiteDailyNote,
};

/// Upsert-or-delete outcome for one uniquely keyed row.
///
/// `Delete` is explicit: resubmitting an all-zero line removes the
/// stored row rather than leaving a stale zero row behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowAction<T> {
    /// Create or update the keyed row with freshly computed fields.
    Upsert(T),
    /// Remove any stored row for the key.
    Delete,
}

/// Action on a team's stored advance for the key (site, team, date).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AdvanceAction {
    /// No advance field was submitted; the stored value stays.
    Keep,
    /// An explicit non-zero advance was submitted.
    Write(f64),
    /// An explicit zero was submitted; the stored row is removed and
    /// reads back as 0.
    Clear,
}

/// Action on the site's daily note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteAction {
    /// No note field was submitted.
    Keep,
    /// Upsert the note text.
    Write(String),
    /// Blank text was submitted; the note row is removed.
    Clear,
}

/// Planned actions for one team line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLinePlan {
    pub team_id: i64,
    pub work: RowAction<CivilDailyWork>,
    pub advance: AdvanceAction,
}

/// Planned action for one department line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentLinePlan {
    pub department_id: i64,
    pub work: RowAction<DepartmentWork>,
}

/// The complete planned write set for one day-sheet save.
///
/// Material and expense rows are replace-wholesale: the executor
/// deletes every stored row for the (site, date) and inserts these
/// lists in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySheetPlan {
    pub teams: Vec<TeamLinePlan>,
    pub departments: Vec<DepartmentLinePlan>,
    pub materials: Vec<MaterialEntry>,
    pub expenses: Vec<OtherExpense>,
    pub note: NoteAction,
}

/// Rows of every copyable category for one site and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DayRows {
    pub civil: Vec<CivilDailyWork>,
    pub advances: Vec<CivilAdvance>,
    pub departments: Vec<DepartmentWork>,
    pub materials: Vec<MaterialEntry>,
    pub note: Option<SiteDailyNote>,
}

/// The planned write set for a previous-day copy.
///
/// Keyed rows (civil work, advances, department work) are executed as
/// delete-key-then-insert; under non-replace the plan only lists rows
/// whose key is absent on the target date, so the delete is a no-op
/// and existing rows stay untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CopyPlan {
    pub civil: Vec<CivilDailyWork>,
    pub advances: Vec<CivilAdvance>,
    pub departments: Vec<DepartmentWork>,
    /// Delete all target-date material rows before inserting. Set only
    /// under replace when the source date has material rows.
    pub clear_materials: bool,
    pub materials: Vec<MaterialEntry>,
    pub note: Option<SiteDailyNote>,
}

impl CopyPlan {
    /// Whether executing the plan would write nothing, letting callers
    /// report "nothing to copy" distinctly from "copied".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.civil.is_empty()
            && self.advances.is_empty()
            && self.departments.is_empty()
            && self.materials.is_empty()
            && self.note.is_none()
    }
}
