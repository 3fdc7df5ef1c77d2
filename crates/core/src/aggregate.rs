// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Billing aggregation over loaded ledger rows.
//!
//! Pure: the persistence layer loads the source rows for a date range
//! and hands them here. The civil advance join uses the full
//! (site, team, date) key; a (team, date) join would misattribute
//! advances whenever one team works two sites on the same day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use site_ledger_domain::{
    CivilDailyWork, DepartmentWork, MaterialEntry, OtherExpense, net_total,
};
use time::Date;

/// Dimension filters for a report. Source selection is mutually
/// exclusive: a department filter drops civil rows and vice versa;
/// `material_only` drops everything but material rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportFilter {
    pub site_id: Option<i64>,
    pub team_id: Option<i64>,
    pub department_id: Option<i64>,
    pub material_only: bool,
}

impl ReportFilter {
    /// Whether civil rows belong in the result.
    #[must_use]
    pub const fn includes_civil(&self) -> bool {
        !self.material_only && self.department_id.is_none()
    }

    /// Whether department rows belong in the result.
    #[must_use]
    pub const fn includes_departments(&self) -> bool {
        !self.material_only && self.team_id.is_none()
    }

    /// Whether material rows belong in the result.
    #[must_use]
    pub const fn includes_materials(&self) -> bool {
        self.material_only || (self.team_id.is_none() && self.department_id.is_none())
    }

    /// Whether expense rows belong in the result. Expenses carry no
    /// team or department dimension, so either filter excludes them.
    #[must_use]
    pub const fn includes_expenses(&self) -> bool {
        !self.material_only && self.team_id.is_none() && self.department_id.is_none()
    }
}

/// Row ordering for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportOrder {
    /// Newest first, for the interactive report.
    DateDescending,
    /// (date, site, dimension, label) ascending, for print/PDF.
    Printable,
}

/// The source category a report row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Civil,
    Department,
    Material,
    Expense,
}

impl Category {
    /// Display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Civil => "Civil",
            Self::Department => "Department",
            Self::Material => "Material",
            Self::Expense => "Expense",
        }
    }

    const fn sort_rank(self) -> u8 {
        match self {
            Self::Civil => 0,
            Self::Department => 1,
            Self::Material => 2,
            Self::Expense => 3,
        }
    }
}

/// A civil work row joined with its display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CivilSourceRow {
    pub row: CivilDailyWork,
    pub site_name: String,
    pub team_name: String,
}

/// A department work row joined with its display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSourceRow {
    pub row: DepartmentWork,
    pub site_name: String,
    pub department_name: String,
}

/// A material row joined with its site name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSourceRow {
    pub row: MaterialEntry,
    pub site_name: String,
}

/// An expense row joined with its site name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSourceRow {
    pub row: OtherExpense,
    pub site_name: String,
}

/// Everything the aggregator needs for one date range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRows {
    pub civil: Vec<CivilSourceRow>,
    pub departments: Vec<DepartmentSourceRow>,
    pub materials: Vec<MaterialSourceRow>,
    pub expenses: Vec<ExpenseSourceRow>,
    /// Stored civil advances keyed by (site, team, date).
    pub civil_advances: BTreeMap<(i64, i64, Date), f64>,
}

/// One line of the rendered report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: Date,
    pub site_name: String,
    pub category: Category,
    /// The dimension value: team name, department name, material agent
    /// or expense title.
    pub label: String,
    pub labour: f64,
    pub material: f64,
    pub advance: f64,
    pub total: f64,
}

/// Grand totals across all included rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTotals {
    pub labour: f64,
    pub material: f64,
    pub expense: f64,
    pub advance: f64,
    pub grand_total: f64,
}

/// The full aggregation result handed to rendering collaborators:
/// flat rows, grand totals, and dimension-by-site cross-tab tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals,
    pub team_site_totals: BTreeMap<String, BTreeMap<String, f64>>,
    pub department_site_totals: BTreeMap<String, BTreeMap<String, f64>>,
    pub material_site_totals: BTreeMap<String, BTreeMap<String, f64>>,
    pub expense_site_totals: BTreeMap<String, BTreeMap<String, f64>>,
}

/// A per-site line of a bill detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub site_name: String,
    pub advance: f64,
    pub total: f64,
}

/// One dimension's bill over a date range: per-site lines plus the
/// summary scalars the detail view renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BillDetail {
    pub lines: Vec<BillLine>,
    pub advance_total: f64,
    pub grand_total: f64,
}

fn material_label(entry: &MaterialEntry) -> String {
    let agent = entry.agent_name.trim();
    if agent.is_empty() {
        String::from("Material")
    } else {
        agent.to_string()
    }
}

/// Aggregates loaded source rows into a report.
///
/// Builds one row per included source row, accumulates the grand
/// totals (`grand = labour + material + expense - advance`), and fills
/// the dimension-by-site cross-tabs, each cell accumulating the row's
/// payable total only.
#[must_use]
pub fn aggregate(sources: &SourceRows, filter: &ReportFilter, order: ReportOrder) -> Report {
    let mut report = Report::default();

    if filter.includes_civil() {
        for source in &sources.civil {
            let row = &source.row;
            let advance = sources
                .civil_advances
                .get(&(row.site_id, row.team_id, row.date))
                .copied()
                .unwrap_or(0.0);
            let total = net_total(row.labour_amount, advance);

            report.totals.labour += row.labour_amount;
            report.totals.advance += advance;
            *report
                .team_site_totals
                .entry(source.team_name.clone())
                .or_default()
                .entry(source.site_name.clone())
                .or_default() += total;

            report.rows.push(ReportRow {
                date: row.date,
                site_name: source.site_name.clone(),
                category: Category::Civil,
                label: source.team_name.clone(),
                labour: row.labour_amount,
                material: 0.0,
                advance,
                total,
            });
        }
    }

    if filter.includes_departments() {
        for source in &sources.departments {
            let row = &source.row;
            let total = net_total(row.labour_amount, row.advance_amount);

            report.totals.labour += row.labour_amount;
            report.totals.advance += row.advance_amount;
            *report
                .department_site_totals
                .entry(source.department_name.clone())
                .or_default()
                .entry(source.site_name.clone())
                .or_default() += total;

            report.rows.push(ReportRow {
                date: row.date,
                site_name: source.site_name.clone(),
                category: Category::Department,
                label: source.department_name.clone(),
                labour: row.labour_amount,
                material: 0.0,
                advance: row.advance_amount,
                total,
            });
        }
    }

    if filter.includes_materials() {
        for source in &sources.materials {
            let row = &source.row;
            let label = material_label(row);
            let total = net_total(row.total, row.advance);

            report.totals.material += row.total;
            report.totals.advance += row.advance;
            *report
                .material_site_totals
                .entry(label.clone())
                .or_default()
                .entry(source.site_name.clone())
                .or_default() += total;

            report.rows.push(ReportRow {
                date: row.date,
                site_name: source.site_name.clone(),
                category: Category::Material,
                label,
                labour: 0.0,
                material: row.total,
                advance: row.advance,
                total,
            });
        }
    }

    if filter.includes_expenses() {
        for source in &sources.expenses {
            let row = &source.row;

            report.totals.expense += row.amount;
            *report
                .expense_site_totals
                .entry(row.title.clone())
                .or_default()
                .entry(source.site_name.clone())
                .or_default() += row.amount;

            report.rows.push(ReportRow {
                date: row.date,
                site_name: source.site_name.clone(),
                category: Category::Expense,
                label: row.title.clone(),
                labour: 0.0,
                material: 0.0,
                advance: 0.0,
                total: row.amount,
            });
        }
    }

    report.totals.grand_total = report.totals.labour + report.totals.material
        + report.totals.expense
        - report.totals.advance;

    match order {
        ReportOrder::DateDescending => {
            report.rows.sort_by(|a, b| b.date.cmp(&a.date));
        }
        ReportOrder::Printable => {
            report.rows.sort_by(|a, b| {
                (a.date, &a.site_name, a.category.sort_rank(), &a.label).cmp(&(
                    b.date,
                    &b.site_name,
                    b.category.sort_rank(),
                    &b.label,
                ))
            });
        }
    }

    report
}

fn collect_bill(lines: BTreeMap<String, (f64, f64)>) -> BillDetail {
    let mut detail = BillDetail::default();
    for (site_name, (advance, total)) in lines {
        detail.advance_total += advance;
        detail.grand_total += total;
        detail.lines.push(BillLine {
            site_name,
            advance,
            total,
        });
    }
    detail
}

/// A team's civil bill over a range, grouped by site.
#[must_use]
pub fn civil_bill(
    rows: &[CivilSourceRow],
    advances: &BTreeMap<(i64, i64, Date), f64>,
) -> BillDetail {
    let mut by_site: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for source in rows {
        let row = &source.row;
        let advance = advances
            .get(&(row.site_id, row.team_id, row.date))
            .copied()
            .unwrap_or(0.0);
        let cell = by_site.entry(source.site_name.clone()).or_default();
        cell.0 += advance;
        cell.1 += net_total(row.labour_amount, advance);
    }
    collect_bill(by_site)
}

/// A department's bill over a range, grouped by site.
#[must_use]
pub fn department_bill(rows: &[DepartmentSourceRow]) -> BillDetail {
    let mut by_site: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for source in rows {
        let row = &source.row;
        let cell = by_site.entry(source.site_name.clone()).or_default();
        cell.0 += row.advance_amount;
        cell.1 += net_total(row.labour_amount, row.advance_amount);
    }
    collect_bill(by_site)
}

/// A material agent's bill over a range, grouped by site. The caller
/// pre-filters the rows to one agent.
#[must_use]
pub fn material_bill(rows: &[MaterialSourceRow]) -> BillDetail {
    let mut by_site: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for source in rows {
        let row = &source.row;
        let cell = by_site.entry(source.site_name.clone()).or_default();
        cell.0 += row.advance;
        cell.1 += net_total(row.total, row.advance);
    }
    collect_bill(by_site)
}

/// An expense title's bill over a range, grouped by site. Expenses
/// carry no advance.
#[must_use]
pub fn expense_bill(rows: &[ExpenseSourceRow]) -> BillDetail {
    let mut by_site: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for source in rows {
        let cell = by_site.entry(source.site_name.clone()).or_default();
        cell.1 += source.row.amount;
    }
    collect_bill(by_site)
}
