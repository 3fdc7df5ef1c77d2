// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    assert_close, bootstrapped, civil_sheet, date, department_line, material_line, team_line,
};
use site_ledger::{Category, DaySheet, ExpenseLine, ReportFilter, ReportOrder};
use time::Month;

/// Seeds three days of mixed entries across March 10-12.
fn seeded() -> crate::tests::Fixture {
    let mut fx = bootstrapped();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            date(2024, Month::March, 10),
            &DaySheet {
                teams: vec![team_line(fx.team_a, 2, 1, Some(200.0))],
                departments: vec![department_line(fx.electrical, 2, 0, 300.0)],
                ..DaySheet::default()
            },
        )
        .unwrap();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            date(2024, Month::March, 11),
            &DaySheet {
                materials: vec![material_line("Agent X", "Cement", 10.0, 50.0, 100.0)],
                ..DaySheet::default()
            },
        )
        .unwrap();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            date(2024, Month::March, 12),
            &DaySheet {
                expenses: vec![ExpenseLine {
                    title: String::from("Diesel"),
                    owner: None,
                    amount: 750.0,
                    notes: String::new(),
                }],
                ..DaySheet::default()
            },
        )
        .unwrap();

    fx
}

fn march(day: u8) -> time::Date {
    date(2024, Month::March, day)
}

#[test]
fn test_report_grand_totals() {
    let mut fx = seeded();

    let report = fx
        .persistence
        .fetch_report(
            &ReportFilter::default(),
            march(1),
            march(31),
            ReportOrder::DateDescending,
        )
        .unwrap();

    // labour: civil 1300 + electrical 1400; material 500; expense 750;
    // advances: 200 + 300 + 100.
    assert_close(report.totals.labour, 2700.0);
    assert_close(report.totals.material, 500.0);
    assert_close(report.totals.expense, 750.0);
    assert_close(report.totals.advance, 600.0);
    assert_close(report.totals.grand_total, 2700.0 + 500.0 + 750.0 - 600.0);
}

#[test]
fn test_report_rows_sorted_date_descending() {
    let mut fx = seeded();

    let report = fx
        .persistence
        .fetch_report(
            &ReportFilter::default(),
            march(1),
            march(31),
            ReportOrder::DateDescending,
        )
        .unwrap();

    assert_eq!(report.rows.first().map(|r| r.date), Some(march(12)));
    assert_eq!(report.rows.last().map(|r| r.date), Some(march(10)));
}

#[test]
fn test_report_range_excludes_outside_dates() {
    let mut fx = seeded();

    let report = fx
        .persistence
        .fetch_report(
            &ReportFilter::default(),
            march(11),
            march(11),
            ReportOrder::DateDescending,
        )
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].category, Category::Material);
}

#[test]
fn test_report_additivity_over_range_split() {
    let mut fx = seeded();

    let filter = ReportFilter::default();
    let whole = fx
        .persistence
        .fetch_report(&filter, march(1), march(31), ReportOrder::DateDescending)
        .unwrap();
    let first = fx
        .persistence
        .fetch_report(&filter, march(1), march(10), ReportOrder::DateDescending)
        .unwrap();
    let second = fx
        .persistence
        .fetch_report(&filter, march(11), march(31), ReportOrder::DateDescending)
        .unwrap();

    assert_close(
        whole.totals.grand_total,
        first.totals.grand_total + second.totals.grand_total,
    );
}

#[test]
fn test_report_advance_not_misattributed_across_sites() {
    let mut fx = bootstrapped();
    let config = crate::tests::test_config();
    let other_site = fx.persistence.create_site("Beta", &config).unwrap();

    // Team A works both sites on the same day; only Alpha has an
    // advance.
    fx.persistence
        .save_day_sheet(
            fx.site_id,
            march(10),
            &civil_sheet(vec![team_line(fx.team_a, 2, 1, Some(200.0))]),
        )
        .unwrap();
    fx.persistence
        .save_day_sheet(
            other_site,
            march(10),
            &civil_sheet(vec![team_line(fx.team_a, 1, 0, None)]),
        )
        .unwrap();

    let report = fx
        .persistence
        .fetch_report(
            &ReportFilter::default(),
            march(10),
            march(10),
            ReportOrder::DateDescending,
        )
        .unwrap();

    let beta_row = report
        .rows
        .iter()
        .find(|r| r.site_name == "Beta")
        .unwrap();
    assert_close(beta_row.advance, 0.0);
    assert_close(beta_row.total, 500.0);

    assert_close(report.totals.advance, 200.0);
}

#[test]
fn test_report_team_filter_drops_departments_materials_expenses() {
    let mut fx = seeded();

    let filter = ReportFilter {
        team_id: Some(fx.team_a),
        ..ReportFilter::default()
    };
    let report = fx
        .persistence
        .fetch_report(&filter, march(1), march(31), ReportOrder::DateDescending)
        .unwrap();

    assert!(!report.rows.is_empty());
    assert!(report.rows.iter().all(|r| r.category == Category::Civil));
}

#[test]
fn test_report_material_only_filter() {
    let mut fx = seeded();

    let filter = ReportFilter {
        material_only: true,
        ..ReportFilter::default()
    };
    let report = fx
        .persistence
        .fetch_report(&filter, march(1), march(31), ReportOrder::DateDescending)
        .unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].category, Category::Material);
    assert_close(report.totals.grand_total, 400.0);
}

#[test]
fn test_report_cross_tabs() {
    let mut fx = seeded();

    let report = fx
        .persistence
        .fetch_report(
            &ReportFilter::default(),
            march(1),
            march(31),
            ReportOrder::DateDescending,
        )
        .unwrap();

    assert_close(report.team_site_totals["Team A"]["Alpha"], 1100.0);
    assert_close(report.department_site_totals["Electrical"]["Alpha"], 1100.0);
    assert_close(report.material_site_totals["Agent X"]["Alpha"], 400.0);
    assert_close(report.expense_site_totals["Diesel"]["Alpha"], 750.0);
}

#[test]
fn test_site_period_totals_match_report() {
    let mut fx = seeded();

    let totals = fx
        .persistence
        .site_period_totals(fx.site_id, march(1), march(31))
        .unwrap();

    assert_close(totals.grand_total, 2700.0 + 500.0 + 750.0 - 600.0);
}
