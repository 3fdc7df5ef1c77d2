// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    assert_close, bootstrapped, civil_sheet, date, department_line, material_line, team_line,
    test_config,
};
use site_ledger::{DaySheet, ExpenseLine};
use time::Month;

fn march(day: u8) -> time::Date {
    date(2024, Month::March, day)
}

#[test]
fn test_team_bill_groups_by_site() {
    let mut fx = bootstrapped();
    let other_site = fx
        .persistence
        .create_site("Beta", &test_config())
        .unwrap();

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
            march(11),
            &civil_sheet(vec![team_line(fx.team_a, 1, 0, None)]),
        )
        .unwrap();

    let bill = fx
        .persistence
        .team_bill(fx.team_a, march(1), march(31))
        .unwrap();

    assert_eq!(bill.lines.len(), 2);
    let alpha = bill.lines.iter().find(|l| l.site_name == "Alpha").unwrap();
    assert_close(alpha.advance, 200.0);
    assert_close(alpha.total, 1100.0);
    let beta = bill.lines.iter().find(|l| l.site_name == "Beta").unwrap();
    assert_close(beta.advance, 0.0);
    assert_close(beta.total, 500.0);

    assert_close(bill.advance_total, 200.0);
    assert_close(bill.grand_total, 1600.0);
}

#[test]
fn test_material_agent_bill_for_one_day() {
    let mut fx = bootstrapped();

    // Agent X: (qty 10, rate 50, advance 100) and (qty 5, rate 20).
    fx.persistence
        .save_day_sheet(
            fx.site_id,
            march(10),
            &DaySheet {
                materials: vec![
                    material_line("Agent X", "Cement", 10.0, 50.0, 100.0),
                    material_line("Agent X", "Sand", 5.0, 20.0, 0.0),
                ],
                ..DaySheet::default()
            },
        )
        .unwrap();

    let bill = fx
        .persistence
        .material_agent_bill("Agent X", march(10), march(10))
        .unwrap();

    // total_raw = 500 + 100 = 600, advance = 100, payable = 500.
    assert_close(bill.advance_total, 100.0);
    assert_close(bill.grand_total, 500.0);
}

#[test]
fn test_material_agent_bill_excludes_other_agents() {
    let mut fx = bootstrapped();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            march(10),
            &DaySheet {
                materials: vec![
                    material_line("Agent X", "Cement", 10.0, 50.0, 0.0),
                    material_line("Agent Y", "Bricks", 100.0, 8.0, 0.0),
                ],
                ..DaySheet::default()
            },
        )
        .unwrap();

    let bill = fx
        .persistence
        .material_agent_bill("Agent Y", march(1), march(31))
        .unwrap();

    assert_close(bill.grand_total, 800.0);
}

#[test]
fn test_department_bill_nets_row_advances() {
    let mut fx = bootstrapped();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            march(10),
            &DaySheet {
                departments: vec![department_line(fx.electrical, 2, 1, 250.0)],
                ..DaySheet::default()
            },
        )
        .unwrap();

    let bill = fx
        .persistence
        .department_bill(fx.electrical, march(1), march(31))
        .unwrap();

    assert_eq!(bill.lines.len(), 1);
    assert_close(bill.advance_total, 250.0);
    assert_close(bill.grand_total, 1400.0 + 350.0 - 250.0);
}

#[test]
fn test_expense_title_bill_sums_amounts() {
    let mut fx = bootstrapped();

    fx.persistence
        .save_day_sheet(
            fx.site_id,
            march(10),
            &DaySheet {
                expenses: vec![
                    ExpenseLine {
                        title: String::from("Diesel"),
                        owner: None,
                        amount: 750.0,
                        notes: String::new(),
                    },
                    ExpenseLine {
                        title: String::from("Tea"),
                        owner: None,
                        amount: 50.0,
                        notes: String::new(),
                    },
                ],
                ..DaySheet::default()
            },
        )
        .unwrap();

    let bill = fx
        .persistence
        .expense_title_bill("Diesel", march(1), march(31))
        .unwrap();

    assert_close(bill.advance_total, 0.0);
    assert_close(bill.grand_total, 750.0);
}

#[test]
fn test_empty_bill_has_zero_totals() {
    let mut fx = bootstrapped();

    let bill = fx
        .persistence
        .team_bill(fx.team_a, march(1), march(31))
        .unwrap();

    assert!(bill.lines.is_empty());
    assert_close(bill.advance_total, 0.0);
    assert_close(bill.grand_total, 0.0);
}
