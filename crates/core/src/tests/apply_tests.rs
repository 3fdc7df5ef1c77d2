// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use crate::tests::{SITE, assert_close, default_rate, team_rate, work_date};
use crate::{
    AdvanceAction, CoreError, DaySheet, DepartmentLine, ExpenseLine, MaterialLine, NoteAction,
    RowAction, TeamLine, plan_day_sheet, plan_department_line, plan_team_line,
};
use site_ledger_domain::DomainError;

fn team_line(team_id: i64) -> TeamLine {
    TeamLine {
        team_id,
        mason_full: 0,
        mason_half: 0,
        helper_full: 0,
        helper_half: 0,
        advance: None,
    }
}

#[test]
fn test_team_line_computes_labour_and_net_total() {
    let rate = team_rate(1, 500, 300);
    let line = TeamLine {
        mason_full: 2,
        helper_full: 1,
        advance: Some(200.0),
        ..team_line(1)
    };

    let plan = plan_team_line(SITE, work_date(), &line, Some(&rate), 0.0);

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_close(row.labour_amount, 1300.0);
    assert_close(row.total_amount, 1100.0);
    assert!(matches!(plan.advance, AdvanceAction::Write(a) if (a - 200.0).abs() < 1e-9));
}

#[test]
fn test_team_line_all_zero_deletes_row() {
    let rate = team_rate(1, 500, 300);

    let plan = plan_team_line(SITE, work_date(), &team_line(1), Some(&rate), 0.0);

    assert_eq!(plan.work, RowAction::Delete);
    assert!(matches!(plan.advance, AdvanceAction::Keep));
}

#[test]
fn test_team_line_advance_alone_keeps_row_alive() {
    let rate = team_rate(1, 500, 300);
    let line = TeamLine {
        advance: Some(150.0),
        ..team_line(1)
    };

    let plan = plan_team_line(SITE, work_date(), &line, Some(&rate), 0.0);

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_close(row.labour_amount, 0.0);
    assert_close(row.total_amount, -150.0);
}

#[test]
fn test_team_line_absent_advance_uses_stored_value() {
    let rate = team_rate(1, 500, 300);
    let line = TeamLine {
        mason_full: 1,
        ..team_line(1)
    };

    let plan = plan_team_line(SITE, work_date(), &line, Some(&rate), 120.0);

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_close(row.total_amount, 380.0);
    assert!(matches!(plan.advance, AdvanceAction::Keep));
}

#[test]
fn test_team_line_explicit_zero_advance_clears_stored_row() {
    let rate = team_rate(1, 500, 300);
    let line = TeamLine {
        mason_full: 1,
        advance: Some(0.0),
        ..team_line(1)
    };

    let plan = plan_team_line(SITE, work_date(), &line, Some(&rate), 120.0);

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_close(row.total_amount, 500.0);
    assert!(matches!(plan.advance, AdvanceAction::Clear));
}

#[test]
fn test_team_line_without_rate_earns_zero_labour() {
    let line = TeamLine {
        mason_full: 3,
        ..team_line(1)
    };

    let plan = plan_team_line(SITE, work_date(), &line, None, 0.0);

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_close(row.labour_amount, 0.0);
}

#[test]
fn test_department_line_snapshots_rates() {
    let rate = default_rate(7, 701);
    let line = DepartmentLine {
        department_id: 7,
        full_day_count: 2,
        half_day_count: 1,
        advance: 100.0,
    };

    let plan = plan_department_line(SITE, work_date(), &line, Some(&rate)).unwrap();

    let RowAction::Upsert(row) = plan.work else {
        panic!("expected upsert");
    };
    assert_eq!(row.full_day_rate, 701);
    assert_eq!(row.half_day_rate, 350);
    assert_close(row.labour_amount, 1402.0 + 350.5);
    assert_close(row.total_amount, 1402.0 + 350.5 - 100.0);
}

#[test]
fn test_department_line_without_rate_fails() {
    let line = DepartmentLine {
        department_id: 7,
        full_day_count: 1,
        half_day_count: 0,
        advance: 0.0,
    };

    let result = plan_department_line(SITE, work_date(), &line, None);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::RateNotConfigured { department_id: 7 }
        ))
    ));
}

#[test]
fn test_department_line_all_zero_deletes_without_rate() {
    let line = DepartmentLine {
        department_id: 7,
        full_day_count: 0,
        half_day_count: 0,
        advance: 0.0,
    };

    let plan = plan_department_line(SITE, work_date(), &line, None).unwrap();
    assert_eq!(plan.work, RowAction::Delete);
}

#[test]
fn test_day_sheet_truncates_material_list_at_blank_name() {
    let sheet = DaySheet {
        materials: vec![
            MaterialLine {
                agent_name: String::from("X"),
                name: String::from("Cement"),
                quantity: 10.0,
                unit: String::from("bag"),
                rate: 50.0,
                advance: 100.0,
            },
            MaterialLine {
                agent_name: String::new(),
                name: String::from("  "),
                quantity: 5.0,
                unit: String::new(),
                rate: 20.0,
                advance: 0.0,
            },
            MaterialLine {
                agent_name: String::from("Y"),
                name: String::from("Sand"),
                quantity: 1.0,
                unit: String::from("ton"),
                rate: 900.0,
                advance: 0.0,
            },
        ],
        ..DaySheet::default()
    };

    let plan = plan_day_sheet(
        SITE,
        work_date(),
        &sheet,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();

    assert_eq!(plan.materials.len(), 1);
    assert_close(plan.materials[0].total, 500.0);
}

#[test]
fn test_day_sheet_truncates_expense_list_at_blank_title() {
    let sheet = DaySheet {
        expenses: vec![
            ExpenseLine {
                title: String::from("Diesel"),
                owner: Some(String::from("Store")),
                amount: 750.0,
                notes: String::new(),
            },
            ExpenseLine {
                title: String::new(),
                owner: None,
                amount: 10.0,
                notes: String::new(),
            },
        ],
        ..DaySheet::default()
    };

    let plan = plan_day_sheet(
        SITE,
        work_date(),
        &sheet,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();

    assert_eq!(plan.expenses.len(), 1);
    assert_eq!(plan.expenses[0].title, "Diesel");
}

#[test]
fn test_day_sheet_resolves_rate_per_team() {
    let mut histories = BTreeMap::new();
    histories.insert(1, vec![team_rate(1, 500, 300)]);

    let sheet = DaySheet {
        teams: vec![TeamLine {
            mason_full: 1,
            ..team_line(1)
        }],
        ..DaySheet::default()
    };

    let plan = plan_day_sheet(
        SITE,
        work_date(),
        &sheet,
        &histories,
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();

    let RowAction::Upsert(row) = &plan.teams[0].work else {
        panic!("expected upsert");
    };
    assert_close(row.labour_amount, 500.0);
}

#[test]
fn test_day_sheet_note_actions() {
    let untouched = plan_day_sheet(
        SITE,
        work_date(),
        &DaySheet::default(),
        &BTreeMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();
    assert_eq!(untouched.note, NoteAction::Keep);

    let cleared = plan_day_sheet(
        SITE,
        work_date(),
        &DaySheet {
            note: Some(String::from("   ")),
            ..DaySheet::default()
        },
        &BTreeMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();
    assert_eq!(cleared.note, NoteAction::Clear);

    let written = plan_day_sheet(
        SITE,
        work_date(),
        &DaySheet {
            note: Some(String::from("Slab casting")),
            ..DaySheet::default()
        },
        &BTreeMap::new(),
        &BTreeMap::new(),
        &BTreeMap::new(),
    )
    .unwrap();
    assert_eq!(written.note, NoteAction::Write(String::from("Slab casting")));
}
