// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{SITE, civil_row, date, material_row};
use crate::{CopyFlags, DayRows, plan_day_copy};
use site_ledger_domain::{CivilAdvance, SiteDailyNote};
use time::Month;

fn source_date() -> time::Date {
    date(2024, Month::March, 14)
}

fn target_date() -> time::Date {
    date(2024, Month::March, 15)
}

fn source_rows() -> DayRows {
    DayRows {
        civil: vec![civil_row(SITE, 1, source_date(), 1300.0, 1100.0)],
        advances: vec![CivilAdvance {
            site_id: SITE,
            team_id: 1,
            date: source_date(),
            amount: 200.0,
        }],
        departments: Vec::new(),
        materials: vec![material_row(SITE, source_date(), "X", 500.0, 100.0)],
        note: Some(SiteDailyNote {
            site_id: SITE,
            date: source_date(),
            description: String::from("Footing work"),
        }),
    }
}

#[test]
fn test_copy_redates_rows_without_recomputing() {
    let plan = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &DayRows::default(),
        target_date(),
    );

    assert_eq!(plan.civil.len(), 1);
    assert_eq!(plan.civil[0].date, target_date());
    assert!((plan.civil[0].labour_amount - 1300.0).abs() < 1e-9);
    assert!((plan.civil[0].total_amount - 1100.0).abs() < 1e-9);
    assert_eq!(plan.advances.len(), 1);
    assert_eq!(plan.advances[0].date, target_date());
    assert_eq!(plan.materials.len(), 1);
    assert!(!plan.clear_materials);
    assert_eq!(plan.note.as_ref().map(|n| n.date), Some(target_date()));
}

#[test]
fn test_copy_preserving_skips_existing_keys() {
    let target = DayRows {
        civil: vec![civil_row(SITE, 1, target_date(), 999.0, 999.0)],
        ..DayRows::default()
    };

    let plan = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &target,
        target_date(),
    );

    assert!(plan.civil.is_empty());
    // Advance key absent on target, so it still copies.
    assert_eq!(plan.advances.len(), 1);
}

#[test]
fn test_copy_replacing_overwrites_existing_keys() {
    let target = DayRows {
        civil: vec![civil_row(SITE, 1, target_date(), 999.0, 999.0)],
        ..DayRows::default()
    };

    let plan = plan_day_copy(
        &CopyFlags::all_replacing(),
        &source_rows(),
        &target,
        target_date(),
    );

    assert_eq!(plan.civil.len(), 1);
    assert!((plan.civil[0].labour_amount - 1300.0).abs() < 1e-9);
}

#[test]
fn test_copy_materials_are_all_or_nothing_without_replace() {
    let target = DayRows {
        materials: vec![material_row(SITE, target_date(), "Y", 50.0, 0.0)],
        ..DayRows::default()
    };

    let plan = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &target,
        target_date(),
    );

    assert!(plan.materials.is_empty());
    assert!(!plan.clear_materials);
}

#[test]
fn test_copy_materials_replace_clears_target_first() {
    let target = DayRows {
        materials: vec![material_row(SITE, target_date(), "Y", 50.0, 0.0)],
        ..DayRows::default()
    };

    let plan = plan_day_copy(
        &CopyFlags::all_replacing(),
        &source_rows(),
        &target,
        target_date(),
    );

    assert!(plan.clear_materials);
    assert_eq!(plan.materials.len(), 1);
    assert_eq!(plan.materials[0].agent_name, "X");
}

#[test]
fn test_copy_note_preserving_keeps_existing_note() {
    let target = DayRows {
        note: Some(SiteDailyNote {
            site_id: SITE,
            date: target_date(),
            description: String::from("Already written"),
        }),
        ..DayRows::default()
    };

    let plan = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &target,
        target_date(),
    );
    assert!(plan.note.is_none());

    let replaced = plan_day_copy(
        &CopyFlags::all_replacing(),
        &source_rows(),
        &target,
        target_date(),
    );
    assert_eq!(
        replaced.note.map(|n| n.description),
        Some(String::from("Footing work"))
    );
}

#[test]
fn test_copy_empty_source_plans_nothing() {
    let plan = plan_day_copy(
        &CopyFlags::all_replacing(),
        &DayRows::default(),
        &source_rows(),
        target_date(),
    );

    assert!(plan.is_empty());
    assert!(!plan.clear_materials);
}

#[test]
fn test_copy_preserving_twice_is_idempotent() {
    // After the first copy the target holds the copied rows; planning
    // again with the same source must produce an empty plan.
    let first = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &DayRows::default(),
        target_date(),
    );

    let target = DayRows {
        civil: first.civil.clone(),
        advances: first.advances.clone(),
        departments: first.departments.clone(),
        materials: first.materials.clone(),
        note: first.note.clone(),
    };

    let second = plan_day_copy(
        &CopyFlags::all_preserving(),
        &source_rows(),
        &target,
        target_date(),
    );
    assert!(second.is_empty());
}

#[test]
fn test_copy_disabled_categories_are_skipped() {
    let flags = CopyFlags {
        civil: false,
        department: false,
        material: false,
        description: false,
        replace: true,
    };

    let plan = plan_day_copy(&flags, &source_rows(), &DayRows::default(), target_date());
    assert!(plan.is_empty());
}
