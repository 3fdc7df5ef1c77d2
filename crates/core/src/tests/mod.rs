// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod apply_tests;
mod copy_tests;

use site_ledger_domain::{CivilDailyWork, DefaultRate, MaterialEntry, TeamRate};
use time::{Date, Month};

pub const SITE: i64 = 1;

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

pub fn work_date() -> Date {
    date(2024, Month::March, 15)
}

pub fn team_rate(team_id: i64, mason: i64, helper: i64) -> TeamRate {
    TeamRate {
        rate_id: None,
        team_id,
        mason_full_rate: mason,
        helper_full_rate: helper,
        from_date: date(2024, Month::January, 1),
        is_locked: false,
    }
}

pub fn default_rate(department_id: i64, full: i64) -> DefaultRate {
    DefaultRate {
        rate_id: None,
        department_id,
        full_day_rate: full,
        is_locked: false,
    }
}

pub fn civil_row(site_id: i64, team_id: i64, on: Date, labour: f64, total: f64) -> CivilDailyWork {
    CivilDailyWork {
        site_id,
        team_id,
        date: on,
        mason_full: 2,
        mason_half: 0,
        helper_full: 1,
        helper_half: 0,
        labour_amount: labour,
        total_amount: total,
    }
}

pub fn material_row(site_id: i64, on: Date, agent: &str, total: f64, advance: f64) -> MaterialEntry {
    MaterialEntry {
        entry_id: None,
        site_id,
        date: on,
        agent_name: String::from(agent),
        name: String::from("Cement"),
        quantity: 10.0,
        unit: String::from("bag"),
        rate: total / 10.0,
        advance,
        total,
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
