// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod bill_tests;
mod report_tests;

use crate::Persistence;
use site_ledger::{BootstrapConfig, DaySheet, DepartmentLine, MaterialLine, TeamLine};
use time::{Date, Month};

pub fn test_config() -> BootstrapConfig {
    BootstrapConfig::default()
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

pub fn work_date() -> Date {
    date(2024, Month::March, 15)
}

/// A bootstrapped store: one site, two teams (team A with a rate
/// history), and the default departments with Electrical priced.
pub struct Fixture {
    pub persistence: Persistence,
    pub site_id: i64,
    pub team_a: i64,
    pub team_b: i64,
    pub electrical: i64,
}

pub fn department_id(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .list_departments()
        .unwrap()
        .into_iter()
        .find(|d| d.name == name)
        .and_then(|d| d.department_id)
        .expect("department exists")
}

pub fn bootstrapped() -> Fixture {
    let config = test_config();
    let mut persistence = Persistence::new_in_memory().unwrap();

    let site_id = persistence.create_site("Alpha", &config).unwrap();
    let team_a = persistence.create_team("Team A").unwrap();
    let team_b = persistence.create_team("Team B").unwrap();

    persistence
        .set_team_rate(team_a, 500, 300, date(2024, Month::January, 1), false)
        .unwrap();

    let electrical = department_id(&mut persistence, "Electrical");
    persistence
        .set_default_rate(electrical, 700, &config)
        .unwrap();

    Fixture {
        persistence,
        site_id,
        team_a,
        team_b,
        electrical,
    }
}

pub fn team_line(team_id: i64, mf: i64, hf: i64, advance: Option<f64>) -> TeamLine {
    TeamLine {
        team_id,
        mason_full: mf,
        mason_half: 0,
        helper_full: hf,
        helper_half: 0,
        advance,
    }
}

pub fn department_line(department_id: i64, full: i64, half: i64, advance: f64) -> DepartmentLine {
    DepartmentLine {
        department_id,
        full_day_count: full,
        half_day_count: half,
        advance,
    }
}

pub fn material_line(agent: &str, name: &str, quantity: f64, rate: f64, advance: f64) -> MaterialLine {
    MaterialLine {
        agent_name: String::from(agent),
        name: String::from(name),
        quantity,
        unit: String::from("unit"),
        rate,
        advance,
    }
}

pub fn civil_sheet(lines: Vec<TeamLine>) -> DaySheet {
    DaySheet {
        teams: lines,
        ..DaySheet::default()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
