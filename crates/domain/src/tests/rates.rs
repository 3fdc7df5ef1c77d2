// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{date, rate_version};
use crate::{TeamRate, resolve_team_rate};
use time::Month;

#[test]
fn test_resolve_returns_none_for_empty_history() {
    let history: Vec<TeamRate> = Vec::new();
    assert!(resolve_team_rate(&history, date(2024, Month::March, 1)).is_none());
}

#[test]
fn test_resolve_returns_none_before_first_version() {
    let history = vec![rate_version(1, 500, 300, date(2024, Month::January, 1), false)];
    assert!(resolve_team_rate(&history, date(2023, Month::December, 31)).is_none());
}

#[test]
fn test_resolve_picks_most_recent_unlocked_version() {
    let history = vec![
        rate_version(1, 500, 300, date(2024, Month::January, 1), false),
        rate_version(1, 600, 350, date(2024, Month::February, 1), false),
    ];

    let resolved = resolve_team_rate(&history, date(2024, Month::March, 1));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(600));
}

#[test]
fn test_resolve_before_second_version_uses_first() {
    let history = vec![
        rate_version(1, 500, 300, date(2024, Month::January, 1), false),
        rate_version(1, 600, 350, date(2024, Month::February, 1), true),
    ];

    let resolved = resolve_team_rate(&history, date(2024, Month::January, 15));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(500));
}

#[test]
fn test_resolve_locked_version_wins_over_newer_unlocked() {
    let history = vec![
        rate_version(1, 500, 300, date(2024, Month::January, 1), false),
        rate_version(1, 600, 350, date(2024, Month::February, 1), true),
        rate_version(1, 700, 400, date(2024, Month::March, 1), false),
    ];

    let resolved = resolve_team_rate(&history, date(2024, Month::April, 1));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(600));
    assert_eq!(resolved.map(|r| r.is_locked), Some(true));
}

#[test]
fn test_resolve_ignores_locked_version_not_yet_effective() {
    let history = vec![
        rate_version(1, 500, 300, date(2024, Month::January, 1), false),
        rate_version(1, 600, 350, date(2024, Month::June, 1), true),
    ];

    let resolved = resolve_team_rate(&history, date(2024, Month::March, 1));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(500));
}

#[test]
fn test_resolve_newest_locked_wins_among_locked() {
    let history = vec![
        rate_version(1, 500, 300, date(2024, Month::January, 1), true),
        rate_version(1, 600, 350, date(2024, Month::February, 1), true),
    ];

    let resolved = resolve_team_rate(&history, date(2024, Month::March, 1));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(600));
}

#[test]
fn test_resolve_on_exact_from_date_includes_version() {
    let history = vec![rate_version(1, 500, 300, date(2024, Month::February, 1), false)];

    let resolved = resolve_team_rate(&history, date(2024, Month::February, 1));
    assert_eq!(resolved.map(|r| r.mason_full_rate), Some(500));
}

#[test]
fn test_half_rates_floor_odd_full_rates() {
    let rate = rate_version(1, 501, 299, date(2024, Month::January, 1), false);
    assert_eq!(rate.mason_half_rate(), 250);
    assert_eq!(rate.helper_half_rate(), 149);
}
