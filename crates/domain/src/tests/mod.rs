// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod rates;
mod validation;

use crate::TeamRate;
use time::{Date, Month};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

pub fn rate_version(
    team_id: i64,
    mason: i64,
    helper: i64,
    from: Date,
    is_locked: bool,
) -> TeamRate {
    TeamRate {
        rate_id: None,
        team_id,
        mason_full_rate: mason,
        helper_full_rate: helper,
        from_date: from,
        is_locked,
    }
}
