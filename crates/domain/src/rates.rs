// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rate resolution over a team's versioned rate history.
//!
//! This is the single resolution contract: every cost computation and
//! every read model goes through `resolve_team_rate` rather than
//! reimplementing the ordering inline.

use crate::types::TeamRate;
use time::Date;

/// Resolves the rate version effective for a team on `as_of`.
///
/// Only versions with `from_date <= as_of` qualify. Among qualifying
/// versions, a locked version with the greatest `from_date` wins; if no
/// locked version qualifies, the unlocked version with the greatest
/// `from_date` is used. A locked version pins the pay scale even when a
/// newer unlocked version exists, so bills finalized against it stay
/// stable.
///
/// # Arguments
///
/// * `history` - All rate versions of one team, in any order
/// * `as_of` - The date the rate must be effective on
///
/// # Returns
///
/// The effective version, or `None` when no version qualifies. Callers
/// computing cost treat `None` as labour 0, never as an error.
#[must_use]
pub fn resolve_team_rate(history: &[TeamRate], as_of: Date) -> Option<&TeamRate> {
    history
        .iter()
        .filter(|rate| rate.from_date <= as_of)
        .max_by_key(|rate| (rate.is_locked, rate.from_date))
}
