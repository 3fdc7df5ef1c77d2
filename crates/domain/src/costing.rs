// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cost calculation for daily entries.
//!
//! Pure, deterministic arithmetic. Half-day counts are paid at exactly
//! half the full rate (true division), so an odd full rate does not
//! lose the fractional half-day pay. The floored half rates on
//! `TeamRate`/`DefaultRate` are for display and snapshots only.

use crate::types::{DefaultRate, TeamRate};

/// Gross civil labour for one team-day.
///
/// `mf`/`mh` are full/half mason counts, `hf`/`hh` full/half helper
/// counts. Linear in each count:
/// `mf*mason + hf*helper + mh*(mason/2) + hh*(helper/2)`.
///
/// A team with no effective rate earns 0; the caller decides whether a
/// zero row is kept (it is not, per the ledger lifecycle rule).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn civil_labour(mf: i64, hf: i64, mh: i64, hh: i64, rate: Option<&TeamRate>) -> f64 {
    let Some(rate) = rate else {
        return 0.0;
    };
    let mason = rate.mason_full_rate as f64;
    let helper = rate.helper_full_rate as f64;

    (mf as f64).mul_add(
        mason,
        (hf as f64).mul_add(
            helper,
            (mh as f64).mul_add(mason / 2.0, (hh as f64) * (helper / 2.0)),
        ),
    )
}

/// Gross department labour for one department-day:
/// `full*rate + half*(rate/2)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn department_labour(full_count: i64, half_count: i64, rate: &DefaultRate) -> f64 {
    let full_rate = rate.full_day_rate as f64;
    (full_count as f64).mul_add(full_rate, (half_count as f64) * (full_rate / 2.0))
}

/// Gross total of one material line: `quantity * rate`.
#[must_use]
pub fn material_line_total(quantity: f64, rate: f64) -> f64 {
    quantity * rate
}

/// Payable total of a transaction: gross labour or material minus the
/// advance netted against it. Gross and advance stay reportable
/// separately; this is what bills sum.
#[must_use]
pub fn net_total(gross: f64, advance: f64) -> f64 {
    gross - advance
}
