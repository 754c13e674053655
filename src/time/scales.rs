// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reversible conversions between UT, UTC, TT, TDB and TAI.

use super::delta_t::delta_t_seconds;
use crate::constants::{ERFA_TTMTAI, J2000};
use crate::error::Result;

const TT_TO_UT_MAX_ITERATIONS: u32 = 5;
const TT_TO_UT_CONVERGENCE_DAYS: f64 = 1e-8;

/// `TT = UT + ΔT(UT)`. (spec.md §4.B)
pub fn ut_to_tt(jd_ut: f64) -> Result<f64> {
    Ok(jd_ut + delta_t_seconds(jd_ut)? / 86400.0)
}

/// The inverse of [`ut_to_tt`], found by fixed-point iteration since
/// `ΔT` is itself a function of UT, not TT. (spec.md §4.B)
pub fn tt_to_ut(jd_tt: f64) -> Result<f64> {
    let mut u = jd_tt - delta_t_seconds(jd_tt)? / 86400.0;
    for _ in 0..TT_TO_UT_MAX_ITERATIONS {
        let next = jd_tt - delta_t_seconds(u)? / 86400.0;
        if (next - u).abs() < TT_TO_UT_CONVERGENCE_DAYS {
            return Ok(next);
        }
        u = next;
    }
    Ok(u)
}

/// `UT1 ≡ UTC` at this engine's precision floor (`UT1 − UTC ≤ 0.9 s`).
pub fn ut_to_utc(jd_ut: f64) -> f64 {
    jd_ut
}

/// `UTC ≡ UT1` at this engine's precision floor.
pub fn utc_to_ut(jd_utc: f64) -> f64 {
    jd_utc
}

/// `UTC → TT`, composed from [`utc_to_ut`] and [`ut_to_tt`].
pub fn utc_to_tt(jd_utc: f64) -> Result<f64> {
    ut_to_tt(utc_to_ut(jd_utc))
}

/// `TT = TAI + 32.184 s`, a fixed offset (no leap seconds affect it,
/// since both scales tick at the SI-second rate). (spec.md §1)
pub fn tai_to_tt(jd_tai: f64) -> f64 {
    jd_tai + ERFA_TTMTAI / 86400.0
}

/// The inverse of [`tai_to_tt`].
pub fn tt_to_tai(jd_tt: f64) -> f64 {
    jd_tt - ERFA_TTMTAI / 86400.0
}

/// The periodic TT-TDB correction, radians-free, in days.
fn tt_tdb_correction(jd_tt: f64) -> f64 {
    let g = ((357.53 + 0.98560028 * (jd_tt - J2000)).rem_euclid(360.0)).to_radians();
    (0.001658 * g.sin() + 0.000014 * (2.0 * g).sin()) / 86400.0
}

/// `TDB = TT + [0.001658·sin(g) + 0.000014·sin(2g)] / 86400`. (spec.md §4.B)
pub fn tt_to_tdb(jd_tt: f64) -> f64 {
    jd_tt + tt_tdb_correction(jd_tt)
}

/// The inverse of [`tt_to_tdb`]; not iterated, since the correction is
/// orders of magnitude below `ΔT`'s own uncertainty. (spec.md §4.B)
pub fn tdb_to_tt(jd_tdb: f64) -> f64 {
    jd_tdb - tt_tdb_correction(jd_tdb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ut_tt_round_trip() {
        for jd in [
            crate::time::jd::from_gregorian(1650, 3, 1, 0.0).unwrap(),
            crate::time::jd::from_gregorian(1900, 6, 15, 12.0).unwrap(),
            J2000,
            crate::time::jd::from_gregorian(2100, 12, 31, 0.0).unwrap(),
        ] {
            let tt = ut_to_tt(jd).unwrap();
            let back = tt_to_ut(tt).unwrap();
            assert_abs_diff_eq!(back, jd, epsilon = 1e-8);
        }
    }

    #[test]
    fn tdb_tt_round_trip_is_identity() {
        for jd in [J2000, J2000 + 10000.0, J2000 - 50000.0] {
            let tdb = tt_to_tdb(jd);
            let back = tdb_to_tt(tdb);
            assert_abs_diff_eq!(back, jd, epsilon = 1e-10);
        }
    }

    #[test]
    fn ut_to_utc_is_identity() {
        assert_eq!(ut_to_utc(J2000), J2000);
    }

    #[test]
    fn tai_tt_round_trip_is_identity() {
        for jd in [J2000, J2000 + 10000.0, J2000 - 50000.0] {
            assert_abs_diff_eq!(tt_to_tai(tai_to_tt(jd)), jd, epsilon = 1e-12);
        }
    }

    #[test]
    fn tt_is_tai_plus_32_184_seconds() {
        assert_abs_diff_eq!(
            (tai_to_tt(J2000) - J2000) * 86400.0,
            32.184,
            epsilon = 1e-9
        );
    }
}
