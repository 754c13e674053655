// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Greenwich and local sidereal time, via a simplified equation of
//! the equinoxes rather than the full IAU2000A/2006 nutation series.
//! (spec.md §4.H)

use crate::constants::J2000;

fn norm_hours(h: f64) -> f64 {
    h.rem_euclid(24.0)
}

/// Greenwich Mean Sidereal Time, hours. `jd_ut` drives the Earth-rotation
/// term, `jd_tt` the slow secular terms. (spec.md §4.H)
pub fn gmst_hours(jd_ut: f64, jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / 36525.0;
    let gmst_deg = 280.46061837 + 360.98564736629 * (jd_ut - J2000) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    norm_hours(gmst_deg / 15.0)
}

/// A simplified equation of the equinoxes, `Δψ·cos(ε)`, using a
/// two-argument truncated nutation series (mean longitudes of the Sun
/// and Moon, and the Moon's node) rather than the full series.
/// (spec.md §4.H)
fn equation_of_equinoxes_hours(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / 36525.0;

    let omega = (125.04 - 1934.136 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();

    let dpsi_arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let eps0 = crate::transform::mean_obliquity_rad(jd_tt);

    let eqeq_arcsec = dpsi_arcsec * eps0.cos();
    eqeq_arcsec / 15.0 / 3600.0
}

/// Greenwich Apparent Sidereal Time, hours: GMST plus the simplified
/// equation of the equinoxes. (spec.md §4.H)
pub fn gast_hours(jd_ut: f64, jd_tt: f64) -> f64 {
    norm_hours(gmst_hours(jd_ut, jd_tt) + equation_of_equinoxes_hours(jd_tt))
}

/// Local (mean) Sidereal Time at `longitude_east_deg`, hours.
/// (spec.md §4.H)
pub fn lst_hours(jd_ut: f64, jd_tt: f64, longitude_east_deg: f64) -> f64 {
    norm_hours(gmst_hours(jd_ut, jd_tt) + longitude_east_deg / 15.0)
}

/// Local Apparent Sidereal Time at `longitude_east_deg`, hours.
/// (spec.md §4.H)
pub fn last_hours(jd_ut: f64, jd_tt: f64, longitude_east_deg: f64) -> f64 {
    norm_hours(gast_hours(jd_ut, jd_tt) + longitude_east_deg / 15.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gmst_at_j2000_matches_known_value() {
        // 2000-01-01 12:00 TT/UT1 GMST is ~18h 41m 50.5s (~18.6974 h).
        let gmst = gmst_hours(J2000, J2000);
        assert_abs_diff_eq!(gmst, 18.6974, epsilon = 0.01);
    }

    #[test]
    fn sidereal_times_stay_in_range() {
        for jd in [J2000 - 40000.0, J2000, J2000 + 40000.0] {
            assert!((0.0..24.0).contains(&gmst_hours(jd, jd)));
            assert!((0.0..24.0).contains(&gast_hours(jd, jd)));
            assert!((0.0..24.0).contains(&lst_hours(jd, jd, 200.0)));
            assert!((0.0..24.0).contains(&last_hours(jd, jd, -200.0)));
        }
    }

    #[test]
    fn lst_tracks_longitude_offset() {
        let base = gmst_hours(J2000, J2000);
        let east = lst_hours(J2000, J2000, 15.0);
        assert_abs_diff_eq!(norm_hours(east - base), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn gast_differs_from_gmst_by_sub_second_equinox_term() {
        let gmst = gmst_hours(J2000, J2000);
        let gast = gast_hours(J2000, J2000);
        assert!((gast - gmst).abs() < 0.01);
    }
}
