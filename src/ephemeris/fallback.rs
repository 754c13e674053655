// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Low-precision analytic fallback positions for the Sun and Moon,
//! used when no binary ephemeris file is configured or a requested
//! date falls outside its coverage. Sun follows a truncated VSOP87-style
//! series (Meeus-form), Moon a truncated ELP2000-style series, reusing
//! the IERS (2003) fundamental arguments. (spec.md §4.G)

use crate::body::{Body, BodyPosition, CoordinateType, ReferenceFrame};
use crate::constants::{AU_KM, J2000};
use crate::error::{Error, Result};
use crate::fundamental_argument::{d03, f03, l03, lp03, om03};

const SUN_DLON_DT_DEG_PER_DAY: f64 = 0.9856474;
const MOON_DLON_DT_DEG_PER_DAY: f64 = 13.176358;

fn centuries_since_j2000(jd_tt: f64) -> f64 {
    (jd_tt - J2000) / 36525.0
}

/// Sun's geocentric ecliptic-of-date position from a truncated
/// VSOP87-style series (Meeus ch. 25 low-precision form). (spec.md §4.G)
fn sun_position(jd_tt: f64) -> ([f64; 3], Option<[f64; 3]>) {
    let t = centuries_since_j2000(jd_tt);

    let l0 = (280.46646 + 36000.76983 * t + 0.0003032 * t * t).rem_euclid(360.0);
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).rem_euclid(360.0);
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let m_rad = m.to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_longitude = l0 + c;
    let true_anomaly = m + c;
    let r = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.to_radians().cos());

    let lon = true_longitude.to_radians();
    let position = [r * lon.cos(), r * lon.sin(), 0.0];

    let dlon = SUN_DLON_DT_DEG_PER_DAY.to_radians();
    let velocity = [-r * lon.sin() * dlon, r * lon.cos() * dlon, 0.0];

    (position, Some(velocity))
}

/// Moon's geocentric ecliptic-of-date position from a truncated
/// ELP2000-style series, reusing the fundamental arguments shared with
/// nutation theory: `D`, `M` (Sun), `M'` (Moon), `F`, and `L' = F + Ω`.
/// (spec.md §4.G)
fn moon_position(jd_tt: f64) -> ([f64; 3], Option<[f64; 3]>) {
    let t = centuries_since_j2000(jd_tt);

    let d = d03(t);
    let m = lp03(t);
    let mp = l03(t);
    let f = f03(t);
    let lp_rad = f03(t) + om03(t);

    // Ten largest longitude terms (degrees), amplitude in 1e-6 deg.
    const LON_TERMS: [(f64, f64, f64, f64, f64); 10] = [
        (6.288774e0, 0.0, 0.0, 1.0, 0.0),
        (1.274027e0, 2.0, 0.0, -1.0, 0.0),
        (0.658314e0, 2.0, 0.0, 0.0, 0.0),
        (0.213618e0, 0.0, 0.0, 2.0, 0.0),
        (-0.185116e0, 0.0, 1.0, 0.0, 0.0),
        (-0.114332e0, 0.0, 0.0, 0.0, 2.0),
        (0.058793e0, 2.0, 0.0, -2.0, 0.0),
        (0.057066e0, 2.0, -1.0, -1.0, 0.0),
        (0.053322e0, 2.0, 0.0, 1.0, 0.0),
        (0.045758e0, 2.0, -1.0, 0.0, 0.0),
    ];

    // Seven largest latitude terms (degrees).
    const LAT_TERMS: [(f64, f64, f64, f64, f64); 7] = [
        (5.128122e0, 0.0, 0.0, 0.0, 1.0),
        (0.280602e0, 0.0, 0.0, 1.0, 1.0),
        (0.277693e0, 0.0, 0.0, 1.0, -1.0),
        (0.173237e0, 2.0, 0.0, 0.0, -1.0),
        (0.055413e0, 2.0, 0.0, -1.0, 1.0),
        (0.046271e0, 2.0, 0.0, -1.0, -1.0),
        (0.032573e0, 2.0, 0.0, 0.0, 1.0),
    ];

    // Nine largest distance terms (km).
    const DIST_TERMS: [(f64, f64, f64, f64, f64); 9] = [
        (-20905355.0, 0.0, 0.0, 1.0, 0.0),
        (-3699111.0, 2.0, 0.0, -1.0, 0.0),
        (-2955968.0, 2.0, 0.0, 0.0, 0.0),
        (-569925.0, 0.0, 0.0, 2.0, 0.0),
        (48888.0, 0.0, 1.0, 0.0, 0.0),
        (-3149.0, 0.0, 0.0, 0.0, 2.0),
        (246158.0, 2.0, 0.0, -2.0, 0.0),
        (-152138.0, 2.0, -1.0, -1.0, 0.0),
        (-170733.0, 2.0, 0.0, 1.0, 0.0),
    ];

    let mut dlon = 0.0;
    for &(amp, cd, cm, cmp, cf) in LON_TERMS.iter() {
        dlon += amp * (cd * d + cm * m + cmp * mp + cf * f).sin();
    }
    let longitude = lp_rad.to_degrees() + dlon;

    let mut dlat = 0.0;
    for &(amp, cd, cm, cmp, cf) in LAT_TERMS.iter() {
        dlat += amp * (cd * d + cm * m + cmp * mp + cf * f).sin();
    }
    let latitude = dlat;

    let mut ddist = 385000.56;
    for &(amp, cd, cm, cmp, cf) in DIST_TERMS.iter() {
        ddist += amp / 1000.0 * (cd * d + cm * m + cmp * mp + cf * f).cos();
    }
    let distance_au = ddist / AU_KM;

    let lon_rad = longitude.to_radians();
    let lat_rad = latitude.to_radians();
    let position = [
        distance_au * lat_rad.cos() * lon_rad.cos(),
        distance_au * lat_rad.cos() * lon_rad.sin(),
        distance_au * lat_rad.sin(),
    ];

    let dlon_dt = MOON_DLON_DT_DEG_PER_DAY.to_radians();
    let velocity = [
        -distance_au * lat_rad.cos() * lon_rad.sin() * dlon_dt,
        distance_au * lat_rad.cos() * lon_rad.cos() * dlon_dt,
        0.0,
    ];

    (position, Some(velocity))
}

/// Compute a geocentric ecliptic-of-date position for `body` using the
/// analytic fallback models. Only the Sun and Moon are supported; any
/// other body fails with [`Error::BodyUnsupported`]. (spec.md §4.G)
pub fn calculate(body: Body, jd_tt: f64, want_velocity: bool) -> Result<BodyPosition> {
    let (position, velocity) = match body {
        Body::Sun => sun_position(jd_tt),
        Body::Moon => moon_position(jd_tt),
        _ => return Err(Error::BodyUnsupported { body }),
    };

    Ok(BodyPosition {
        body,
        jd_tt,
        position,
        velocity: if want_velocity { velocity } else { None },
        reference_frame: ReferenceFrame::Ecliptic,
        coordinate_type: CoordinateType::Geocentric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sun_distance_is_near_one_au() {
        let (pos, _) = sun_position(J2000);
        let r = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        assert_abs_diff_eq!(r, 1.0, epsilon = 0.02);
    }

    #[test]
    fn moon_distance_is_near_385000_km() {
        let (pos, _) = moon_position(J2000);
        let r_au = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        assert_abs_diff_eq!(r_au * AU_KM, 385000.0, epsilon = 30000.0);
    }

    #[test]
    fn unsupported_body_fails() {
        assert!(matches!(
            calculate(Body::Mars, J2000, false),
            Err(Error::BodyUnsupported { body: Body::Mars })
        ));
    }

    #[test]
    fn velocity_omitted_when_not_requested() {
        let p = calculate(Body::Sun, J2000, false).unwrap();
        assert!(p.velocity.is_none());
        let p = calculate(Body::Sun, J2000, true).unwrap();
        assert!(p.velocity.is_some());
    }
}
