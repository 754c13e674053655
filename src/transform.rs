// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Coordinate transforms between the cartesian, ecliptic-spherical,
//! equatorial-spherical, and horizontal systems. (spec.md §4.I)

use crate::constants::{ERFA_D2PI, J2000};
use crate::vectors_and_matrices::{init_matrix, mat_mul_pvec, rotate_x};

/// Mean obliquity of the ecliptic of date, radians, from the same
/// low-order IAU polynomial used for the equation of the equinoxes.
/// (spec.md §4.H, §4.I, §4.J)
pub fn mean_obliquity_rad(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / 36525.0;
    (23.439291 - 0.0130042 * t).to_radians()
}

/// P-vector to spherical coordinates: `(longitude, latitude)`, radians.
/// (`eraC2s`)
///
/// The vector `p` can have any magnitude; only its direction is used.
/// At either pole, zero longitude is returned.
pub fn cartesian_to_spherical(p: [f64; 3]) -> (f64, f64) {
    let x = p[0];
    let y = p[1];
    let z = p[2];
    let d2 = x * x + y * y;

    let theta = if d2 == 0.0 { 0.0 } else { y.atan2(x) };
    let phi = if z == 0.0 { 0.0 } else { z.atan2(d2.sqrt()) };

    (theta, phi)
}

/// Spherical coordinates `(longitude, latitude)`, radians, to a unit
/// p-vector. (`eraS2c`)
pub fn spherical_to_cartesian(theta: f64, phi: f64) -> [f64; 3] {
    let (sp, cp) = phi.sin_cos();
    let (st, ct) = theta.sin_cos();
    [ct * cp, st * cp, sp]
}

/// Rotate a cartesian vector from the ecliptic frame into the
/// equatorial frame by the obliquity of the ecliptic. (spec.md §4.I)
pub fn ecliptic_to_equatorial_cartesian(p: [f64; 3], obliquity_rad: f64) -> [f64; 3] {
    let mut r = [[0.0; 3]; 3];
    init_matrix(&mut r);
    rotate_x(-obliquity_rad, &mut r);
    mat_mul_pvec(r, p)
}

/// The inverse of [`ecliptic_to_equatorial_cartesian`]. (spec.md §4.I)
pub fn equatorial_to_ecliptic_cartesian(p: [f64; 3], obliquity_rad: f64) -> [f64; 3] {
    let mut r = [[0.0; 3]; 3];
    init_matrix(&mut r);
    rotate_x(obliquity_rad, &mut r);
    mat_mul_pvec(r, p)
}

/// Ecliptic spherical `(longitude, latitude, distance)`, radians and
/// any distance unit, to equatorial spherical `(right ascension,
/// declination, distance)`. (spec.md §4.I)
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, dist: f64, obliquity_rad: f64) -> (f64, f64, f64) {
    let p = spherical_to_cartesian(lon, lat);
    let eq = ecliptic_to_equatorial_cartesian([p[0] * dist, p[1] * dist, p[2] * dist], obliquity_rad);
    let (ra, dec) = cartesian_to_spherical(eq);
    let ra = ra.rem_euclid(ERFA_D2PI);
    (ra, dec, crate::vectors_and_matrices::modulus(eq))
}

/// Equatorial spherical `(right ascension, declination, distance)` to
/// ecliptic spherical `(longitude, latitude, distance)`. (spec.md §4.I)
pub fn equatorial_to_ecliptic(ra: f64, dec: f64, dist: f64, obliquity_rad: f64) -> (f64, f64, f64) {
    let p = spherical_to_cartesian(ra, dec);
    let ecl = equatorial_to_ecliptic_cartesian([p[0] * dist, p[1] * dist, p[2] * dist], obliquity_rad);
    let (lon, lat) = cartesian_to_spherical(ecl);
    let lon = lon.rem_euclid(ERFA_D2PI);
    (lon, lat, crate::vectors_and_matrices::modulus(ecl))
}

/// Horizon to equatorial coordinates: transform azimuth and altitude
/// to hour angle and declination. (`eraAe2hd`)
///
/// All arguments are angles in radians. The sign convention for
/// azimuth is north zero, east +pi/2. `ha` is returned in `±pi`,
/// `dec` in `±pi/2`.
pub fn azel_to_hadec(az: f64, el: f64, phi: f64) -> (f64, f64) {
    let (sa, ca) = az.sin_cos();
    let (se, ce) = el.sin_cos();
    let (sp, cp) = phi.sin_cos();

    let x = -ca * ce * sp + se * cp;
    let y = -sa * ce;
    let z = ca * ce * cp + se * sp;

    let r = (x * x + y * y).sqrt();
    let ha = if r != 0.0 { y.atan2(x) } else { 0.0 };
    let dec = z.atan2(r);

    (ha, dec)
}

/// Equatorial to horizon coordinates: transform hour angle and
/// declination to azimuth and altitude. (`eraHd2ae`)
///
/// All arguments are angles in radians. `az` is returned in `0..2pi`
/// (north zero, east +pi/2); `el` in `±pi/2`.
pub fn hadec_to_azel(ha: f64, dec: f64, phi: f64) -> (f64, f64) {
    let (sh, ch) = ha.sin_cos();
    let (sd, cd) = dec.sin_cos();
    let (sp, cp) = phi.sin_cos();

    let x = -ch * cd * sp + sd * cp;
    let y = -sh * cd;
    let z = ch * cd * cp + sd * sp;

    let r = (x * x + y * y).sqrt();
    let a = if r != 0.0 { y.atan2(x) } else { 0.0 };
    let az = if a < 0.0 { a + ERFA_D2PI } else { a };
    let el = z.atan2(r);

    (az, el)
}

/// Parallactic angle for a given hour angle and declination, in
/// `±pi`. At the pole itself, zero is returned. (`eraHd2pa`)
///
/// # Reference
/// Smart, W.M., "Spherical Astronomy", Cambridge University Press,
/// 6th edition (Green, 1977), p49.
pub fn hadec_to_parallactic_angle(ha: f64, dec: f64, phi: f64) -> f64 {
    let (sp, cp) = phi.sin_cos();
    let (sha, cha) = ha.sin_cos();
    let (sdec, cdec) = dec.sin_cos();
    let sqsz = cp * sha;
    let cqsz = sp * cdec - cp * sdec * cha;
    if sqsz != 0.0 || cqsz != 0.0 {
        sqsz.atan2(cqsz)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn cartesian_spherical_round_trip() {
        let (lon, lat) = (1.1, 0.4);
        let p = spherical_to_cartesian(lon, lat);
        let (lon2, lat2) = cartesian_to_spherical(p);
        assert_abs_diff_eq!(lon, lon2, epsilon = 1e-12);
        assert_abs_diff_eq!(lat, lat2, epsilon = 1e-12);
    }

    #[test]
    fn ecliptic_equatorial_round_trip() {
        let obliquity = crate::constants::OBLIQUITY_J2000_DEG.to_radians();
        let (lon, lat, dist) = (2.0, 0.3, 1.5);
        let (ra, dec, d2) = ecliptic_to_equatorial(lon, lat, dist, obliquity);
        let (lon2, lat2, d3) = equatorial_to_ecliptic(ra, dec, d2, obliquity);
        assert_abs_diff_eq!(lon, lon2, epsilon = 1e-10);
        assert_abs_diff_eq!(lat, lat2, epsilon = 1e-10);
        assert_abs_diff_eq!(dist, d3, epsilon = 1e-10);
    }

    #[test]
    fn obliquity_rotation_tilts_the_equinox_not_axis() {
        // The vernal equinox direction (lon=0, lat=0) is fixed by the rotation.
        let obliquity = FRAC_PI_4;
        let (ra, dec, _) = ecliptic_to_equatorial(0.0, 0.0, 1.0, obliquity);
        assert_abs_diff_eq!(ra, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dec, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn hadec_azel_round_trip() {
        let (ha, dec, phi) = (0.3, 0.5, 0.9);
        let (az, el) = hadec_to_azel(ha, dec, phi);
        let (ha2, dec2) = azel_to_hadec(az, el, phi);
        assert_abs_diff_eq!(ha, ha2, epsilon = 1e-10);
        assert_abs_diff_eq!(dec, dec2, epsilon = 1e-10);
    }
}
