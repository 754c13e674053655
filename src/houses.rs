// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! House-cusp calculators for the twelve whole-sign/quadrant/mundane
//! systems plus the Gauquelin 36-sector division, and the derived
//! special points (Vertex, Equatorial Ascendant, Co-Ascendants,
//! Polar Ascendant). (spec.md §4.J)
//!
//! Several systems (Placidus, Koch, Topocentric, Azimuthal, Campanus)
//! are undefined or numerically unstable inside the polar circles,
//! where the relevant point never rises or sets. This implementation
//! reports [`Error::HouseSystemUndefined`] above [`POLAR_LATITUDE_LIMIT_DEG`]
//! rather than guessing; callers who want a house division regardless
//! of latitude should catch that error and fall back to a system that
//! doesn't depend on rise/set geometry (e.g. Porphyry). This policy,
//! and the per-system formulas below, are recorded in DESIGN.md.

use crate::constants::ERFA_D2PI;
use crate::error::{Error, Result};
use crate::transform::{hadec_to_azel, mean_obliquity_rad};

/// Above this absolute latitude, systems built on rise/set geometry
/// are reported as undefined rather than extrapolated.
pub const POLAR_LATITUDE_LIMIT_DEG: f64 = 66.0;

const MAX_ITERATIONS: u32 = 30;
const CONVERGENCE_RAD: f64 = 1e-10;

/// A house-division scheme. (spec.md §4.J)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HouseSystem {
    Equal,
    EqualMc,
    WholeSign,
    Porphyry,
    Vehlow,
    Gauquelin,
    Placidus,
    Koch,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Azimuthal,
    Topocentric,
    Morinus,
    Meridian,
}

impl HouseSystem {
    fn name(self) -> &'static str {
        match self {
            HouseSystem::Equal => "Equal",
            HouseSystem::EqualMc => "EqualMc",
            HouseSystem::WholeSign => "WholeSign",
            HouseSystem::Porphyry => "Porphyry",
            HouseSystem::Vehlow => "Vehlow",
            HouseSystem::Gauquelin => "Gauquelin",
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::Regiomontanus => "Regiomontanus",
            HouseSystem::Campanus => "Campanus",
            HouseSystem::Alcabitius => "Alcabitius",
            HouseSystem::Azimuthal => "Azimuthal",
            HouseSystem::Topocentric => "Topocentric",
            HouseSystem::Morinus => "Morinus",
            HouseSystem::Meridian => "Meridian",
        }
    }
}

/// A geographic site: east-positive longitude and latitude, both in
/// degrees. (spec.md §4.J, §6)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
}

/// The output of a house calculation: the cusps, the four angles, and
/// the derived special points. All angles are in radians, normalized
/// to `[0, 2π)` unless noted. (spec.md §4.J)
///
/// `cusps` is 1-indexed: house `n` is `cusps[n]`, and `cusps[0]` is an
/// unused placeholder. It is sized 13 (houses 1..12) for every system
/// except [`HouseSystem::Gauquelin`], which has 36 sectors and is
/// sized 37 (sectors 1..36). (spec.md §3)
#[derive(Clone, Debug)]
pub struct Houses {
    pub system: HouseSystem,
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub mc: f64,
    pub armc: f64,
    pub vertex: f64,
    pub equatorial_ascendant: f64,
    pub co_ascendant_koch: f64,
    pub co_ascendant_munkasey: f64,
    pub polar_ascendant: f64,
}

fn norm(a: f64) -> f64 {
    a.rem_euclid(ERFA_D2PI)
}

/// Right ascension of the ecliptic point at longitude `lon` (itself
/// at ecliptic latitude 0). Inverse of [`ra_to_ecliptic`].
fn ecliptic_to_ra(lon: f64, obliquity: f64) -> f64 {
    (lon.sin() * obliquity.cos()).atan2(lon.cos())
}

/// Ecliptic longitude of the point on the ecliptic whose right
/// ascension is `ra`. Inverse of [`ecliptic_to_ra`]. (spec.md §4.J;
/// this is also the closed form for the Midheaven.)
fn ra_to_ecliptic(ra: f64, obliquity: f64) -> f64 {
    ra.sin().atan2(ra.cos() * obliquity.cos())
}

fn declination(lon: f64, obliquity: f64) -> f64 {
    (obliquity.sin() * lon.sin()).asin()
}

/// The Midheaven: the ecliptic point culminating at `armc`. (spec.md §4.J)
pub fn midheaven(armc: f64, obliquity: f64) -> f64 {
    norm(ra_to_ecliptic(armc, obliquity))
}

/// The Ascendant: the ecliptic point rising at `armc` for an observer
/// at latitude `latitude_rad`. (spec.md §4.J)
pub fn ascendant(armc: f64, obliquity: f64, latitude_rad: f64) -> f64 {
    let asc = armc
        .cos()
        .atan2(-(obliquity.sin() * latitude_rad.tan() + obliquity.cos() * armc.sin()));
    norm(asc)
}

fn semi_diurnal_arc(lon: f64, obliquity: f64, latitude_rad: f64) -> f64 {
    let delta = declination(lon, obliquity);
    (-latitude_rad.tan() * delta.tan()).clamp(-1.0, 1.0).acos()
}

/// Solve, by fixed-point iteration, for the ecliptic longitude `λ`
/// whose own hour angle (`armc − RA(λ)`, wrapped) equals `target_h(λ)`,
/// a function of `λ` through its own declination. Used by Placidus.
/// (spec.md §4.J)
fn solve_own_arc(armc: f64, obliquity: f64, seed: f64, target_h: impl Fn(f64) -> f64) -> Result<f64> {
    let mut lon = seed;
    for _ in 0..MAX_ITERATIONS {
        let h = target_h(lon);
        let ra_target = norm(armc - h);
        let next = norm(ra_to_ecliptic(ra_target, obliquity));
        let delta = {
            let mut d = next - lon;
            if d > std::f64::consts::PI {
                d -= ERFA_D2PI;
            }
            if d < -std::f64::consts::PI {
                d += ERFA_D2PI;
            }
            d
        };
        lon = next;
        if delta.abs() < CONVERGENCE_RAD {
            return Ok(lon);
        }
    }
    Ok(lon)
}

/// Solve, by bisection on azimuth, for the ecliptic longitude whose
/// horizontal azimuth (at altitude implied by the ecliptic) equals
/// `target_az`. Used by Campanus and the Azimuthal system. (spec.md §4.J)
fn solve_azimuth(
    armc: f64,
    obliquity: f64,
    latitude_rad: f64,
    target_az: f64,
    lo_seed: f64,
    hi_seed: f64,
) -> f64 {
    let azimuth_of = |lon: f64| -> f64 {
        let ra = ecliptic_to_ra(lon, obliquity);
        let dec = declination(lon, obliquity);
        let ha = norm(armc - ra);
        let ha = if ha > std::f64::consts::PI { ha - ERFA_D2PI } else { ha };
        let (az, _el) = hadec_to_azel(ha, dec, latitude_rad);
        az
    };

    let mut lo = lo_seed;
    let mut hi = hi_seed;
    let wrap_diff = |a: f64, b: f64| -> f64 {
        let mut d = a - b;
        while d > std::f64::consts::PI {
            d -= ERFA_D2PI;
        }
        while d < -std::f64::consts::PI {
            d += ERFA_D2PI;
        }
        d
    };

    for _ in 0..MAX_ITERATIONS {
        let mid = norm((lo + hi) / 2.0);
        let diff = wrap_diff(azimuth_of(mid), target_az);
        if diff.abs() < CONVERGENCE_RAD {
            return mid;
        }
        let diff_lo = wrap_diff(azimuth_of(lo), target_az);
        if diff_lo.signum() == diff.signum() {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    norm((lo + hi) / 2.0)
}

fn trisect_ecliptic_arc(start: f64, end: f64) -> (f64, f64) {
    let span = {
        let mut s = end - start;
        while s < 0.0 {
            s += ERFA_D2PI;
        }
        s
    };
    (norm(start + span / 3.0), norm(start + 2.0 * span / 3.0))
}

fn equal_from(anchor: f64) -> Vec<f64> {
    let mut cusps = vec![0.0; 13];
    for (i, cusp) in cusps.iter_mut().enumerate().skip(1) {
        *cusp = norm(anchor + ((i - 1) as f64) * ERFA_D2PI / 12.0);
    }
    cusps
}

fn whole_sign(asc: f64) -> Vec<f64> {
    let sign_start = (asc / (ERFA_D2PI / 12.0)).floor() * (ERFA_D2PI / 12.0);
    equal_from(sign_start)
}

fn porphyry(asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    let (h2, h3) = trisect_ecliptic_arc(asc, ic);
    cusps[2] = h2;
    cusps[3] = h3;
    let (h5, h6) = trisect_ecliptic_arc(ic, desc);
    cusps[5] = h5;
    cusps[6] = h6;
    let (h8, h9) = trisect_ecliptic_arc(desc, mc);
    cusps[8] = h8;
    cusps[9] = h9;
    let (h11, h12) = trisect_ecliptic_arc(mc, asc);
    cusps[11] = h11;
    cusps[12] = h12;
    cusps
}

fn gauquelin(asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    let nonasect = |start: f64, end: f64| -> Vec<f64> {
        let span = {
            let mut s = end - start;
            while s < 0.0 {
                s += ERFA_D2PI;
            }
            s
        };
        (0..9).map(|i| norm(start + span * i as f64 / 9.0)).collect()
    };
    let mut sectors = vec![0.0; 37];
    let mut quadrants = Vec::with_capacity(36);
    quadrants.extend(nonasect(asc, ic));
    quadrants.extend(nonasect(ic, desc));
    quadrants.extend(nonasect(desc, mc));
    quadrants.extend(nonasect(mc, asc));
    sectors[1..].copy_from_slice(&quadrants);
    sectors
}

/// Closed-form quadrant-system cusp at `armc + offset`, using a trial
/// latitude in place of the true geographic latitude: the geographic
/// latitude itself for Regiomontanus, the house-fraction–scaled
/// latitude for Topocentric (the Polich–Page method). (spec.md §4.J)
fn mundane_cusp(armc: f64, obliquity: f64, trial_latitude: f64, offset: f64) -> f64 {
    let h = armc + offset;
    norm(
        (h.sin() * obliquity.cos() + trial_latitude.tan() * obliquity.sin()).atan2(h.cos()),
    )
}

const QUADRANT_OFFSETS: [(usize, f64, f64); 8] = [
    // (house number, equatorial offset from ARMC, Placidus/Koch own-arc fraction)
    (11, -std::f64::consts::FRAC_PI_6, 1.0 / 3.0),
    (12, -2.0 * std::f64::consts::FRAC_PI_6, 2.0 / 3.0),
    (2, -4.0 * std::f64::consts::FRAC_PI_6, 1.0 / 3.0),
    (3, -5.0 * std::f64::consts::FRAC_PI_6, 2.0 / 3.0),
    (5, -7.0 * std::f64::consts::FRAC_PI_6, 1.0 / 3.0),
    (6, -8.0 * std::f64::consts::FRAC_PI_6, 2.0 / 3.0),
    (8, -10.0 * std::f64::consts::FRAC_PI_6, 1.0 / 3.0),
    (9, -11.0 * std::f64::consts::FRAC_PI_6, 2.0 / 3.0),
];

fn regiomontanus_like(armc: f64, obliquity: f64, trial_latitude: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    for &(house, offset, _) in QUADRANT_OFFSETS.iter() {
        cusps[house] = mundane_cusp(armc, obliquity, trial_latitude, offset);
    }
    cusps
}

fn topocentric(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    for &(house, offset, fraction) in QUADRANT_OFFSETS.iter() {
        let scaled_latitude = (fraction * latitude_rad.tan()).atan();
        cusps[house] = mundane_cusp(armc, obliquity, scaled_latitude, offset);
    }
    cusps
}

fn placidus(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Result<Vec<f64>> {
    let h_asc = {
        let mut h = armc - ecliptic_to_ra(asc, obliquity);
        h = norm(h);
        if h > std::f64::consts::PI {
            h - ERFA_D2PI
        } else {
            h
        }
    };
    let h_desc = {
        let mut h = armc - ecliptic_to_ra(desc, obliquity);
        h = norm(h) - ERFA_D2PI;
        h
    };

    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;

    for &(house, _, fraction) in QUADRANT_OFFSETS.iter() {
        let seed = mc; // any finite seed; converges from the MC direction
        let lon = solve_own_arc(armc, obliquity, seed, |lon| {
            // houses 11/12: diurnal quadrant MC->Asc, start 0
            // houses 2/3: nocturnal quadrant Asc->IC, start h_asc
            // houses 5/6: nocturnal quadrant IC->Desc, start -pi
            // houses 8/9: diurnal quadrant Desc->MC, start h_desc
            let sda = semi_diurnal_arc(lon, obliquity, latitude_rad);
            let nsa = std::f64::consts::PI - sda;
            match house {
                11 | 12 => -fraction * sda,
                2 | 3 => h_asc - fraction * nsa,
                5 | 6 => -std::f64::consts::PI - fraction * nsa,
                8 | 9 => h_desc - fraction * sda,
                _ => unreachable!(),
            }
        })?;
        cusps[house] = lon;
    }

    Ok(cusps)
}

fn koch(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    let sda_mc = semi_diurnal_arc(mc, obliquity, latitude_rad);
    let nsa_mc = std::f64::consts::PI - sda_mc;
    let h_asc = {
        let h = norm(armc - ecliptic_to_ra(asc, obliquity));
        if h > std::f64::consts::PI {
            h - ERFA_D2PI
        } else {
            h
        }
    };
    let h_desc = norm(armc - ecliptic_to_ra(desc, obliquity)) - ERFA_D2PI;

    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;

    for &(house, _, fraction) in QUADRANT_OFFSETS.iter() {
        let h = match house {
            11 | 12 => -fraction * sda_mc,
            2 | 3 => h_asc - fraction * nsa_mc,
            5 | 6 => -std::f64::consts::PI - fraction * nsa_mc,
            8 | 9 => h_desc - fraction * sda_mc,
            _ => unreachable!(),
        };
        let ra_target = norm(armc - h);
        cusps[house] = norm(ra_to_ecliptic(ra_target, obliquity));
    }
    cusps
}

fn campanus(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    // The Campanus great circles divide the prime vertical into equal
    // 30-degree azimuth steps, anchored on the true Ascendant's azimuth.
    let asc_ra = ecliptic_to_ra(asc, obliquity);
    let asc_dec = declination(asc, obliquity);
    let asc_ha = {
        let h = norm(armc - asc_ra);
        if h > std::f64::consts::PI {
            h - ERFA_D2PI
        } else {
            h
        }
    };
    let (asc_az, _) = hadec_to_azel(asc_ha, asc_dec, latitude_rad);

    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    for &(house, offset, _) in QUADRANT_OFFSETS.iter() {
        let steps = offset / (-std::f64::consts::FRAC_PI_6); // 1..4 in units of 30deg
        let target_az = norm(asc_az + steps * std::f64::consts::FRAC_PI_6);
        cusps[house] = solve_azimuth(armc, obliquity, latitude_rad, target_az, asc, mc);
    }
    cusps
}

fn alcabitius(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    // Alcabitius divides the Ascendant's own diurnal/nocturnal semi-arc
    // (not each cusp's own) into thirds, applied uniformly.
    let sda_asc = semi_diurnal_arc(asc, obliquity, latitude_rad);
    let nsa_asc = std::f64::consts::PI - sda_asc;
    let h_asc = {
        let h = norm(armc - ecliptic_to_ra(asc, obliquity));
        if h > std::f64::consts::PI {
            h - ERFA_D2PI
        } else {
            h
        }
    };
    let h_desc = norm(armc - ecliptic_to_ra(desc, obliquity)) - ERFA_D2PI;

    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    for &(house, _, fraction) in QUADRANT_OFFSETS.iter() {
        let h = match house {
            11 | 12 => -fraction * sda_asc,
            2 | 3 => h_asc - fraction * nsa_asc,
            5 | 6 => -std::f64::consts::PI - fraction * nsa_asc,
            8 | 9 => h_desc - fraction * sda_asc,
            _ => unreachable!(),
        };
        let ra_target = norm(armc - h);
        cusps[house] = norm(ra_to_ecliptic(ra_target, obliquity));
    }
    cusps
}

fn azimuthal(armc: f64, obliquity: f64, latitude_rad: f64, asc: f64, ic: f64, desc: f64, mc: f64) -> Vec<f64> {
    // Fixed 30-degree azimuth steps from the North point, independent
    // of the true Ascendant's own azimuth.
    let mut cusps = vec![0.0; 13];
    cusps[1] = asc;
    cusps[4] = ic;
    cusps[7] = desc;
    cusps[10] = mc;
    for &(house, offset, _) in QUADRANT_OFFSETS.iter() {
        let steps = offset / (-std::f64::consts::FRAC_PI_6);
        let target_az = norm(std::f64::consts::PI / 2.0 + steps * std::f64::consts::FRAC_PI_6);
        cusps[house] = solve_azimuth(armc, obliquity, latitude_rad, target_az, asc, mc);
    }
    cusps
}

fn meridian_like(armc: f64, obliquity: f64) -> Vec<f64> {
    let mut cusps = vec![0.0; 13];
    for (house, cusp) in cusps.iter_mut().enumerate().skip(1) {
        *cusp = norm(ra_to_ecliptic(armc + (house as f64 - 10.0) * ERFA_D2PI / 12.0, obliquity));
    }
    cusps
}

/// The Vertex: the ecliptic point on the western horizon's celestial
/// great circle (the "anti-Ascendant" of the prime vertical), found as
/// the Ascendant of the co-latitude. (spec.md §4.J)
pub fn vertex(armc: f64, obliquity: f64, latitude_rad: f64) -> f64 {
    let co_latitude = std::f64::consts::FRAC_PI_2 - latitude_rad.abs();
    norm(ascendant(armc + std::f64::consts::PI, obliquity, co_latitude) + std::f64::consts::PI)
}

/// The Equatorial Ascendant: the ecliptic point rising at `armc` as
/// seen from the equator (latitude 0). (spec.md §4.J)
pub fn equatorial_ascendant(armc: f64, obliquity: f64) -> f64 {
    ascendant(armc, obliquity, 0.0)
}

/// Co-Ascendant (Koch variant): the Ascendant computed with the
/// latitude and co-latitude swapped. (spec.md §4.J)
pub fn co_ascendant_koch(armc: f64, obliquity: f64, latitude_rad: f64) -> f64 {
    let co_latitude = std::f64::consts::FRAC_PI_2 - latitude_rad.abs();
    ascendant(armc, obliquity, co_latitude)
}

/// Co-Ascendant (Munkasey variant): the Ascendant computed at the
/// complementary ARMC (ARMC + 180°). (spec.md §4.J)
pub fn co_ascendant_munkasey(armc: f64, obliquity: f64, latitude_rad: f64) -> f64 {
    ascendant(norm(armc + std::f64::consts::PI), obliquity, latitude_rad)
}

/// Polar Ascendant: the Ascendant computed at 0° latitude but the
/// site's own ARMC, offered as a usable rising point inside the polar
/// circles where [`ascendant`] itself is not well conditioned.
/// (spec.md §4.J)
pub fn polar_ascendant(armc: f64, obliquity: f64) -> f64 {
    norm(ra_to_ecliptic(armc + std::f64::consts::FRAC_PI_2, obliquity))
}

/// Compute a full house division. (spec.md §4.J)
pub fn compute(
    system: HouseSystem,
    armc: f64,
    obliquity: f64,
    latitude_rad: f64,
) -> Result<Houses> {
    let mc = midheaven(armc, obliquity);
    let asc = ascendant(armc, obliquity, latitude_rad);
    let ic = norm(mc + std::f64::consts::PI);
    let desc = norm(asc + std::f64::consts::PI);

    let latitude_deg = latitude_rad.to_degrees();
    let needs_rise_set = matches!(
        system,
        HouseSystem::Placidus
            | HouseSystem::Koch
            | HouseSystem::Topocentric
            | HouseSystem::Azimuthal
            | HouseSystem::Campanus
            | HouseSystem::Alcabitius
    );
    if needs_rise_set && latitude_deg.abs() > POLAR_LATITUDE_LIMIT_DEG {
        return Err(Error::HouseSystemUndefined {
            system: system.name(),
            latitude_deg,
        });
    }

    let cusps = match system {
        HouseSystem::Equal => equal_from(asc),
        HouseSystem::EqualMc => equal_from(norm(mc + 3.0 * ERFA_D2PI / 12.0)),
        HouseSystem::WholeSign => whole_sign(asc),
        HouseSystem::Porphyry => porphyry(asc, ic, desc, mc),
        HouseSystem::Vehlow => equal_from(norm(asc - ERFA_D2PI / 24.0)),
        HouseSystem::Gauquelin => gauquelin(asc, ic, desc, mc),
        HouseSystem::Placidus => placidus(armc, obliquity, latitude_rad, asc, ic, desc, mc)?,
        HouseSystem::Koch => koch(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Regiomontanus => regiomontanus_like(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Campanus => campanus(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Alcabitius => alcabitius(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Azimuthal => azimuthal(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Topocentric => topocentric(armc, obliquity, latitude_rad, asc, ic, desc, mc),
        HouseSystem::Morinus => meridian_like(armc, obliquity),
        HouseSystem::Meridian => meridian_like(armc, obliquity),
    };

    Ok(Houses {
        system,
        cusps,
        ascendant: asc,
        mc,
        armc,
        vertex: vertex(armc, obliquity, latitude_rad),
        equatorial_ascendant: equatorial_ascendant(armc, obliquity),
        co_ascendant_koch: co_ascendant_koch(armc, obliquity, latitude_rad),
        co_ascendant_munkasey: co_ascendant_munkasey(armc, obliquity, latitude_rad),
        polar_ascendant: polar_ascendant(armc, obliquity),
    })
}

/// Compute a full house division directly from Julian Day (UT) and a
/// geographic site, deriving ARMC from local sidereal time and the
/// obliquity from the date, rather than requiring the caller to
/// pre-compute either. (spec.md §4.J steps 1-2, §6 `houses.calculate`)
pub fn calculate(jd_ut: f64, location: Location, system: HouseSystem) -> Result<Houses> {
    let jd_tt = crate::time::ut_to_tt(jd_ut)?;
    let lst_hours = crate::sidereal::lst_hours(jd_ut, jd_tt, location.longitude_deg);
    let armc = norm((lst_hours * 15.0).to_radians());
    let obliquity = mean_obliquity_rad(jd_tt);
    let latitude_rad = location.latitude_deg.to_radians();
    compute(system, armc, obliquity, latitude_rad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const OBLIQUITY: f64 = 23.439281_f64 * std::f64::consts::PI / 180.0;

    #[test]
    fn angles_agree_across_systems() {
        let armc = 1.2;
        let lat = 0.7;
        for system in [
            HouseSystem::Equal,
            HouseSystem::WholeSign,
            HouseSystem::Porphyry,
            HouseSystem::Regiomontanus,
            HouseSystem::Koch,
        ] {
            let h = compute(system, armc, OBLIQUITY, lat).unwrap();
            assert_abs_diff_eq!(h.cusps[1], h.ascendant, epsilon = 1e-9);
            assert_abs_diff_eq!(h.cusps[10], h.mc, epsilon = 1e-9);
        }
    }

    #[test]
    fn equal_house_cusps_are_thirty_degrees_apart() {
        let h = compute(HouseSystem::Equal, 1.0, OBLIQUITY, 0.5).unwrap();
        for i in 1..=12 {
            let next = h.cusps[i % 12 + 1];
            let diff = {
                let mut d = next - h.cusps[i];
                if d < 0.0 {
                    d += ERFA_D2PI;
                }
                d
            };
            assert_abs_diff_eq!(diff, ERFA_D2PI / 12.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn gauquelin_has_36_sectors() {
        let h = compute(HouseSystem::Gauquelin, 1.0, OBLIQUITY, 0.5).unwrap();
        assert_eq!(h.cusps.len(), 37);
        assert_eq!(h.cusps[0], 0.0);
    }

    #[test]
    fn placidus_undefined_past_polar_limit() {
        let err = compute(HouseSystem::Placidus, 1.0, OBLIQUITY, 80f64.to_radians()).unwrap_err();
        assert!(matches!(err, Error::HouseSystemUndefined { .. }));
    }

    #[test]
    fn whole_sign_cusp_is_a_sign_boundary() {
        let h = compute(HouseSystem::WholeSign, 1.0, OBLIQUITY, 0.5).unwrap();
        let sign_size = ERFA_D2PI / 12.0;
        assert_abs_diff_eq!((h.cusps[1] / sign_size).fract(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn calculate_derives_armc_from_jd_and_location() {
        let location = Location {
            longitude_deg: 151.2,
            latitude_deg: -33.9,
        };
        let h = calculate(crate::constants::J2000, location, HouseSystem::Placidus).unwrap();
        let jd_tt = crate::time::ut_to_tt(crate::constants::J2000).unwrap();
        let lst_hours = crate::sidereal::lst_hours(crate::constants::J2000, jd_tt, location.longitude_deg);
        let expected_armc = norm((lst_hours * 15.0).to_radians());
        assert_abs_diff_eq!(h.armc, expected_armc, epsilon = 1e-9);
        assert_abs_diff_eq!(h.cusps[1], h.ascendant, epsilon = 1e-9);
    }
}
