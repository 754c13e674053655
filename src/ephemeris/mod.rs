// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Binary ephemeris readers (SE1, JPL DE) and the analytic fallback
//! engine, unified behind [`calculate`]. (spec.md §4.D, §4.E, §4.F)

pub mod fallback;
pub mod jpl;
pub mod se1;

use crate::body::{Body, BodyPosition, CoordinateType, ReferenceFrame};
use crate::chebyshev;
use crate::error::{Error, Result};

/// Which binary source (if any) backs the engine's lookups, beyond
/// the always-available analytic Sun/Moon fallback. (spec.md §4.F)
pub enum Source {
    Se1(se1::Se1Reader),
    Jpl(jpl::JplReader),
    None,
}

/// Dispatches a position/velocity request to a configured binary
/// reader, falling back to the analytic models, and finally to
/// [`Error::BodyUnsupported`]. (spec.md §4.F)
pub fn calculate(
    source: &Source,
    body: Body,
    jd_tt: f64,
    want_velocity: bool,
) -> Result<BodyPosition> {
    if body == Body::Earth {
        return Ok(BodyPosition {
            body,
            jd_tt,
            position: [0.0, 0.0, 0.0],
            velocity: want_velocity.then_some([0.0, 0.0, 0.0]),
            reference_frame: ReferenceFrame::J2000,
            coordinate_type: CoordinateType::Geocentric,
        });
    }

    match source {
        Source::Se1(reader) => match from_se1(reader, body, jd_tt, want_velocity)? {
            Some(p) => Ok(p),
            None => {
                log::debug!("no SE1 segment covers {body:?} at JD {jd_tt}; using analytic fallback");
                fallback::calculate(body, jd_tt, want_velocity)
            }
        },
        Source::Jpl(reader) => match from_jpl(reader, body, jd_tt, want_velocity) {
            Ok(p) => Ok(p),
            Err(Error::BodyUnsupported { .. }) => {
                log::debug!("JPL reader has no data for {body:?}; using analytic fallback");
                fallback::calculate(body, jd_tt, want_velocity)
            }
            Err(e) => Err(e),
        },
        Source::None => {
            log::debug!("no binary ephemeris configured; using analytic fallback for {body:?}");
            fallback::calculate(body, jd_tt, want_velocity)
        }
    }
}

fn from_se1(
    reader: &se1::Se1Reader,
    body: Body,
    jd_tt: f64,
    want_velocity: bool,
) -> Result<Option<BodyPosition>> {
    let record = match reader.find_record(jd_tt)? {
        Some(r) => r,
        None => return Ok(None),
    };

    let x = chebyshev::normalize(jd_tt, record.start_jd, record.end_jd)?;
    let half_span = (record.end_jd - record.start_jd) / 2.0;

    let (lon, lon_v) = chebyshev::evaluate_both(x, &record.long_coeffs)?;
    let (lat, lat_v) = chebyshev::evaluate_both(x, &record.lat_coeffs)?;
    let (dist, dist_v) = chebyshev::evaluate_both(x, &record.dist_coeffs)?;

    let position = spherical_to_cartesian_au(lon, lat, dist);
    let velocity = want_velocity.then(|| {
        spherical_velocity_to_cartesian_au(lon, lat, dist, lon_v / half_span, lat_v / half_span, dist_v / half_span)
    });

    Ok(Some(BodyPosition {
        body,
        jd_tt,
        position,
        velocity,
        reference_frame: ReferenceFrame::Ecliptic,
        coordinate_type: CoordinateType::Geocentric,
    }))
}

fn from_jpl(reader: &jpl::JplReader, body: Body, jd_tt: f64, want_velocity: bool) -> Result<BodyPosition> {
    let coeffs = reader.extract_coefficients(body, jd_tt)?;
    let x = chebyshev::normalize(jd_tt, coeffs.sub_start_jd, coeffs.sub_end_jd)?;
    let half_span = (coeffs.sub_end_jd - coeffs.sub_start_jd) / 2.0;

    let mut position = [0.0; 3];
    let mut velocity = [0.0; 3];
    for (i, comp) in coeffs.components.iter().take(3).enumerate() {
        let (v, d) = chebyshev::evaluate_both(x, comp)?;
        // JPL DE coefficients are already in km; convert to AU.
        position[i] = v / reader.header().au_km;
        velocity[i] = (d / half_span) / reader.header().au_km;
    }

    Ok(BodyPosition {
        body,
        jd_tt,
        position,
        velocity: want_velocity.then_some(velocity),
        reference_frame: ReferenceFrame::J2000,
        coordinate_type: CoordinateType::Geocentric,
    })
}

fn spherical_to_cartesian_au(lon_deg: f64, lat_deg: f64, dist_au: f64) -> [f64; 3] {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    [
        dist_au * lat.cos() * lon.cos(),
        dist_au * lat.cos() * lon.sin(),
        dist_au * lat.sin(),
    ]
}

#[allow(clippy::too_many_arguments)]
fn spherical_velocity_to_cartesian_au(
    lon_deg: f64,
    lat_deg: f64,
    dist_au: f64,
    lon_v_deg_per_day: f64,
    lat_v_deg_per_day: f64,
    dist_v_au_per_day: f64,
) -> [f64; 3] {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let lon_v = lon_v_deg_per_day.to_radians();
    let lat_v = lat_v_deg_per_day.to_radians();

    let (sl, cl) = lon.sin_cos();
    let (sb, cb) = lat.sin_cos();

    let dx = dist_v_au_per_day * cb * cl - dist_au * sb * lat_v * cl - dist_au * cb * sl * lon_v;
    let dy = dist_v_au_per_day * cb * sl - dist_au * sb * lat_v * sl + dist_au * cb * cl * lon_v;
    let dz = dist_v_au_per_day * sb + dist_au * cb * lat_v;

    [dx, dy, dz]
}
