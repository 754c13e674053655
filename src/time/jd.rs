// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calendar date <-> Julian Day, and JD arithmetic.

use crate::constants::{JD_ABSURD_HIGH, JD_ABSURD_LOW};
use crate::error::{Error, Result};

/// A proleptic-Gregorian calendar date: `year` is a signed astronomical
/// year (0 = 1 BCE), no Julian-calendar cutover is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: f64,
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Julian Day number of the instant `(year, month, day, hour)`, under
/// proleptic Gregorian rules. (spec.md §4.A)
pub fn from_gregorian(year: i32, month: u32, day: u32, hour: f64) -> Result<f64> {
    if !(1..=12).contains(&month)
        || day == 0
        || day > days_in_month(year, month)
        || !(0.0..24.0).contains(&hour)
    {
        return Err(Error::InvalidDate {
            year,
            month,
            day,
            hour,
        });
    }

    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd = (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + b
        - 1524.5
        + hour / 24.0;
    Ok(jd)
}

/// The inverse of [`from_gregorian`], using the canonical Meeus method.
/// (spec.md §4.A)
pub fn to_gregorian(jd: f64) -> Result<GregorianDate> {
    if !(JD_ABSURD_LOW..=JD_ABSURD_HIGH).contains(&jd) {
        return Err(Error::JdOutOfRange {
            jd,
            reason: "physically absurd",
        });
    }

    let jd_shifted = jd + 0.5;
    let z = jd_shifted.floor();
    let f = jd_shifted - z;

    let a = if z < 2299161.0 {
        z
    } else {
        let alpha = ((z - 1867216.25) / 36524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day_frac = b - d - (30.6001 * e).floor() + f;
    let day = day_frac.floor() as u32;
    let hour = (day_frac - day_frac.floor()) * 24.0;

    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    Ok(GregorianDate {
        year: year as i32,
        month: month as u32,
        day,
        hour,
    })
}

/// Add a number of days to a Julian Day.
pub fn plus(jd: f64, days: f64) -> f64 {
    jd + days
}

/// Difference, in days, between two Julian Days (`self - other`).
pub fn minus(jd: f64, other: f64) -> f64 {
    jd - other
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn j2000_epoch() {
        assert_abs_diff_eq!(
            from_gregorian(2000, 1, 1, 12.0).unwrap(),
            2_451_545.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn scenario_1974() {
        assert_abs_diff_eq!(
            from_gregorian(1974, 8, 15, 23.5).unwrap(),
            2_442_275.479_167,
            epsilon = 1e-6
        );
    }

    #[test]
    fn scenario_2014() {
        assert_abs_diff_eq!(
            from_gregorian(2014, 4, 26, 16.0 + 53.0 / 60.0 + 24.0 / 3600.0).unwrap(),
            2_456_774.20375,
            epsilon = 1e-6
        );
    }

    #[test]
    fn feb_29_non_leap_year_is_invalid() {
        assert!(from_gregorian(2001, 2, 29, 0.0).is_err());
        assert!(from_gregorian(2000, 2, 29, 0.0).is_ok());
    }

    #[test]
    fn round_trip_is_exact() {
        for (y, m, d, h) in [
            (2000, 1, 1, 12.0),
            (1974, 8, 15, 23.5),
            (1, 1, 1, 0.0),
            (-100, 6, 15, 6.25),
            (1600, 2, 29, 0.0),
        ] {
            let jd = from_gregorian(y, m, d, h).unwrap();
            let back = to_gregorian(jd).unwrap();
            assert_eq!(back.year, y);
            assert_eq!(back.month, m);
            assert_eq!(back.day, d);
            assert_abs_diff_eq!(back.hour, h, epsilon = 1e-3 / 3600.0);
        }
    }
}
