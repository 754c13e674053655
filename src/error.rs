// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The crate's error taxonomy.

use crate::body::Body;

/// Every way a public operation in this crate can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid date: year={year} month={month} day={day} hour={hour}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
    },

    #[error("Julian Day {jd} is out of range ({reason})")]
    JdOutOfRange { jd: f64, reason: &'static str },

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("corrupt header in {path}: {reason}")]
    CorruptHeader { path: String, reason: String },

    #[error("unrecognised byte order in {path}")]
    BadEndianness { path: String },

    #[error("body {body:?} is not supported by this engine")]
    BodyUnsupported { body: Body },

    #[error("Chebyshev coefficient array is empty")]
    EmptyCoefficients,

    #[error("value {value} is outside the interval [{a}, {b}]")]
    OutOfInterval { value: f64, a: f64, b: f64 },

    #[error("house system {system} is undefined at latitude {latitude_deg}")]
    HouseSystemUndefined {
        system: &'static str,
        latitude_deg: f64,
    },

    #[error("configuration invalid: {reason}")]
    ConfigurationInvalid { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
