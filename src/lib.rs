// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A high-precision solar-system ephemeris and astrological
//! calculation engine: time-scale conversions, binary ephemeris
//! readers (Swiss Ephemeris SE1 and JPL DE), an analytic fallback for
//! the Sun and Moon, sidereal time, coordinate transforms, house
//! systems, and sidereal-zodiac (ayanamsa) support.

pub mod ayanamsa;
pub mod body;
pub mod chebyshev;
pub mod config;
pub mod constants;
pub mod ephemeris;
pub mod error;
pub mod fundamental_argument;
pub mod houses;
pub mod misc;
pub mod sidereal;
pub mod time;
pub mod transform;
pub mod vectors_and_matrices;

pub use body::{Body, BodyPosition, CoordinateType, ReferenceFrame};
pub use error::{Error, Result};
