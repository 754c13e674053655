// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Time code: Julian Day <-> calendar, ΔT, and time-scale conversions.

pub mod delta_t;
pub mod jd;
pub mod scales;

pub use delta_t::delta_t_seconds;
pub use jd::{from_gregorian, minus, plus, to_gregorian, GregorianDate};
pub use scales::{
    tai_to_tt, tdb_to_tt, tt_to_tai, tt_to_tdb, tt_to_ut, ut_to_tt, ut_to_utc, utc_to_tt, utc_to_ut,
};
