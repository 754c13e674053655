// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fundamental argument code.

use std::ops::Rem;

use crate::constants::*;

/// Fundamental argument, IERS Conventions (2003): mean anomaly of the Moon.
/// (`eraFal03`)
///
/// Given:
///  * `t`: TDB, Julian centuries since J2000.0 (Note 1)
///
/// Returned:
///  * `l`, radians (Note 2)
///
/// # Notes:
///
/// 1) Though `t` is strictly TDB, it is usually more convenient to use TT,
///    which makes no significant difference.
///
/// 2) The expression used is as adopted in IERS Conventions (2003) and is from
///    Simon et al. (1994).
///
/// # References:
///
/// * McCarthy, D. D., Petit, G. (eds.), IERS Conventions (2003), IERS Technical
///   Note No. 32, BKG (2004)
///
/// * Simon, J.-L., Bretagnon, P., Chapront, J., Chapront-Touze, M., Francou,
///   G., Laskar, J. 1994, Astron.Astrophys. 282, 663-683
///
pub fn l03(t: f64) -> f64 {
    /* Mean anomaly of the Moon (IERS Conventions 2003). */
    #[rustfmt::skip]
    let a =
        (     485868.249036  +
    t * ( 1717915923.2178 +
    t * (         31.8792 +
    t * (          0.051635 +
    t * (        - 0.00024470 ) ) ) ) ).rem(ERFA_TURNAS) * ERFA_DAS2R;
    a
}

/// Fundamental argument, IERS Conventions (2003): mean anomaly of the Sun. (`eraFalp03`)
///
/// Given:
///  * `t`: TDB, Julian centuries since J2000.0 (Note 1)
///
/// Returned:
///  * `l'`, radians (Note 2)
///
/// # Notes:
///
/// 1) Though `t` is strictly TDB, it is usually more convenient to use TT,
///    which makes no significant difference.
///
/// 2) The expression used is as adopted in IERS Conventions (2003) and is from
///    Simon et al. (1994).
///
/// # References:
///
/// * McCarthy, D. D., Petit, G. (eds.), IERS Conventions (2003), IERS Technical
///   Note No. 32, BKG (2004)
///
/// * Simon, J.-L., Bretagnon, P., Chapront, J., Chapront-Touze, M., Francou,
///   G., Laskar, J. 1994, Astron.Astrophys. 282, 663-683
///
pub fn lp03(t: f64) -> f64 {
    /* Mean anomaly of the Sun (IERS Conventions 2003). */
    #[rustfmt::skip]
   let a =
       (         1287104.793048 +
         t * ( 129596581.0481 +
         t * (       - 0.5532 +
         t * (         0.000136 +
         t * (       - 0.00001149 ) ) ) ) ).rem(ERFA_TURNAS) * ERFA_DAS2R;
    a
}

/// Fundamental argument, IERS Conventions (2003): mean longitude of the Moon
/// minus mean longitude of the ascending node. (`eraFaf03`)
///
/// Given:
///  * `t`: TDB, Julian centuries since J2000.0 (Note 1)
///
/// Returned:
///  * `F`, radians (Note 2)
///
/// # Notes:
///
/// 1) Though `t` is strictly TDB, it is usually more convenient to use TT,
///    which makes no significant difference.
///
/// 2) The expression used is as adopted in IERS Conventions (2003) and is from
///    Simon et al. (1994).
///
/// # References:
///
/// * McCarthy, D. D., Petit, G. (eds.), IERS Conventions (2003), IERS Technical
///   Note No. 32, BKG (2004)
///
/// * Simon, J.-L., Bretagnon, P., Chapront, J., Chapront-Touze, M., Francou,
///   G., Laskar, J. 1994, Astron.Astrophys. 282, 663-683
///
pub fn f03(t: f64) -> f64 {
    /* Mean longitude of the Moon minus that of the ascending node */
    /* (IERS Conventions 2003).                                    */
    #[rustfmt::skip]
   let a =
   (           335779.526232 +
     t * ( 1739527262.8478 +
     t * (       - 12.7512 +
     t * (        - 0.001037 +
     t * (          0.00000417 ) ) ) ) ).rem(ERFA_TURNAS) * ERFA_DAS2R;
    a
}

/// Fundamental argument, IERS Conventions (2003): mean elongation of the Moon
/// from the Sun. (`eraFad03`)
///
/// Given:
///  * `t`: TDB, Julian centuries since J2000.0 (Note 1)
///
/// Returned:
///  * `D`, radians (Note 2)
///
/// # Notes:
///
/// 1) Though `t` is strictly TDB, it is usually more convenient to use TT,
///    which makes no significant difference.
///
/// 2) The expression used is as adopted in IERS Conventions (2003) and is from
///    Simon et al. (1994).
///
/// # References:
///
/// * McCarthy, D. D., Petit, G. (eds.), IERS Conventions (2003), IERS Technical
///   Note No. 32, BKG (2004)
///
/// * Simon, J.-L., Bretagnon, P., Chapront, J., Chapront-Touze, M., Francou,
///   G., Laskar, J. 1994, Astron.Astrophys. 282, 663-683
///
pub fn d03(t: f64) -> f64 {
    /* Mean elongation of the Moon from the Sun (IERS Conventions 2003). */
    #[rustfmt::skip]
    let a = ((   1072260.703692 +
        t * ( 1602961601.2090 +
        t * (        - 6.3706 +
        t * (          0.006593 +
        t * (        - 0.00003169 ) ) ) )) % ERFA_TURNAS )
        * ERFA_DAS2R;
    a
}

/// Fundamental argument, IERS Conventions (2003): mean longitude of the Moon's
/// ascending node. (`eraFaom03`)
///
/// Given:
///  * `t`: TDB, Julian centuries since J2000.0 (Note 1)
///
/// Returned:
///  * `Omega`, radians (Note 2)
///
/// # Notes:
///
/// 1) Though `t` is strictly TDB, it is usually more convenient to use TT,
///    which makes no significant difference.
///
/// 2) The expression used is as adopted in IERS Conventions (2003) and is from
///    Simon et al. (1994).
///
/// # References:
///
/// * McCarthy, D. D., Petit, G. (eds.), IERS Conventions (2003), IERS Technical
///   Note No. 32, BKG (2004)
///
/// * Simon, J.-L., Bretagnon, P., Chapront, J., Chapront-Touze, M., Francou,
///   G., Laskar, J., 1994, Astron.Astrophys. 282, 663-683.
///
pub fn om03(t: f64) -> f64 {
    /* Mean longitude of the Moon's ascending node */
    /* (IERS Conventions 2003).                    */
    #[rustfmt::skip]
    let a =
    ((          450160.398036 +
       t * ( - 6962890.5431 +
       t * (         7.4722 +
       t * (         0.007702 +
       t * (       - 0.00005939 ) ) ) )) % ERFA_TURNAS ) * ERFA_DAS2R;
    a
}

