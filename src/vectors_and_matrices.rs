// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code for vectors ("p-vectors" and "pv-vectors") and "r-matrices".

/// Multiply a p-vector by a scalar. (`eraSxp`)
///
/// Given:
/// * `s`: scalar
/// * `p`: p-vector
///
/// Returned:
/// * `s` * `p`
///
pub fn multiply(s: f64, p: [f64; 3]) -> [f64; 3] {
    [s * p[0], s * p[1], s * p[2]]
}

/// Modulus of p-vector. (`eraPm`)
///
/// Given:
/// * `p`: p-vector
///
/// Returned:
/// * modulus
///
pub fn modulus(p: [f64; 3]) -> f64 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}

/// Multiply a p-vector by an r-matrix. (`eraRxp`)
///
/// Given:
/// * `r`: r-matrix
/// * `p`: p-vector
///
/// Returned:
/// * `rp`: `r * p`
///
pub fn mat_mul_pvec(r: [[f64; 3]; 3], p: [f64; 3]) -> [f64; 3] {
    let mut wrp = [0.0; 3];
    /* Matrix r * vector p. */
    for (r, wrp) in r.iter().zip(wrp.iter_mut()) {
        let mut w = 0.0;
        for (r, p) in r.iter().zip(p) {
            w += r * p;
        }
        *wrp = w;
    }

    wrp
}

/// Multiply a pv-vector (position and velocity) by an r-matrix. (`eraRxpv`)
///
/// Given:
/// * `r`: r-matrix
/// * `pv`: pv-vector
///
/// Returned:
/// * `rpv`: `r * pv`
///
/// # Note:
///
/// 1) The algorithm is for the simple case where the r-matrix `r` is not a
///    function of time.  The case where `r` is a function of time leads to an
///    additional velocity component equal to the product of the derivative of
///    `r` and the position vector.
///
pub fn mat_mul_pvvec(r: [[f64; 3]; 3], pv: [[f64; 3]; 2]) -> [[f64; 3]; 2] {
    let rp1 = mat_mul_pvec(r, pv[0]);
    let rp2 = mat_mul_pvec(r, pv[1]);
    [rp1, rp2]
}

/// Initialize an r-matrix to the identity matrix. (`eraIr`)
///
/// Modified:
///  * `r`: r-matrix
///
pub fn init_matrix(r: &mut [[f64; 3]; 3]) {
    r[0][0] = 1.0;
    r[0][1] = 0.0;
    r[0][2] = 0.0;
    r[1][0] = 0.0;
    r[1][1] = 1.0;
    r[1][2] = 0.0;
    r[2][0] = 0.0;
    r[2][1] = 0.0;
    r[2][2] = 1.0;
}

/// Rotate an r-matrix about the x-axis. (`eraRx`)
///
/// Given:
///  * `phi`: angle (radians)
///
/// Given and returned:
///  * `r`: r-matrix, rotated
///
/// # Notes:
///
/// 1) Calling this function with positive `phi` incorporates in the supplied
///    r-matrix `r` an additional rotation, about the x-axis, anticlockwise as
///    seen looking towards the origin from positive x.
///
/// 2) The additional rotation can be represented by this matrix:
///
///    |---|-----------|-----------|
///    | 1 |     0     |     0     |
///    | 0 | +cos(phi) | +sin(phi) |
///    | 0 | -sin(phi) | +cos(phi) |
///
pub fn rotate_x(phi: f64, r: &mut [[f64; 3]; 3]) {
    let (s, c) = phi.sin_cos();

    let a10 = c * r[1][0] + s * r[2][0];
    let a11 = c * r[1][1] + s * r[2][1];
    let a12 = c * r[1][2] + s * r[2][2];
    let a20 = -s * r[1][0] + c * r[2][0];
    let a21 = -s * r[1][1] + c * r[2][1];
    let a22 = -s * r[1][2] + c * r[2][2];

    r[1][0] = a10;
    r[1][1] = a11;
    r[1][2] = a12;
    r[2][0] = a20;
    r[2][1] = a21;
    r[2][2] = a22;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_times_vector_is_unchanged() {
        let mut r = [[0.0; 3]; 3];
        init_matrix(&mut r);
        let p = [1.0, 2.0, 3.0];
        assert_eq!(mat_mul_pvec(r, p), p);
    }

    #[test]
    fn rotate_x_preserves_modulus() {
        let mut r = [[0.0; 3]; 3];
        init_matrix(&mut r);
        rotate_x(0.4, &mut r);
        let p = [1.0, 2.0, 3.0];
        let rp = mat_mul_pvec(r, p);
        assert!((modulus(rp) - modulus(p)).abs() < 1e-12);
    }
}
