// Copyright (c) 2026 The ellipsoid-geodesic developers

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! This module contains the series expansion coefficients used to integrate
//! distance, longitude and area along a geodesic, together with the Clenshaw
//! summations that evaluate the series.
//!
//! It uses the equations given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf) and
//! the equation for A2 in
//! [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf).
//! All series are truncated at order 6 in the expansion variable.

use angle_sc::{Angle, Radians};

/// The scale factor `A1`.
/// CFF Karney, Eq. 17.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
/// use ellipsoid_geodesic::ellipsoid::coefficients::evaluate_a1;
///
/// // evaluate_a1 for WGS 84 latitude 45.0
/// let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
/// let a1 = evaluate_a1(eps45);
///
/// assert_eq!(0.0033839903702120875, a1);
/// ```
#[must_use]
pub fn evaluate_a1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * (eps2 * (eps2 + 4.0) + 64.0) / 256.0;
    (t + eps) / (1.0 - eps)
}

/// The scale factor `A2`.
///
/// CFF Karney [Geodesics on an arbitrary ellipsoid of revolution](https://arxiv.org/pdf/2208.00492.pdf),
/// Eq. A1.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
/// # Examples
/// ```
/// use ellipsoid_geodesic::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
/// use ellipsoid_geodesic::ellipsoid::coefficients::evaluate_a2;
///
/// // evaluate_a2 for WGS 84 latitude 45.0
/// let eps45 = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
/// let a2 = evaluate_a2(eps45);
///
/// assert_eq!(-0.0033669191180908161, a2);
/// ```
#[must_use]
pub fn evaluate_a2(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * ((-11. * eps2 - 28.) * eps2 - 192.) / 256.;
    (t - eps) / (1. + eps)
}

/// The coefficients `A3`.
/// CFF Karney, Eq. 23.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_a3(n: f64) -> [f64; 6] {
    [
        1.,
        (n - 1.) / 2.,
        (n * (3. * n - 1.) - 2.) / 8.,
        ((-n - 3.) * n - 1.) / 16.,
        (-2. * n - 3.) / 64.,
        -3. / 128.,
    ]
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`.
/// CFF Karney, Eq. 18.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * ((6. - eps2) * eps2 - 16.) / 32.,
        eps2 * ((64. - 9. * eps2) * eps2 - 128.) / 2048.,
        eps * eps2 * (9. * eps2 - 16.) / 768.,
        eps4 * (3. * eps2 - 5.) / 512.,
        eps * eps4 * (-7. / 1280.),
        eps6 * (-7. / 2048.),
    ]
}

/// The coefficients `C1p[l]` in the Fourier expansion of `B1p`, the reversion
/// of the distance series.
/// CFF Karney, Eq. 21.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c1p(eps: f64) -> [f64; 6] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!

    [
        0.,
        eps * (eps2 * (205. * eps2 - 432.) + 768.) / 1536.,
        eps2 * (30. - 37. * eps2) / 96.,
        eps * eps2 * (116. - 225. * eps2) / 384.,
        eps4 * 539. / 1536.,
        (eps * eps4) * 3467. / 7680.,
    ]
}

/// The coefficients `C2[l]` in the Fourier expansion of `B2`.
/// CFF Karney, Eq. 42.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c2(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps; // Note: not the same as eps2 * eps2!
    let eps6 = (eps4 * eps) * eps;

    [
        0.,
        eps * (eps2 * (eps2 + 2.) + 16.) / 32.,
        eps2 * (eps2 * (35. * eps2 + 64.) + 384.) / 2048.,
        eps * eps2 * (15. * eps2 + 80.) / 768.,
        eps4 * (7. * eps2 + 35.) / 512.,
        eps * eps4 * 63. / 1280.,
        eps6 * 77. / 2048.,
    ]
}

/// The coefficients `C3x[l]` in the Fourier expansion of `C3`.
/// CFF Karney, Eq. 25.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c3x(n: f64) -> [f64; 15] {
    [
        (1. - n) / 4.,
        (1. - n * n) / 8.,
        (n * ((-5. * n - 1.) * n + 3.) + 3.) / 64.,
        (n * ((2. - 2. * n) * n + 2.) + 5.) / 128.,
        (n * (3. * n + 11.) + 12.) / 512.,
        ((n - 3.) * n + 2.) / 32.,
        (n * (n * (2. * n - 3.) - 2.) + 3.) / 64.,
        (n * ((-6. * n - 9.) * n + 2.) + 6.) / 256.,
        ((1. - 2. * n) * n + 5.) / 256.,
        (n * ((5. - n) * n - 9.) + 5.) / 192.,
        (n * (n * (10. * n - 6.) - 10.) + 9.) / 384.,
        ((-77. * n - 8.) * n + 42.) / 3072.,
        (n * ((20. - 7. * n) * n - 28.) + 14.) / 1024.,
        ((-7. * n - 40.) * n + 28.) / 2048.,
        (n * (75. * n - 90.) + 42.) / 5120.,
    ]
}

/// The coefficients `C4x[l]` in the Fourier expansion of `C4`, the area
/// integrand series.
/// CFF Karney, Eq. 65.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c4x(n: f64) -> [f64; 21] {
    [
        (n * (n * (n * (n * (100. * n + 208.) + 572.) + 3432.) - 12012.) + 30030.) / 45045.,
        (n * (n * (n * (64. * n + 624.) - 4576.) + 6864.) - 3003.) / 15015.,
        (n * (n * (-10656. * n + 14144.) - 4576.) - 858.) / 45045.,
        (n * (-224. * n - 4784.) + 1573.) / 45045.,
        (1088. * n + 156.) / 45045.,
        97. / 15015.,
        (n * (n * (n * (-64. * n - 624.) + 4576.) - 6864.) + 3003.) / 135135.,
        (n * (n * (5952. * n - 11648.) + 9152.) - 2574.) / 135135.,
        (n * (5792. * n + 1040.) - 1287.) / 135135.,
        (468. - 2944. * n) / 135135.,
        1. / 9009.,
        (n * (n * (-1440. * n + 4160.) - 4576.) + 1716.) / 225225.,
        (n * (-8448. * n + 4992.) - 1144.) / 225225.,
        (1856. * n - 936.) / 225225.,
        8. / 10725.,
        (n * (3584. * n - 3328.) + 1144.) / 315315.,
        (1024. * n - 208.) / 105105.,
        -136. / 63063.,
        (832. - 2560. * n) / 405405.,
        -128. / 135135.,
        128. / 99099.,
    ]
}

/// Evaluate a first degree polynomial in x using
/// [Estrin's scheme](https://en.wikipedia.org/wiki/Estrin%27s_scheme).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
fn evaluate_2_coeffs(coeffs: &[f64], x: f64) -> f64 {
    x.mul_add(coeffs[1], coeffs[0])
}

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    let mut result: f64 = 0.;

    match coeffs.len() {
        // Use Estrin's scheme for 2 coefficients, since same result as Horner's method
        2 => result = evaluate_2_coeffs(coeffs, x),
        _ => {
            if let Some((last, elements)) = coeffs.split_last() {
                result = *last;
                for element in elements.iter().rev() {
                    result = result.mul_add(x, *element);
                }
            }
        }
    }

    result
}

/// The coefficients `C3[l]` in the Fourier expansion of `C3`.
/// CFF Karney, Eq. 26.
/// * `coeffs` - the polynomial coefficients from `evaluate_coeffs_C3x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c3y(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c1 = eps * evaluate_polynomial(&coeffs[0..5], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[5..9], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[9..12], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[12..14], eps);
    let eps_5: f64 = eps * eps_4;
    let c5 = eps_5 * evaluate_polynomial(&coeffs[14..15], eps);
    [0.0, c1, c2, c3, c4, c5]
}

/// The coefficients `C4[l]` in the Fourier expansion of `C4`.
/// CFF Karney, Eq. 64.
/// Unlike the other series, the `C4` series starts at `eps` to the power zero,
/// so `C4[0]` carries a constant term.
/// * `coeffs` - the polynomial coefficients from `evaluate_coeffs_C4x`.
/// * `eps` - epsilon the integration variable derived from Clairaut's constant.
#[must_use]
pub fn evaluate_coeffs_c4y(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c0 = evaluate_polynomial(&coeffs[0..6], eps);
    let c1 = eps * evaluate_polynomial(&coeffs[6..11], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[11..15], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[15..18], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[18..20], eps);
    let eps_5: f64 = eps * eps_4;
    let c5 = eps_5 * evaluate_polynomial(&coeffs[20..21], eps);
    [c0, c1, c2, c3, c4, c5]
}

/// Evaluate the following:
///   `y = sum(c[i] * sin(2*i * angle), i, 1, n)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
/// * `coeffs` - the polynomial coefficients.
/// * `angle` - the Angle.
#[must_use]
pub fn sin_cos_series(coeffs: &[f64], angle: Angle) -> Radians {
    let angle2x = angle.double();

    if angle2x.sin().abs().0 < f64::EPSILON {
        Radians(0.0)
    } else {
        // the Clenshaw ak(theta) parameter, beta(k) = -1
        let ar = 2.0 * angle2x.cos().0;

        let mut index = coeffs.len() - 1;
        let coeffs_length_is_odd = 0 != (index & 1);
        let mut k1 = if coeffs_length_is_odd {
            0.0
        } else {
            coeffs[index]
        };
        if !coeffs_length_is_odd {
            index -= 1;
        }
        let mut k0 = ar.mul_add(k1, coeffs[index]);
        index -= 1;

        // Unroll loop x 2, so accumulators return to their original role.
        while 0 < index {
            k1 = coeffs[index] + ar.mul_add(k0, -k1);
            index -= 1;
            k0 = coeffs[index] + ar.mul_add(k1, -k0);
            index -= 1;
        }
        Radians(angle2x.sin().0 * k0)
    }
}

/// Evaluate the following:
///   `y = sum(c[i] * cos((2*i + 1) * angle), i, 0, n)`
/// using [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm),
/// the series shape of the `C4` area integral.
/// * `coeffs` - the polynomial coefficients.
/// * `angle` - the Angle.
#[must_use]
pub fn cosine_series(coeffs: &[f64], angle: Angle) -> f64 {
    let angle2x = angle.double();

    // the Clenshaw ak(theta) parameter, beta(k) = -1
    let ar = 2.0 * angle2x.cos().0;

    let mut k0 = 0.0;
    let mut k1 = 0.0;
    let mut index = coeffs.len();
    if 0 != (index & 1) {
        index -= 1;
        k0 = coeffs[index];
    }

    // Unroll loop x 2, so accumulators return to their original role.
    while 0 < index {
        index -= 1;
        k1 = ar.mul_add(k0, -k1) + coeffs[index];
        index -= 1;
        k0 = ar.mul_add(k1, -k0) + coeffs[index];
    }
    angle.cos().0 * (k0 - k1)
}
