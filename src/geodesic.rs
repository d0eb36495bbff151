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

//! The geodesic module solves the inverse geodesic problem: finding the
//! azimuths, length, reduced length, geodesic scales and area between a pair
//! of points on the surface of an ellipsoid.
//!
//! It uses the algorithm given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf):
//! the problem is transferred to the auxiliary sphere and Newton's method,
//! safeguarded by bisection of a bracket on the initial azimuth, solves for
//! the azimuth that reproduces the required longitude difference.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    cosine_series, evaluate_a1, evaluate_a2, evaluate_coeffs_c1, evaluate_coeffs_c2,
    evaluate_coeffs_c3y, evaluate_polynomial, sin_cos_series,
};
use crate::ellipsoid::{calculate_epsilon, calculate_parametric_latitude};
use crate::{Caps, Ellipsoid, Error};
use angle_sc::trig::{cosine_from_sine, UnitNegRange};
use angle_sc::{is_small, Angle, Radians};
use unit_sphere::{great_circle, LatLong};

/// The tolerance on the longitude residual, in Radians.
const TOL0: f64 = core::f64::EPSILON;

/// The maximum number of iterations, Newton steps then bisection.
const MAX_ITERS: u32 = 80;

/// The number of iterations that may take a Newton step.
const NEWTON_ITERS: u32 = 20;

/// The distance, reduced length and geodesic scale integrals along a
/// geodesic on the auxiliary sphere.
/// CFF Karney, Eqs. 38-40.
///
/// Only the fields selected by the `Caps` are calculated, the others are NaN.
#[allow(non_snake_case)]
pub(crate) struct Lengths {
    /// the geodesic distance divided by the Semiminor axis.
    pub s12b: f64,
    /// the reduced length divided by the Semiminor axis.
    pub m12b: f64,
    /// the geodesic scale at the finish point.
    pub M12: f64,
    /// the geodesic scale at the start point.
    pub M21: f64,
}

/// The solution of the inverse problem in canonical form, i.e. before the
/// azimuths are restored to the original point order and signs.
struct CanonicalSolution {
    alpha1: Angle,
    alpha2: Angle,
    sigma12: Radians,
    lengths: Lengths,
    area: Option<f64>,
}

/// The solution of the inverse geodesic problem.
pub(crate) struct InverseSolution {
    /// the azimuth at the start point.
    pub alpha1: Angle,
    /// the azimuth at the finish point.
    pub alpha2: Angle,
    /// the arc length on the auxiliary sphere.
    pub arc_length: Radians,
    /// the geodesic distance divided by the Semiminor axis.
    pub s12b: f64,
    /// the reduced length divided by the Semiminor axis.
    pub m12b: Option<f64>,
    /// the geodesic scales at the finish and start points.
    pub scales: Option<(f64, f64)>,
    /// the area under the geodesic, in square metres.
    pub area: Option<f64>,
}

/// Evaluate the distance, reduced length and geodesic scale integrals
/// between a pair of points on the auxiliary sphere.
/// CFF Karney, Eqs. 38-40.
/// * `eps` - epsilon the series expansion variable.
/// * `sigma12` - the arc length between the points.
/// * `sigma1`, `sigma2` - the arc distances of the points from the Northbound
///   equator crossing.
/// * `dn1`, `dn2` - sqrt(1 + k2 * sin^2(beta)) at the points.
/// * `caps` - selects which of the integrals to evaluate.
#[must_use]
pub(crate) fn evaluate_lengths(
    eps: f64,
    sigma12: Radians,
    sigma1: Angle,
    dn1: f64,
    sigma2: Angle,
    dn2: f64,
    caps: Caps,
) -> Lengths {
    let want_distance = caps.contains(Caps::DISTANCE);
    let want_reduced_length = caps.contains(Caps::REDUCED_LENGTH);
    let want_geodesic_scale = caps.contains(Caps::GEODESIC_SCALE);

    let mut lengths = Lengths {
        s12b: f64::NAN,
        m12b: f64::NAN,
        M12: f64::NAN,
        M21: f64::NAN,
    };

    let a1 = evaluate_a1(eps);
    if want_reduced_length || want_geodesic_scale {
        let a2 = evaluate_a2(eps);
        let m0x = a1 - a2;

        let a1p1 = 1.0 + a1;
        let a2p1 = 1.0 + a2;

        let ca = evaluate_coeffs_c1(eps);
        let mut cb = evaluate_coeffs_c2(eps);

        // Assume here that ca.len() >= cb.len()
        for i in 1..cb.len() {
            cb[i] = a1p1 * ca[i] - a2p1 * cb[i];
        }
        let j12 = m0x * sigma12.0 + (sin_cos_series(&cb, sigma2) - sin_cos_series(&cb, sigma1)).0;

        if want_distance {
            let b1 = (sin_cos_series(&ca, sigma2) - sin_cos_series(&ca, sigma1)).0;
            lengths.s12b = a1p1 * (sigma12.0 + b1);
        }
        if want_reduced_length {
            lengths.m12b = dn2 * (sigma1.cos().0 * sigma2.sin().0)
                - dn1 * (sigma1.sin().0 * sigma2.cos().0)
                - sigma1.cos().0 * sigma2.cos().0 * j12;
        }
        if want_geodesic_scale {
            let csig12 = sigma1.cos().0 * sigma2.cos().0 + sigma1.sin().0 * sigma2.sin().0;
            let k2 = 4.0 * eps / ((1.0 - eps) * (1.0 - eps));
            let t = k2 * (sigma2.sin().0 - sigma1.sin().0) * (sigma2.sin().0 + sigma1.sin().0)
                / (dn1 + dn2);
            lengths.M12 = csig12 + (t * sigma2.sin().0 - sigma2.cos().0 * j12) * sigma1.sin().0 / dn1;
            lengths.M21 = csig12 - (t * sigma1.sin().0 - sigma1.cos().0 * j12) * sigma2.sin().0 / dn2;
        }
    } else if want_distance {
        let a1p1 = 1.0 + a1;
        let ca = evaluate_coeffs_c1(eps);
        let b1 = (sin_cos_series(&ca, sigma2) - sin_cos_series(&ca, sigma1)).0;
        lengths.s12b = a1p1 * (sigma12.0 + b1);
    }

    lengths
}

/// Estimate omega12 by solving the astroid problem.
/// Solve k^4+2*k^3-(x^2+y^2-1)*k^2-2*y^2*k-y^2 = 0 for positive root k.
/// * `x`, `y` - astroid parameters, see Karney section 7.
///
/// returns the solution to the astroid problem.
#[must_use]
fn calculate_astroid(x: f64, y: f64) -> f64 {
    let p = x * x;
    let q = y * y;
    let r = (p + q - 1.0) / 6.0;

    // y = 0 with |x| <= 1
    // for y small, positive root is k = abs(y)/sqrt(1-x^2)
    if (q <= 0.0) && (r <= 0.0) {
        0.0
    } else {
        let s = p * q / 4.0;
        let r2 = r * r;
        let r3 = r * r2;
        let mut u = r;

        // The discriminant of the quadratic equation for T3.
        // This is zero on the evolute curve p^(1/3)+q^(1/3) = 1
        let discriminant = s * (s + 2.0 * r3);
        if 0.0 <= discriminant {
            let mut t3 = s + r3;
            // Pick the sign on the sqrt to maximize abs(T3), to minimise loss
            // of precision due to cancellation.
            t3 += if t3 < 0.0 {
                -libm::sqrt(discriminant)
            } else {
                libm::sqrt(discriminant)
            };
            let t = libm::cbrt(t3);
            u += if t == 0.0 { 0.0 } else { t + r2 / t };
        } else {
            // T is complex, but the way u is defined the result is real.
            let angle = libm::atan2(libm::sqrt(-discriminant), -(s + r3));
            // There are three possible cube roots.  We choose the root which
            // avoids cancellation.  Note: discriminant < 0 implies that r < 0.
            u += 2.0 * r * libm::cos(angle / 3.0);
        }

        let v = libm::sqrt(u * u + q); // guaranteed positive
        let uv = if u < 0.0 { q / (v - u) } else { u + v }; // u+v, guaranteed positive
        let w = (uv - q) / (2.0 * v); // positive?

        // Rearrange expression for k to avoid loss of accuracy due to subtraction.
        // Division by 0 not possible because uv > 0, w >= 0.
        uv / (libm::sqrt(uv + w * w) + w) // guaranteed positive
    }
}

/// Estimate the initial azimuth on the auxiliary sphere for a nearly antipodal arc.
/// It calculates and solves the astroid problem.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points
/// on the auxiliary sphere.
/// * `lambda12` - Longitude difference between start and finish points.
///
/// returns the estimate of the initial azimuth on the auxiliary sphere.
#[must_use]
fn estimate_antipodal_initial_azimuth(
    beta1: Angle,
    beta2: Angle,
    lambda12: Angle,
    ellipsoid: &Ellipsoid,
) -> Angle {
    const Y_TOLERANCE: f64 = 200.0 * core::f64::EPSILON;
    const X_TOLERANCE: f64 = 2000.0 / core::f64::consts::FRAC_2_SQRT_PI;

    // Calculate the integration parameter for geodesic
    let clairaut = beta1.cos(); // Note: assumes sin_alpha_1 = 1
    let eps = calculate_epsilon(clairaut, ellipsoid.ep_2());
    let a3f = evaluate_polynomial(&ellipsoid.a3(), eps);

    let lamscale = ellipsoid.f() * beta1.cos().0 * a3f * core::f64::consts::PI;
    let betscale = lamscale * beta1.cos().0;

    // Solve astroid problem
    let x = Radians::from(lambda12.opposite()).0 / lamscale;
    let y = (beta1 + beta2).sin().0 / betscale;

    // Test x and y params
    if (x <= -(1.0 + X_TOLERANCE)) || (y < -Y_TOLERANCE) {
        let k = calculate_astroid(x, y);
        let omg12a = lamscale * (-x * k / (1.0 + k));

        let omega12 = Radians(core::f64::consts::PI - omg12a);
        great_circle::calculate_gc_azimuth(beta1, beta2, Angle::from(omega12))
    } else {
        let sin_alpha = UnitNegRange(if -x < 1.0 { -x } else { 1.0 });
        Angle::new(sin_alpha, cosine_from_sine(sin_alpha, -1.0))
    }
}

/// Calculate the cosine of the longitude difference from the equator crossing.
/// * `beta` the parametric latitude
/// * `cos_azimuth` the cosine of the azimuth at the parametric latitude
///
/// returns the cosine of the longitude difference, zero if the parametric
/// latitude is close to the equator.
#[must_use]
fn calculate_cos_omega(beta: Angle, cos_azimuth: UnitNegRange) -> UnitNegRange {
    if is_small(libm::fabs(beta.sin().0), core::f64::EPSILON) {
        UnitNegRange(1.0)
    } else {
        UnitNegRange(cos_azimuth.0 * beta.cos().0)
    }
}

/// Calculate the azimuth on the auxiliary sphere at latitude beta2 given the
/// latitude beta1 and the azimuth at that latitude, alpha1.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points
/// on the auxiliary sphere.
/// * `alpha1` - start point azimuth.
///
/// returns the finish point azimuth.
#[must_use]
fn calculate_end_azimuth(beta1: Angle, beta2: Angle, alpha1: Angle) -> Angle {
    let clairaut = UnitNegRange(alpha1.sin().0 * beta1.cos().0);

    let sin_alpha2 = if beta2.cos() == beta1.cos() {
        alpha1.sin()
    } else {
        UnitNegRange::clamp(clairaut.0 / beta2.cos().0)
    };

    // Karney's method to calculate the cosine of the end azimuth
    let cos_alpha2 =
        if (beta2.cos() != beta1.cos()) || (libm::fabs(beta2.sin().0) != -beta1.sin().0) {
            let temp1 = alpha1.cos().0 * beta1.cos().0;
            let temp2 = if beta1.cos().0 < libm::fabs(beta1.sin().0) {
                (beta2.cos().0 - beta1.cos().0) * (beta1.cos().0 + beta2.cos().0)
            } else {
                (beta1.sin().0 - beta2.sin().0) * (beta1.sin().0 + beta2.sin().0)
            };
            let temp3 = temp1 * temp1 + temp2;
            let temp4 = if 0.0 < temp3 {
                libm::sqrt(temp3) / beta2.cos().0
            } else {
                0.0
            };
            UnitNegRange::clamp(temp4)
        } else {
            UnitNegRange(libm::fabs(alpha1.cos().0))
        };

    Angle::new(sin_alpha2, cos_alpha2)
}

/// Calculate the longitude difference between the auxiliary sphere and
/// ellipsoid.
#[must_use]
fn delta_omega12(
    clairaut: UnitNegRange,
    eps: f64,
    sigma12: Radians,
    sigma1: Angle,
    sigma2: Angle,
    ellipsoid: &Ellipsoid,
) -> f64 {
    let a3f = evaluate_polynomial(&ellipsoid.a3(), eps);
    let a3c = ellipsoid.f() * clairaut.0 * a3f;

    let c3 = evaluate_coeffs_c3y(&ellipsoid.c3x(), eps);
    let b31 = sin_cos_series(&c3, sigma1);
    let b32 = sin_cos_series(&c3, sigma2);

    // raw f64 sum: Radians addition wraps at half a turn, negating the
    // correction for arcs at or beyond PI
    a3c * (sigma12.0 + b32.0 - b31.0)
}

/// Calculate the area under a geodesic in canonical form: the `C4` series
/// term plus the spherical excess on the authalic sphere.
/// CFF Karney, Eqs. 59-65.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points.
/// * `alpha1`, `alpha2` - the azimuths at the start and finish points.
/// * `omega12` - the longitude difference on the auxiliary sphere.
/// * `meridian` - whether the geodesic lies along a meridian.
///
/// returns the area between the geodesic and the equator, in square metres.
#[must_use]
fn calculate_area(
    beta1: Angle,
    beta2: Angle,
    alpha1: Angle,
    alpha2: Angle,
    omega12: Angle,
    meridian: bool,
    ellipsoid: &Ellipsoid,
) -> f64 {
    let salp0 = alpha1.sin().0 * beta1.cos().0;
    let calp0 = libm::hypot(alpha1.cos().0, alpha1.sin().0 * beta1.sin().0);

    let mut s12_area = 0.0;
    if (calp0 != 0.0) && (salp0 != 0.0) {
        let sigma1 = Angle::from_y_x(beta1.sin().0, alpha1.cos().0 * beta1.cos().0);
        let sigma2 = Angle::from_y_x(beta2.sin().0, alpha2.cos().0 * beta2.cos().0);
        let k2 = ellipsoid.ep_2() * calp0 * calp0;
        let eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);
        // Karney eq. 63: A4 = a^2 * cos(alpha0) * sin(alpha0) * e^2
        let a4 = ellipsoid.a().0 * ellipsoid.a().0 * calp0 * salp0 * ellipsoid.e_2();
        let c4 = ellipsoid.calculate_c4y(eps);
        let b41 = cosine_series(&c4, sigma1);
        let b42 = cosine_series(&c4, sigma2);
        s12_area = a4 * (b42 - b41);
    }

    // The spherical excess, alpha2 - alpha1
    let alp12 = if !meridian && (-0.7071 < omega12.cos().0) && (beta2.sin().0 - beta1.sin().0 < 1.75)
    {
        // points on the same hemisphere and not nearly antipodal,
        // use the difference formula to preserve accuracy for small excesses
        let domg12 = 1.0 + omega12.cos().0;
        let dbet1 = 1.0 + beta1.cos().0;
        let dbet2 = 1.0 + beta2.cos().0;
        2.0 * libm::atan2(
            omega12.sin().0 * (beta1.sin().0 * dbet2 + beta2.sin().0 * dbet1),
            domg12 * (beta1.sin().0 * beta2.sin().0 + dbet1 * dbet2),
        )
    } else {
        let mut salp12 = alpha2.sin().0 * alpha1.cos().0 - alpha2.cos().0 * alpha1.sin().0;
        let mut calp12 = alpha2.cos().0 * alpha1.cos().0 + alpha2.sin().0 * alpha1.sin().0;
        // an antipodal meridional geodesic has azimuths 180 apart
        if (salp12 == 0.0) && (calp12 < 0.0) {
            salp12 = core::f64::EPSILON * alpha1.cos().0;
            calp12 = -1.0;
        }
        libm::atan2(salp12, calp12)
    };

    s12_area + ellipsoid.c2() * alp12
}

/// Solve the inverse problem for points on the same meridian, or with a
/// polar start point, or with a longitude difference of half a turn.
///
/// returns `None` past the conjugate point, where a meridional path is no
/// longer the shortest and Newton's method must be used instead.
#[must_use]
fn solve_meridian(
    beta1: Angle,
    dn1: f64,
    beta2: Angle,
    dn2: f64,
    abs_lambda12: Angle,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Option<CanonicalSolution> {
    // alpha1 follows the longitude difference: zero for a same-meridian path,
    // half a turn for a path through the antipodal meridian, the azimuth at
    // a polar start point
    let alpha1 = abs_lambda12;
    let alpha2 = Angle::default();

    let sigma1 = Angle::from_y_x(beta1.sin().0, alpha1.cos().0 * beta1.cos().0);
    let sigma2 = Angle::from_y_x(beta2.sin().0, alpha2.cos().0 * beta2.cos().0);
    let sig_diff = sigma2 - sigma1;
    // the clamped sine must be +0.0: atan2(-0.0, -1.0) is -PI
    let sigma12 = Radians(libm::atan2(
        sig_diff.sin().0.max(0.0) + 0.0,
        sig_diff.cos().0,
    ));

    // the reduced length is always required for the conjugate point test
    let mut lengths_caps = Caps::DISTANCE | Caps::REDUCED_LENGTH;
    if caps.contains(Caps::GEODESIC_SCALE) {
        lengths_caps |= Caps::GEODESIC_SCALE;
    }
    let lengths = evaluate_lengths(ellipsoid.n(), sigma12, sigma1, dn1, sigma2, dn2, lengths_caps);

    // past the conjugate point a meridional path is no longer shortest
    if (1.0 <= sigma12.0) && (lengths.m12b < 0.0) {
        return None;
    }

    let area = caps
        .contains(Caps::AREA)
        .then(|| calculate_area(beta1, beta2, alpha1, alpha2, Angle::default(), true, ellipsoid));

    Some(CanonicalSolution {
        alpha1,
        alpha2,
        sigma12,
        lengths,
        area,
    })
}

/// Solve the inverse problem iteratively, using Newton's method safeguarded
/// by bisection of a bracket on the initial azimuth.
/// CFF Karney, section 4.
///
/// The function solves `lambda12(alpha1) - lambda12 = 0` for `alpha1`.
/// Newton's method is only used for the first `NEWTON_ITERS` iterations and
/// only while it converges; otherwise the bracket is bisected.
#[allow(clippy::too_many_arguments)]
fn solve_newton(
    beta1: Angle,
    dn1: f64,
    beta2: Angle,
    dn2: f64,
    abs_lambda12: Angle,
    gc_length: Radians,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<CanonicalSolution, Error> {
    let tolb = TOL0 * libm::sqrt(TOL0);
    let antipodal_arc_threshold = core::f64::consts::PI * ellipsoid.one_minus_f();

    // Estimate the azimuth at the start of the geodesic
    let mut alpha1 = if antipodal_arc_threshold < gc_length.0 {
        estimate_antipodal_initial_azimuth(beta1, beta2, abs_lambda12, ellipsoid)
    } else {
        great_circle::calculate_gc_azimuth(beta1, beta2, abs_lambda12)
    };
    // keep alpha1 within the canonical quadrant pair, (0, 180) exclusive
    if alpha1.sin().0 < core::f64::EPSILON {
        alpha1 = Angle::new(UnitNegRange(core::f64::EPSILON), alpha1.cos());
    }

    // the bracket on alpha1 within which the longitude residual changes sign
    let mut alpha1a = Angle::new(UnitNegRange(core::f64::EPSILON), UnitNegRange(1.0));
    let mut alpha1b = Angle::new(UnitNegRange(core::f64::EPSILON), UnitNegRange(-1.0));
    let mut tripn = false;
    let mut tripb = false;

    let mut alpha2 = alpha1;
    let mut sigma1 = Angle::default();
    let mut sigma2 = Angle::default();
    let mut omega12 = Angle::default();
    let mut clairaut = UnitNegRange(0.0);
    let mut eps = 0.0;
    let mut sigma12 = gc_length;
    let mut converged = false;

    for it in 0..MAX_ITERS {
        // Calculate Clairaut's constant
        clairaut = UnitNegRange(alpha1.sin().0 * beta1.cos().0);
        eps = calculate_epsilon(clairaut, ellipsoid.ep_2());

        // Calculate first longitude (omega1) and distance (sigma1) from the
        // Northbound equator crossing
        let sin_omega1 = UnitNegRange(clairaut.0 * beta1.sin().0);
        let cos_omega1 = calculate_cos_omega(beta1, alpha1.cos());
        let omega1 = Angle::from_y_x(sin_omega1.0, cos_omega1.0);
        sigma1 = Angle::from_y_x(beta1.sin().0, cos_omega1.0);

        // Calculate azimuth at the end point
        alpha2 = calculate_end_azimuth(beta1, beta2, alpha1);

        // Calculate second longitude (omega2) and distance (sigma2) from the
        // Northbound equator crossing
        let sin_omega2 = UnitNegRange(clairaut.0 * beta2.sin().0);
        let cos_omega2 = calculate_cos_omega(beta2, alpha2.cos());
        let omega2 = Angle::from_y_x(sin_omega2.0, cos_omega2.0);
        sigma2 = Angle::from_y_x(beta2.sin().0, cos_omega2.0);

        // Calculate Longitude difference on the auxiliary sphere,
        // clamped to range 0 to Pi
        omega12 = omega2 - omega1;
        if omega12.sin().0 < 0.0 {
            omega12 = Angle::from_y_x(0.0, omega12.cos().0);
        }

        // Calculate great circle length on the auxiliary sphere,
        // clamped to range 0 to Pi
        let mut sig_diff = sigma2 - sigma1;
        if sig_diff.sin().0 < 0.0 {
            sig_diff = Angle::from_y_x(0.0, sig_diff.cos().0);
        }
        sigma12 = Radians(libm::atan2(sig_diff.sin().0 + 0.0, sig_diff.cos().0));

        // Calculate difference between geodesic and great circle longitudes
        let eta = Radians::from(omega12 - abs_lambda12);
        let domg12 = delta_omega12(clairaut, eps, sigma12, sigma1, sigma2, ellipsoid);

        // The residual: difference between differences
        let v = eta.0 - domg12;
        if tripb || libm::fabs(v) < (if tripn { 8.0 } else { 1.0 }) * TOL0 {
            converged = true;
            break;
        }

        // Maintain the bracket from the sign of the residual.
        // The cotangent comparisons reject estimates outside the bracket
        // while Newton steps are still being attempted.
        if (0.0 < v)
            && ((NEWTON_ITERS < it)
                || (alpha1b.cos().0 / alpha1b.sin().0 < alpha1.cos().0 / alpha1.sin().0))
        {
            alpha1b = alpha1;
        } else if (v < 0.0)
            && ((NEWTON_ITERS < it)
                || (alpha1.cos().0 / alpha1.sin().0 < alpha1a.cos().0 / alpha1a.sin().0))
        {
            alpha1a = alpha1;
        }

        let mut stepped = false;
        if it < NEWTON_ITERS {
            // The derivative of the residual, from the reduced length.
            // Karney eq. 46, with the special case for an end point at a pole.
            let dv = if libm::fabs(alpha2.cos().0) < core::f64::EPSILON {
                -2.0 * ellipsoid.one_minus_f() * dn1 / beta1.sin().0
            } else {
                let lengths = evaluate_lengths(
                    eps,
                    sigma12,
                    sigma1,
                    dn1,
                    sigma2,
                    dn2,
                    Caps::REDUCED_LENGTH,
                );
                ellipsoid.one_minus_f() * lengths.m12b / (alpha2.cos().0 * beta2.cos().0)
            };
            if 0.0 < dv {
                let dalpha1 = -v / dv;
                let next_alpha1 = alpha1 + Angle::from(Radians(dalpha1));
                // Only accept the Newton step if it stays within the bracket
                if (libm::fabs(dalpha1) < core::f64::consts::PI) && (0.0 < next_alpha1.sin().0) {
                    alpha1 = next_alpha1;
                    tripn = libm::fabs(v) <= 16.0 * TOL0;
                    stepped = true;
                }
            }
        }
        if !stepped {
            log::trace!("bisecting the initial azimuth bracket at iteration {it}");
            alpha1 = Angle::from_y_x(
                0.5 * (alpha1a.sin().0 + alpha1b.sin().0),
                0.5 * (alpha1a.cos().0 + alpha1b.cos().0),
            );
            tripn = false;
            tripb = (libm::fabs(alpha1a.sin().0 - alpha1.sin().0) + (alpha1a.cos().0 - alpha1.cos().0)
                < tolb)
                || (libm::fabs(alpha1.sin().0 - alpha1b.sin().0)
                    + (alpha1.cos().0 - alpha1b.cos().0)
                    < tolb);
        }
    }

    if !converged {
        log::warn!("inverse geodesic solution failed to converge after {MAX_ITERS} iterations");
        return Err(Error::ConvergenceFailure(MAX_ITERS));
    }

    // only evaluate the integrals that the caller requested
    let mut lengths_caps = Caps::DISTANCE;
    if caps.contains(Caps::REDUCED_LENGTH) {
        lengths_caps |= Caps::REDUCED_LENGTH;
    }
    if caps.contains(Caps::GEODESIC_SCALE) {
        lengths_caps |= Caps::GEODESIC_SCALE;
    }
    let lengths = evaluate_lengths(eps, sigma12, sigma1, dn1, sigma2, dn2, lengths_caps);
    let area = caps
        .contains(Caps::AREA)
        .then(|| calculate_area(beta1, beta2, alpha1, alpha2, omega12, false, ellipsoid));

    Ok(CanonicalSolution {
        alpha1,
        alpha2,
        sigma12,
        lengths,
        area,
    })
}

/// Solve the inverse problem in canonical form: the start point is South of
/// the equator, further from it than the finish point, and the longitude
/// difference is not negative.
#[allow(clippy::too_many_arguments)]
fn solve_canonical(
    beta1: Angle,
    dn1: f64,
    beta2: Angle,
    dn2: f64,
    abs_lambda12: Angle,
    gc_length: Radians,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<CanonicalSolution, Error> {
    const MAX_LENGTH: f64 = core::f64::consts::PI - 2.0 * great_circle::MIN_VALUE;

    let abs_lambda12_rad = libm::fabs(Radians::from(abs_lambda12).0);

    // coincident points
    if (gc_length.0 <= great_circle::MIN_VALUE) && (abs_lambda12_rad <= great_circle::MIN_VALUE) {
        return Ok(CanonicalSolution {
            alpha1: Angle::default(),
            alpha2: Angle::default(),
            sigma12: Radians(0.0),
            lengths: Lengths {
                s12b: 0.0,
                m12b: 0.0,
                M12: 1.0,
                M21: 1.0,
            },
            area: caps.contains(Caps::AREA).then_some(0.0),
        });
    }

    // Determine whether a meridional path
    if (abs_lambda12_rad <= great_circle::MIN_VALUE)
        || (MAX_LENGTH <= abs_lambda12_rad)
        || (beta1.cos().0 <= great_circle::MIN_VALUE)
        || (beta2.cos().0 <= great_circle::MIN_VALUE)
    {
        if let Some(solution) =
            solve_meridian(beta1, dn1, beta2, dn2, abs_lambda12, caps, ellipsoid)
        {
            return Ok(solution);
        }
    }

    // Determine whether an equatorial path: both points on the equator and
    // the longitude difference shorter than the flattening-dependent limit
    if (libm::fabs(beta1.sin().0) <= great_circle::MIN_VALUE)
        && (libm::fabs(beta2.sin().0) <= great_circle::MIN_VALUE)
        && (abs_lambda12_rad <= ellipsoid.one_minus_f() * core::f64::consts::PI)
    {
        let east = Angle::new(UnitNegRange(1.0), UnitNegRange(0.0));
        let sigma12 = Radians(abs_lambda12_rad * ellipsoid.recip_one_minus_f());
        // s12 = a * lambda12 exactly
        let s12b = abs_lambda12_rad * ellipsoid.a().0 / ellipsoid.b().0;
        let cos_sigma12 = libm::cos(sigma12.0);
        return Ok(CanonicalSolution {
            alpha1: east,
            alpha2: east,
            sigma12,
            lengths: Lengths {
                s12b,
                m12b: libm::sin(sigma12.0),
                M12: cos_sigma12,
                M21: cos_sigma12,
            },
            area: caps.contains(Caps::AREA).then_some(0.0),
        });
    }

    solve_newton(
        beta1,
        dn1,
        beta2,
        dn2,
        abs_lambda12,
        gc_length,
        caps,
        ellipsoid,
    )
}

/// Solve the inverse geodesic problem between a pair of positions.
///
/// The points are first put into canonical form: starting at the latitude
/// furthest from the equator, South of the equator, with a non negative
/// longitude difference. The azimuths of the canonical solution are then
/// restored to the original point order and signs.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `caps` - selects the optional quantities to calculate.
pub(crate) fn solve_inverse(
    a: &LatLong,
    b: &LatLong,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<InverseSolution, Error> {
    let lat_a = Angle::from(a.lat());
    let lat_b = Angle::from(b.lat());
    let lambda12 = Angle::from(b.lon() - a.lon());

    // Start at the latitude furthest from the Equator
    let swap_latitudes = libm::fabs(lat_a.sin().0) < libm::fabs(lat_b.sin().0);
    let mut lat1 = if swap_latitudes { lat_b } else { lat_a };
    let mut lat2 = if swap_latitudes { lat_a } else { lat_b };

    // Start South of the Equator
    let negate_latitude = 0.0 < lat1.sin().0;
    if negate_latitude {
        lat1 = -lat1;
        lat2 = -lat2;
    }

    // Use positive lambda12, so all canonical azimuths are positive.
    // The sign of a zero longitude difference selects the azimuth signs
    // for meridional paths, so the sign bit must be tested, not the value.
    let lambda12_negative = lambda12.sin().0.is_sign_negative();
    let abs_lambda12 = lambda12.abs();

    // project latitudes onto the auxiliary sphere
    let beta1 = calculate_parametric_latitude(lat1, ellipsoid.one_minus_f());
    let beta2 = calculate_parametric_latitude(lat2, ellipsoid.one_minus_f());

    // Points symmetric about the equator lie on a bifurcation line of the
    // inverse problem, so their parametric latitudes must match exactly.
    // When beta1 is closer to a pole its cosine is the sensitive measure of
    // the latitude difference, otherwise its sine is.
    let beta2 = if beta1.cos().0 < -beta1.sin().0 {
        if beta2.cos() == beta1.cos() {
            Angle::new(
                UnitNegRange(if beta2.sin().0 < 0.0 {
                    beta1.sin().0
                } else {
                    -beta1.sin().0
                }),
                beta2.cos(),
            )
        } else {
            beta2
        }
    } else if libm::fabs(beta2.sin().0) == -beta1.sin().0 {
        Angle::new(beta2.sin(), beta1.cos())
    } else {
        beta2
    };

    let dn1 = libm::sqrt(1.0 + ellipsoid.ep_2() * beta1.sin().0 * beta1.sin().0);
    let dn2 = libm::sqrt(1.0 + ellipsoid.ep_2() * beta2.sin().0 * beta2.sin().0);

    let gc_length = great_circle::calculate_gc_distance(beta1, beta2, abs_lambda12);

    let solution = solve_canonical(
        beta1,
        dn1,
        beta2,
        dn2,
        abs_lambda12,
        gc_length,
        caps,
        ellipsoid,
    )?;

    let mut alpha1 = solution.alpha1;
    let mut alpha2 = solution.alpha2;
    #[allow(non_snake_case)]
    let (mut M12, mut M21) = (solution.lengths.M12, solution.lengths.M21);
    // coincident points keep the North azimuth convention, distinct points
    // have their azimuths restored to the original order and signs
    if 0.0 < solution.sigma12.0 {
        if swap_latitudes {
            core::mem::swap(&mut alpha1, &mut alpha2);
            core::mem::swap(&mut M12, &mut M21);
        }
        if swap_latitudes != negate_latitude {
            alpha1 = alpha1.negate_cos();
            alpha2 = alpha2.negate_cos();
        }
        if lambda12_negative {
            alpha1 = -alpha1;
            alpha2 = -alpha2;
        }
    }
    let area = solution.area.map(|s12_area| {
        // swapping the points also reverses the longitude difference,
        // so the two swap factors cancel in the area sign
        let mut sign = if negate_latitude { -1.0 } else { 1.0 };
        if lambda12_negative {
            sign = -sign;
        }
        sign * s12_area
    });

    Ok(InverseSolution {
        alpha1,
        alpha2,
        arc_length: solution.sigma12,
        s12b: solution.lengths.s12b,
        m12b: caps
            .contains(Caps::REDUCED_LENGTH)
            .then_some(solution.lengths.m12b),
        scales: caps.contains(Caps::GEODESIC_SCALE).then_some((M12, M21)),
        area,
    })
}
