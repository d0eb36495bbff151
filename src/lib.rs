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

//! ellipsoid-geodesic
//!
//! A library for solving the direct and inverse geodesic problems on an
//! ellipsoid of revolution.
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic segment](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! It is the equivalent of a straight line segment in planar geometry or a
//! [great circle arc](https://en.wikipedia.org/wiki/Great_circle) on the
//! surface of a sphere.
//!
//! The library solves:
//!
//! - the **direct** problem: given a start position, an azimuth and a distance
//!   (or an arc length), find the finish position and azimuth, see [direct]
//!   and [`direct_arc`];
//! - the **inverse** problem: given a pair of positions, find the azimuths and
//!   the distance between them, see [inverse].
//!
//! Both problems can also calculate the reduced length `m12`, the geodesic
//! scales `M12` and `M21`, and the area `S12` between the geodesic and the
//! equator. The [Caps] bit mask selects which of the optional quantities to
//! calculate.
//!
//! ## Design
//!
//! The library uses the algorithms given by Charles Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
//! and implemented in his [GeographicLib](https://geographiclib.sourceforge.io/)
//! library: geodesic segments are modelled as great circle arcs on the
//! surface of an auxiliary sphere.
//!
//! The `Ellipsoid` struct represents an ellipsoid of revolution: oblate,
//! spherical or prolate. The static `WGS84_ELLIPSOID` represents the WGS-84
//! `Ellipsoid` defined by its
//! [NIMA TR8350.2](https://earth-info.nga.mil/php/download.php?file=coord-wgs84)
//! primary parameters.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and perform great-circle calculations on the auxiliary sphere;
//! - [icao-units](https://crates.io/crates/icao-units) - to define `Metres`.
//!
//! # Examples
//! ```
//! use ellipsoid_geodesic::*;
//! use angle_sc::is_within_tolerance;
//!
//! let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
//! let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
//!
//! let result = inverse(&istanbul, &washington, Caps::STANDARD, &WGS84_ELLIPSOID)
//!     .expect("valid positions");
//! assert!(is_within_tolerance(
//!     -50.69375304113997,
//!     result.azi1.unwrap().0,
//!     1e-8
//! ));
//! assert!(is_within_tolerance(8339863.136005359, result.s12.unwrap().0, 1e-3));
//! ```

pub mod ellipsoid;
pub mod geodesic;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use angle_sc::trig;
use once_cell::sync::Lazy;
use unit_sphere::great_circle;

/// The errors that can occur when solving a geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The parameters do not describe an ellipsoid of revolution.
    #[error("invalid ellipsoid parameters: a: {a} metres, f: {f}")]
    InvalidEllipsoid {
        /// the Semimajor axis, in metres.
        a: f64,
        /// the flattening ratio.
        f: f64,
    },
    /// A latitude is outside the range -90° to 90°, or a coordinate is not
    /// finite.
    #[error("invalid position, latitude: {0} degrees")]
    InvalidPoint(f64),
    /// The inverse problem solver failed to converge.
    #[error("failed to converge after {0} iterations")]
    ConvergenceFailure(u32),
}

/// A bit mask selecting the optional quantities of a geodesic calculation.
///
/// # Examples
/// ```
/// use ellipsoid_geodesic::Caps;
///
/// let caps = Caps::DISTANCE | Caps::AREA;
/// assert!(caps.contains(Caps::AREA));
/// assert!(!caps.contains(Caps::REDUCED_LENGTH));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Caps(u32);

impl Caps {
    /// Calculate nothing beyond the positions, azimuths and arc length.
    pub const NONE: Self = Self(0);
    /// Calculate the distance `s12`.
    pub const DISTANCE: Self = Self(1);
    /// Calculate the reduced length `m12`.
    pub const REDUCED_LENGTH: Self = Self(1 << 1);
    /// Calculate the geodesic scales `M12` and `M21`.
    pub const GEODESIC_SCALE: Self = Self(1 << 2);
    /// Calculate the area `S12`.
    pub const AREA: Self = Self(1 << 3);
    /// The quantities calculated by default.
    pub const STANDARD: Self = Self::DISTANCE;
    /// All of the quantities.
    pub const ALL: Self = Self(0xF);

    /// Whether all of the quantities in `other` are selected.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl core::ops::BitOr for Caps {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for Caps {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The results of a geodesic calculation.
///
/// Quantities that were not requested in the [Caps] are `None`, as are the
/// inputs of the operation performed, except that [direct] echoes its
/// distance as `s12`.
#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicResult {
    /// the latitude of the finish point.
    pub lat2: Option<Degrees>,
    /// the longitude of the finish point.
    pub lon2: Option<Degrees>,
    /// the azimuth at the start point.
    pub azi1: Option<Degrees>,
    /// the azimuth at the finish point.
    pub azi2: Option<Degrees>,
    /// the distance between the points, in metres.
    pub s12: Option<Metres>,
    /// the arc length between the points on the auxiliary sphere, in degrees.
    pub a12: Degrees,
    /// the reduced length of the geodesic, in metres.
    pub m12: Option<Metres>,
    /// the geodesic scale of the finish point relative to the start point.
    pub M12: Option<f64>,
    /// the geodesic scale of the start point relative to the finish point.
    pub M21: Option<f64>,
    /// the area between the geodesic and the equator, in square metres.
    pub S12: Option<f64>,
}

/// The parameters and derived constants of an ellipsoid of revolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The reciprocal of one minus the flattening ratio.
    recip_one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,

    /// The A3 series `coefficients` of the ellipsoid.
    a3: [f64; 6],
    /// The C3x series `coefficients` of the ellipsoid.
    c3x: [f64; 15],
    /// The C4x series `coefficients` of the ellipsoid.
    c4x: [f64; 21],
    /// The square of the authalic radius of the ellipsoid.
    c2: f64,
}

impl Ellipsoid {
    /// Construct an `Ellipsoid` from its Semimajor axis and flattening ratio.
    ///
    /// # Errors
    /// `Error::InvalidEllipsoid` if either parameter is not finite, the
    /// Semimajor axis is not positive or the flattening ratio is one or more.
    /// * `a` - the Semimajor axis of the `Ellipsoid`, in metres.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    pub fn new(a: Metres, f: f64) -> Result<Self, Error> {
        if !a.0.is_finite() || !f.is_finite() || a.0 <= 0.0 || 1.0 <= f {
            Err(Error::InvalidEllipsoid { a: a.0, f })
        } else {
            Ok(Self::from_parameters(a, f))
        }
    }

    /// Construct an `Ellipsoid` from parameters known to be valid.
    fn from_parameters(a: Metres, f: f64) -> Self {
        let one_minus_f = 1.0 - f;
        let b = ellipsoid::calculate_minor_axis(a, f);
        let e_2 = ellipsoid::calculate_sq_eccentricity(f);
        let n = ellipsoid::calculate_3rd_flattening(f);
        Self {
            a,
            f,
            b,
            one_minus_f,
            recip_one_minus_f: 1.0 / one_minus_f,
            e_2,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
            n,
            a3: ellipsoid::coefficients::evaluate_coeffs_a3(n),
            c3x: ellipsoid::coefficients::evaluate_coeffs_c3x(n),
            c4x: ellipsoid::coefficients::evaluate_coeffs_c4x(n),
            c2: ellipsoid::calculate_sq_authalic_radius(a, b, e_2),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The reciprocal of one minus the flattening ratio.
    #[must_use]
    pub const fn recip_one_minus_f(&self) -> f64 {
        self.recip_one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The A3 series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn a3(&self) -> [f64; 6] {
        self.a3
    }

    /// The C3x series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn c3x(&self) -> [f64; 15] {
        self.c3x
    }

    /// The C4x series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn c4x(&self) -> [f64; 21] {
        self.c4x
    }

    /// The square of the authalic radius: the radius of the sphere with the
    /// same surface area as the ellipsoid.
    #[must_use]
    pub const fn c2(&self) -> f64 {
        self.c2
    }

    /// The surface area of the ellipsoid, in square metres.
    #[must_use]
    pub fn ellipsoid_area(&self) -> f64 {
        4.0 * core::f64::consts::PI * self.c2
    }

    /// Calculate epsilon, the variable used in series expansions.
    /// Note: epsilon is positive and small.
    /// * `clairaut` - Clairaut's constant.
    #[must_use]
    pub fn calculate_epsilon(&self, clairaut: trig::UnitNegRange) -> f64 {
        ellipsoid::calculate_epsilon(clairaut, self.ep_2)
    }

    /// Calculate a3f from the A3 series `coefficients` of the ellipsoid.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_a3f(&self, eps: f64) -> f64 {
        ellipsoid::coefficients::evaluate_polynomial(&self.a3, eps)
    }

    /// Calculate a3c from the A3 series `coefficients` of the ellipsoid.
    /// * `clairaut` - Clairaut's constant.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_a3c(&self, clairaut: trig::UnitNegRange, eps: f64) -> f64 {
        self.f * clairaut.0 * self.calculate_a3f(eps)
    }

    /// Calculate the coefficients `C3[l]` in the Fourier expansion of `C3`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_c3y(&self, eps: f64) -> [f64; 6] {
        ellipsoid::coefficients::evaluate_coeffs_c3y(&self.c3x, eps)
    }

    /// Calculate the coefficients `C4[l]` in the Fourier expansion of `C4`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_c4y(&self, eps: f64) -> [f64; 6] {
        ellipsoid::coefficients::evaluate_coeffs_c4y(&self.c4x, eps)
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);

/// A geodesic segment on the surface of an ellipsoid.
///
/// A geodesic segment on an ellipsoid is the shortest path between two points.
/// It is represented by a great circle arc on the auxiliary sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodesicSegment<'a> {
    /// The parametric start latitude on the auxiliary sphere.
    beta: Angle,
    /// The start longitude.
    lon: Angle,
    /// The start azimuth.
    azi: Angle,
    /// Azimuth at the Equator.
    azi0: Angle,
    /// Great circle arc distance to the first Equator crossing.
    sigma1: Angle,
    /// Great circle arc length on the auxiliary sphere in radians.
    arc_length: Radians,
    /// Integration constant: epsilon, derived from Clairaut's constant.
    eps: f64,
    /// constant used to convert geodesic/great circle distances.
    a1: f64,
    /// constant used to convert geodesic/great circle longitudes.
    a3c: f64,
    /// Start parameter for geodesic/great circle distance differences.
    b11: Radians,
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
}

impl Validate for GeodesicSegment<'_> {
    /// Test whether a `GeodesicSegment` is valid.
    /// Whether 0° <= `latitude` <= 90° and 0 <= `arc_length` <= π.
    fn is_valid(&self) -> bool {
        self.beta.cos().0 >= 0.0 && (0.0..=core::f64::consts::PI).contains(&self.arc_length.0)
    }
}

impl<'a> GeodesicSegment<'a> {
    /// Construct a `GeodesicSegment`
    /// * `beta` - the start point parametric latitude on the auxiliary sphere.
    /// * `lon` - the start point longitude.
    /// * `azi` - the start azimuth.
    /// * `arc_length` - the great circle arc length on the auxiliary sphere in radians.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    #[must_use]
    pub fn new(
        beta: Angle,
        lon: Angle,
        azi: Angle,
        arc_length: Radians,
        ellipsoid: &'a Ellipsoid,
    ) -> Self {
        // Calculate the azimuth at the first Equator crossing
        let clairaut = trig::UnitNegRange(azi.sin().0 * beta.cos().0);
        let azi0 = Angle::new(clairaut, trig::swap_sin_cos(clairaut));

        // Calculate the distance to the first Equator crossing
        let sigma1 = Angle::from_y_x(beta.sin().0, beta.cos().0 * azi.cos().0);

        // Calculate eps and c1 for calculating coefficients
        let eps = ellipsoid.calculate_epsilon(azi0.sin());
        let c1 = ellipsoid::coefficients::evaluate_coeffs_c1(eps);
        Self {
            beta,
            lon,
            azi,
            azi0,
            sigma1,
            arc_length,
            eps,
            a1: ellipsoid::coefficients::evaluate_a1(eps) + 1.0,
            a3c: ellipsoid.calculate_a3c(azi0.sin(), eps),
            b11: ellipsoid::coefficients::sin_cos_series(&c1, sigma1),
            ellipsoid,
        }
    }

    /// Construct a `GeodesicSegment` using the "direct" method.
    /// @pre |lat| <= 90.0 degrees.
    /// * `a` - the start position in geodetic coordinates.
    /// * `azimuth` - the azimuth at the start position.
    /// * `arc_length` - the Great Circle arc length on the auxiliary sphere in radians.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    #[must_use]
    pub fn from_lat_lon_azi_arc_length(
        a: &LatLong,
        azimuth: Angle,
        arc_length: Radians,
        ellipsoid: &'a Ellipsoid,
    ) -> Self {
        let a_lat = Angle::from(a.lat());
        let a_lon = Angle::from(a.lon());
        GeodesicSegment::new(
            ellipsoid.calculate_parametric_latitude(a_lat),
            a_lon,
            azimuth,
            arc_length,
            ellipsoid,
        )
    }

    /// Construct a `GeodesicSegment` using the "direct" method with the
    /// length in metres.
    /// @pre |lat| <= 90.0 degrees.
    /// * `a` - the start position in geodetic coordinates.
    /// * `azimuth` - the azimuth at the start position.
    /// * `length` - the length on the `Ellipsoid` in metres.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    #[must_use]
    pub fn from_lat_lon_azi_length(
        a: &LatLong,
        azimuth: Angle,
        length: Metres,
        ellipsoid: &'a Ellipsoid,
    ) -> Self {
        let mut arc =
            GeodesicSegment::from_lat_lon_azi_arc_length(a, azimuth, Radians(0.0), ellipsoid);
        arc.set_arc_length(arc.metres_to_radians(length));
        arc
    }

    /// Construct a `GeodesicSegment` between a pair of positions, the
    /// "indirect" method.
    ///
    /// # Errors
    /// `Error::ConvergenceFailure` if the inverse problem between the
    /// positions fails to converge.
    /// @pre |lat| <= 90.0 degrees.
    /// * `a`, `b` - the start and finish positions in geodetic coordinates.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    pub fn between_positions(
        a: &LatLong,
        b: &LatLong,
        ellipsoid: &'a Ellipsoid,
    ) -> Result<Self, Error> {
        let solution = geodesic::solve_inverse(a, b, Caps::NONE, ellipsoid)?;
        let a_lat = Angle::from(a.lat());
        // if a is at the North or South pole use b's longitude
        let a = if a_lat.cos().0 < great_circle::MIN_VALUE {
            LatLong::new(a.lat(), b.lon())
        } else {
            *a
        };
        Ok(Self::from_lat_lon_azi_arc_length(
            &a,
            solution.alpha1,
            solution.arc_length,
            ellipsoid,
        ))
    }

    /// Accessor for the start parametric latitude on the auxiliary sphere.
    #[must_use]
    pub const fn beta(&self) -> Angle {
        self.beta
    }

    /// Accessor for the start longitude.
    #[must_use]
    pub const fn lon(&self) -> Angle {
        self.lon
    }

    /// Accessor for the start azimuth.
    #[must_use]
    pub const fn azi(&self) -> Angle {
        self.azi
    }

    /// Set the `arc_length` of a `GeodesicSegment`
    /// * `arc_length` - the great circle arc length of the `GeodesicSegment`.
    pub fn set_arc_length(&mut self, arc_length: Radians) -> &mut Self {
        self.arc_length = arc_length;
        self
    }

    /// Accessor for the arc length on the auxiliary sphere in radians.
    #[must_use]
    pub const fn arc_length(&self) -> Radians {
        self.arc_length
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// Convert a distance in metres on the ellipsoid to radians on the
    /// auxiliary sphere.
    /// * `distance` - the distance along the `GeodesicSegment` in metres.
    ///
    /// returns the distance along the great circle arc in radians.
    #[must_use]
    pub fn metres_to_radians(&self, distance: Metres) -> Radians {
        if libm::fabs(distance.0) < great_circle::MIN_VALUE {
            Radians(0.0)
        } else {
            let tau12 = Radians(distance.0 / (self.ellipsoid.b().0 * self.a1));
            let tau_sum = Angle::from(self.b11 + tau12);
            let c1p = ellipsoid::coefficients::evaluate_coeffs_c1p(self.eps);
            let b12 = ellipsoid::coefficients::sin_cos_series(&c1p, self.sigma1 + tau_sum);

            // raw f64 sum: the arc length is a signed length, not a periodic
            // angle, and Radians addition wraps half turn arcs to -PI
            Radians(tau12.0 + b12.0 + self.b11.0)
        }
    }

    /// Convert a great circle distance in radians on the auxiliary sphere to
    /// metres on the ellipsoid.
    /// * `arc_distance` - the great circle distance in radians on the auxiliary sphere.
    /// * `sigma` the `arc_distance` as an `Angle`.
    ///
    /// returns the distance in metres on the ellipsoid.
    #[must_use]
    pub fn radians_to_metres(&self, arc_distance: Radians, sigma: Angle) -> Metres {
        let sigma_sum = self.sigma1 + sigma;
        let c1 = ellipsoid::coefficients::evaluate_coeffs_c1(self.eps);
        let b12 = ellipsoid::coefficients::sin_cos_series(&c1, sigma_sum);
        // raw f64 sum, see `metres_to_radians`
        Metres(self.ellipsoid.b().0 * self.a1 * (arc_distance.0 + b12.0 - self.b11.0))
    }

    /// Accessor for the length of the `GeodesicSegment` in metres.
    #[must_use]
    pub fn length(&self) -> Metres {
        self.radians_to_metres(self.arc_length, Angle::from(self.arc_length))
    }

    /// Calculate the parametric latitude at the great circle length.
    /// * `sigma` - the arc distance on the auxiliary sphere as an Angle.
    ///
    /// return the parametric latitude of the position at sigma.
    #[must_use]
    pub fn arc_beta(&self, sigma: Angle) -> Angle {
        great_circle::calculate_latitude(self.beta, self.azi, sigma)
    }

    /// Calculate the geodetic latitude at the great circle arc distance.
    /// * `sigma` - the arc distance on the auxiliary sphere as an Angle.
    ///
    /// return the geodetic latitude of the position at `sigma`.
    #[must_use]
    pub fn arc_latitude(&self, sigma: Angle) -> Angle {
        self.ellipsoid
            .calculate_geodetic_latitude(self.arc_beta(sigma))
    }

    /// Calculate the geodetic latitude at the length along the geodesic.
    /// * `distance` - the distance along the `GeodesicSegment`, in metres.
    ///
    /// return the geodetic latitude of the position at distance.
    #[must_use]
    pub fn latitude(&self, distance: Metres) -> Angle {
        let sigma = Angle::from(self.metres_to_radians(distance));
        self.arc_latitude(sigma)
    }

    /// Calculate the azimuth at the great circle length.
    /// * `sigma` - the arc distance on the auxiliary sphere as an Angle.
    ///
    /// return the azimuth at `sigma`.
    #[must_use]
    pub fn arc_azimuth(&self, sigma: Angle) -> Angle {
        const MAX_LAT: f64 = 1.0 - great_circle::MIN_VALUE;

        let sigma_sum = self.sigma1 + sigma;
        let sin_beta = self.azi0.cos().0 * sigma_sum.sin().0;

        // if at North pole, only valid azimuth is due South
        if MAX_LAT < sin_beta {
            Angle::new(trig::UnitNegRange(0.0), trig::UnitNegRange(-1.0))
        } else {
            Angle::from_y_x(self.azi0.sin().0, self.azi0.cos().0 * sigma_sum.cos().0)
        }
    }

    /// Calculate the azimuth at the length along the geodesic.
    /// * `distance` - the distance along the `GeodesicSegment`, in metres.
    ///
    /// return the azimuth of the geodesic/great circle at length.
    #[must_use]
    pub fn azimuth(&self, distance: Metres) -> Angle {
        let sigma = Angle::from(self.metres_to_radians(distance));
        self.arc_azimuth(sigma)
    }

    /// Calculate the geodesic longitude difference at the arc distance along
    /// the auxiliary sphere.
    /// * `arc_distance` - the great circle arc distance on the auxiliary sphere.
    /// * `sigma` - the arc distance as an Angle.
    ///
    /// return the longitude difference from the start point.
    #[must_use]
    pub fn delta_longitude(&self, arc_distance: Radians, sigma: Angle) -> Angle {
        if arc_distance.abs().0 < great_circle::MIN_VALUE {
            Angle::default()
        } else {
            // The great circle distance from Northward Equator crossing.
            let sigma_sum = self.sigma1 + sigma;

            // The longitude difference on the auxiliary sphere, omega12.
            let omega12 = Angle::from_y_x(self.azi0.sin().0 * sigma_sum.sin().0, sigma_sum.cos().0)
                - Angle::from_y_x(
                    self.azi0.sin().0 * self.beta.sin().0,
                    self.beta.cos().0 * self.azi.cos().0,
                );

            let c3 = self.ellipsoid.calculate_c3y(self.eps);
            let b31 = ellipsoid::coefficients::sin_cos_series(&c3, self.sigma1);
            let b32 = ellipsoid::coefficients::sin_cos_series(&c3, sigma_sum);

            omega12 - Angle::from(Radians(self.a3c * (arc_distance.0 + (b32.0 - b31.0))))
        }
    }

    /// Calculate the geodesic longitude at the arc distance along the
    /// auxiliary sphere.
    /// * `arc_distance` - the great circle arc distance on the auxiliary sphere.
    /// * `sigma` - the arc distance as an Angle.
    ///
    /// return the longitude of the geodesic at `arc_distance`.
    #[must_use]
    pub fn arc_longitude(&self, arc_distance: Radians, sigma: Angle) -> Angle {
        self.lon + self.delta_longitude(arc_distance, sigma)
    }

    /// Calculate the geodesic longitude at the distance along the geodesic.
    /// * `distance` - the distance along the `GeodesicSegment`, in metres.
    ///
    /// return the longitude of the geodesic at distance.
    #[must_use]
    pub fn longitude(&self, distance: Metres) -> Angle {
        let arc_distance = self.metres_to_radians(distance);
        self.arc_longitude(arc_distance, Angle::from(arc_distance))
    }

    /// Calculate the geodesic `LatLong` at the arc distance along
    /// the auxiliary sphere.
    /// * `arc_distance` - the great circle arc distance on the auxiliary sphere.
    /// * `sigma` - the arc distance as an Angle.
    ///
    /// return the `LatLong` of the geodesic position at `arc_distance`.
    #[must_use]
    pub fn arc_lat_long(&self, arc_distance: Radians, sigma: Angle) -> LatLong {
        LatLong::new(
            Degrees::from(self.arc_latitude(sigma)),
            Degrees::from(self.arc_longitude(arc_distance, sigma)),
        )
    }

    /// Calculate the geodesic `LatLong` at the distance along the
    /// `GeodesicSegment`.
    /// * `distance` - the distance in `Metres`.
    ///
    /// return the `LatLong` of the geodesic position at `distance`.
    #[must_use]
    pub fn lat_long(&self, distance: Metres) -> LatLong {
        let arc_distance = self.metres_to_radians(distance);
        self.arc_lat_long(arc_distance, Angle::from(arc_distance))
    }

    /// Calculate the area between the `GeodesicSegment` and the Equator up
    /// to the arc distance: the `C4` series term plus the spherical excess
    /// on the authalic sphere.
    /// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
    /// Eqs. 59-65.
    /// * `sigma` - the arc distance as an Angle.
    /// * `azi2` - the azimuth at the arc distance.
    fn position_area(&self, sigma: Angle, azi2: Angle) -> f64 {
        let salp0 = self.azi0.sin().0;
        let calp0 = self.azi0.cos().0;
        let sigma_sum = self.sigma1 + sigma;

        let (s12_area, alp12) = if (calp0 == 0.0) || (salp0 == 0.0) {
            // a meridional or equatorial segment has no series term
            (0.0, Radians::from(azi2 - self.azi).0)
        } else {
            let ssig1 = self.sigma1.sin().0;
            let csig1 = self.sigma1.cos().0;
            let ssig2 = sigma_sum.sin().0;
            let csig2 = sigma_sum.cos().0;
            let ssig12 = ssig2 * csig1 - csig2 * ssig1;
            let csig12 = csig2 * csig1 + ssig2 * ssig1;

            // The spherical excess from the Equator azimuth, in a form that
            // preserves accuracy over short arcs
            let salp12 = if csig12 <= 0.0 {
                calp0 * salp0 * (csig1 * (1.0 - csig12) + ssig12 * ssig1)
            } else {
                calp0 * salp0 * ssig12 * (csig1 * ssig12 / (1.0 + csig12) + ssig1)
            };
            let calp12 = salp0 * salp0 + calp0 * calp0 * csig1 * csig2;
            let alp12 = libm::atan2(salp12, calp12);

            let k2 = self.ellipsoid.ep_2() * calp0 * calp0;
            let eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);
            let a4 =
                self.ellipsoid.a().0 * self.ellipsoid.a().0 * calp0 * salp0 * self.ellipsoid.e_2();
            let c4 = self.ellipsoid.calculate_c4y(eps);
            let b41 = ellipsoid::coefficients::cosine_series(&c4, self.sigma1);
            let b42 = ellipsoid::coefficients::cosine_series(&c4, sigma_sum);
            (a4 * (b42 - b41), alp12)
        };

        s12_area + self.ellipsoid.c2() * alp12
    }

    /// Calculate the position and the optional quantities at the arc
    /// distance along the `GeodesicSegment`.
    /// * `arc_distance` - the great circle arc distance on the auxiliary sphere.
    /// * `caps` - selects the optional quantities to calculate.
    ///
    /// returns the finish position, azimuth and the quantities selected by
    /// `caps`.
    #[must_use]
    pub fn position(&self, arc_distance: Radians, caps: Caps) -> GeodesicResult {
        let sigma = Angle::from(arc_distance);
        let azi2 = self.arc_azimuth(sigma);

        let mut result = GeodesicResult {
            lat2: Some(Degrees::from(self.arc_latitude(sigma))),
            lon2: Some(Degrees::from(self.arc_longitude(arc_distance, sigma))),
            azi1: None,
            azi2: Some(Degrees::from(azi2)),
            s12: caps
                .contains(Caps::DISTANCE)
                .then(|| self.radians_to_metres(arc_distance, sigma)),
            a12: Degrees(arc_distance.0.to_degrees()),
            m12: None,
            M12: None,
            M21: None,
            S12: None,
        };

        if caps.contains(Caps::REDUCED_LENGTH) || caps.contains(Caps::GEODESIC_SCALE) {
            let sigma_sum = self.sigma1 + sigma;
            let k2 = self.ellipsoid.ep_2() * self.azi0.cos().0 * self.azi0.cos().0;
            let dn1 = libm::sqrt(1.0 + k2 * self.sigma1.sin().0 * self.sigma1.sin().0);
            let dn2 = libm::sqrt(1.0 + k2 * sigma_sum.sin().0 * sigma_sum.sin().0);
            let lengths = geodesic::evaluate_lengths(
                self.eps,
                arc_distance,
                self.sigma1,
                dn1,
                sigma_sum,
                dn2,
                caps,
            );
            if caps.contains(Caps::REDUCED_LENGTH) {
                result.m12 = Some(Metres(self.ellipsoid.b().0 * lengths.m12b));
            }
            if caps.contains(Caps::GEODESIC_SCALE) {
                result.M12 = Some(lengths.M12);
                result.M21 = Some(lengths.M21);
            }
        }
        if caps.contains(Caps::AREA) {
            result.S12 = Some(self.position_area(sigma, azi2));
        }

        result
    }
}

/// Test whether a position is valid: the latitude within -90° to 90° and
/// both coordinates finite.
fn validate_position(a: &LatLong) -> Result<(), Error> {
    if !a.lat().0.is_finite() || !a.lon().0.is_finite() || 90.0 < libm::fabs(a.lat().0) {
        Err(Error::InvalidPoint(a.lat().0))
    } else {
        Ok(())
    }
}

/// Solve the direct geodesic problem: find the finish position and azimuth
/// given a start position, an azimuth and a distance along the geodesic.
///
/// # Errors
/// `Error::InvalidPoint` if the start position is invalid.
/// * `a` - the start position in geodetic coordinates.
/// * `azi1` - the azimuth at the start position.
/// * `s12` - the distance along the geodesic, in metres. May be negative.
/// * `caps` - selects the optional quantities to calculate.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Examples
/// ```
/// use ellipsoid_geodesic::*;
/// use angle_sc::is_within_tolerance;
///
/// let jfk = LatLong::new(Degrees(40.64), Degrees(-73.78));
/// let result = direct(&jfk, Degrees(51.0), Metres(5_551_759.4), Caps::STANDARD, &WGS84_ELLIPSOID)
///     .expect("valid position");
///
/// // close to LHR
/// assert!(is_within_tolerance(51.46, result.lat2.unwrap().0, 0.02));
/// assert!(is_within_tolerance(-0.46, result.lon2.unwrap().0, 0.02));
/// ```
pub fn direct(
    a: &LatLong,
    azi1: Degrees,
    s12: Metres,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<GeodesicResult, Error> {
    validate_position(a)?;
    let segment = GeodesicSegment::from_lat_lon_azi_length(a, Angle::from(azi1), s12, ellipsoid);
    let mut result = segment.position(segment.arc_length(), caps);
    // the distance is an input of the operation
    result.s12 = Some(s12);
    Ok(result)
}

/// Solve the direct geodesic problem with the length given as an arc length
/// on the auxiliary sphere instead of a distance in metres.
///
/// # Errors
/// `Error::InvalidPoint` if the start position is invalid.
/// * `a` - the start position in geodetic coordinates.
/// * `azi1` - the azimuth at the start position.
/// * `arc` - the arc length on the auxiliary sphere, in degrees. May be negative.
/// * `caps` - selects the optional quantities to calculate.
/// * `ellipsoid` - the `Ellipsoid`.
pub fn direct_arc(
    a: &LatLong,
    azi1: Degrees,
    arc: Degrees,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<GeodesicResult, Error> {
    validate_position(a)?;
    let segment = GeodesicSegment::from_lat_lon_azi_arc_length(
        a,
        Angle::from(azi1),
        Radians(arc.0.to_radians()),
        ellipsoid,
    );
    Ok(segment.position(segment.arc_length(), caps))
}

/// Solve the inverse geodesic problem: find the azimuths and the distance
/// between a pair of positions.
///
/// The azimuths follow the shortest geodesic between the positions, so they
/// lie within -180° to 180°: due West is -90°.
///
/// # Errors
/// `Error::InvalidPoint` if either position is invalid.
/// `Error::ConvergenceFailure` if the solution fails to converge.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `caps` - selects the optional quantities to calculate.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Examples
/// ```
/// use ellipsoid_geodesic::*;
/// use angle_sc::is_within_tolerance;
///
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
/// let result = inverse(&istanbul, &washington, Caps::ALL, &WGS84_ELLIPSOID)
///     .expect("valid positions");
///
/// assert!(is_within_tolerance(-50.69375304113997, result.azi1.unwrap().0, 1e-8));
/// assert!(is_within_tolerance(-132.2646607116376, result.azi2.unwrap().0, 1e-8));
/// assert!(is_within_tolerance(8339863.136005359, result.s12.unwrap().0, 1e-3));
/// ```
pub fn inverse(
    a: &LatLong,
    b: &LatLong,
    caps: Caps,
    ellipsoid: &Ellipsoid,
) -> Result<GeodesicResult, Error> {
    validate_position(a)?;
    validate_position(b)?;
    let solution = geodesic::solve_inverse(a, b, caps, ellipsoid)?;
    Ok(GeodesicResult {
        lat2: None,
        lon2: None,
        azi1: Some(Degrees::from(solution.alpha1)),
        azi2: Some(Degrees::from(solution.alpha2)),
        s12: Some(Metres(ellipsoid.b().0 * solution.s12b)),
        a12: Degrees(solution.arc_length.0.to_degrees()),
        m12: solution.m12b.map(|m12b| Metres(ellipsoid.b().0 * m12b)),
        M12: solution.scales.map(|scales| scales.0),
        M21: solution.scales.map(|scales| scales.1),
        S12: solution.area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_new() {
        let wgs84_ellipsoid = Ellipsoid::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F).unwrap();
        assert_eq!(wgs84_ellipsoid, Ellipsoid::wgs84());
        assert_eq!(wgs84_ellipsoid, *WGS84_ELLIPSOID);

        assert_eq!(Metres(6_378_137.0), wgs84_ellipsoid.a());
        assert_eq!(Metres(6_356_752.314_245_179), wgs84_ellipsoid.b());
        assert_eq!(40589732499314.76, wgs84_ellipsoid.c2());
        assert!(is_within_tolerance(
            510065621724088.44,
            wgs84_ellipsoid.ellipsoid_area(),
            1.0
        ));

        // a sphere and a prolate ellipsoid are valid
        assert!(Ellipsoid::new(Metres(6_371_000.0), 0.0).is_ok());
        assert!(Ellipsoid::new(Metres(6_400_000.0), -0.01).is_ok());
    }

    #[test]
    fn test_ellipsoid_new_invalid() {
        assert_eq!(
            Err(Error::InvalidEllipsoid { a: 0.0, f: 0.0 }),
            Ellipsoid::new(Metres(0.0), 0.0)
        );
        assert_eq!(
            Err(Error::InvalidEllipsoid {
                a: -6_378_137.0,
                f: 0.5
            }),
            Ellipsoid::new(Metres(-6_378_137.0), 0.5)
        );
        assert_eq!(
            Err(Error::InvalidEllipsoid {
                a: 6_378_137.0,
                f: 1.0
            }),
            Ellipsoid::new(Metres(6_378_137.0), 1.0)
        );
        assert!(Ellipsoid::new(Metres(f64::NAN), 0.0).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), f64::INFINITY).is_err());
    }

    #[test]
    fn test_caps() {
        assert!(Caps::ALL.contains(Caps::DISTANCE));
        assert!(Caps::ALL.contains(Caps::REDUCED_LENGTH));
        assert!(Caps::ALL.contains(Caps::GEODESIC_SCALE));
        assert!(Caps::ALL.contains(Caps::AREA));
        assert!(Caps::STANDARD.contains(Caps::DISTANCE));
        assert!(!Caps::STANDARD.contains(Caps::AREA));
        assert!(!Caps::NONE.contains(Caps::DISTANCE));

        let mut caps = Caps::REDUCED_LENGTH | Caps::GEODESIC_SCALE;
        assert!(caps.contains(Caps::REDUCED_LENGTH | Caps::GEODESIC_SCALE));
        assert!(!caps.contains(Caps::ALL));
        caps |= Caps::DISTANCE | Caps::AREA;
        assert_eq!(Caps::ALL, caps);
    }

    #[test]
    fn test_geodesic_segment_position() {
        let a = LatLong::new(Degrees(40.0), Degrees(-75.0));
        let segment = GeodesicSegment::from_lat_lon_azi_length(
            &a,
            Angle::from(Degrees(30.0)),
            Metres(100_000.0),
            &WGS84_ELLIPSOID,
        );
        assert!(segment.is_valid());

        let result = segment.position(segment.arc_length(), Caps::ALL);
        assert!(is_within_tolerance(
            40.778403011206514,
            result.lat2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            -74.40771130949416,
            result.lon2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            30.38379993964498,
            result.azi2.unwrap().0,
            1e-8
        ));
        assert!(is_within_tolerance(0.9000696491287741, result.a12.0, 1e-9));
        assert!(is_within_tolerance(100_000.0, result.s12.unwrap().0, 1e-6));
        assert!(is_within_tolerance(
            99995.89863967476,
            result.m12.unwrap().0,
            1e-3
        ));
        assert!(is_within_tolerance(
            0.9998769565074634,
            result.M12.unwrap(),
            1e-12
        ));
        assert!(is_within_tolerance(
            0.9998769638918023,
            result.M21.unwrap(),
            1e-12
        ));
        assert!(is_within_tolerance(
            271186492641.83594,
            result.S12.unwrap(),
            1e4
        ));
    }

    #[test]
    fn test_geodesic_segment_position_caps() {
        let a = LatLong::new(Degrees(40.0), Degrees(-75.0));
        let segment = GeodesicSegment::from_lat_lon_azi_length(
            &a,
            Angle::from(Degrees(30.0)),
            Metres(100_000.0),
            &WGS84_ELLIPSOID,
        );

        let result = segment.position(segment.arc_length(), Caps::NONE);
        assert!(result.lat2.is_some());
        assert!(result.lon2.is_some());
        assert!(result.azi2.is_some());
        assert!(result.s12.is_none());
        assert!(result.m12.is_none());
        assert!(result.M12.is_none());
        assert!(result.M21.is_none());
        assert!(result.S12.is_none());

        let result = segment.position(segment.arc_length(), Caps::REDUCED_LENGTH);
        assert!(result.s12.is_none());
        assert!(result.m12.is_some());
        assert!(result.M12.is_none());

        let result = segment.position(segment.arc_length(), Caps::GEODESIC_SCALE);
        assert!(result.m12.is_none());
        assert!(result.M12.is_some());
        assert!(result.M21.is_some());
    }

    #[test]
    fn test_direct_negative_distance() {
        let a = LatLong::new(Degrees(40.0), Degrees(-75.0));
        let result = direct(
            &a,
            Degrees(30.0),
            Metres(-100_000.0),
            Caps::ALL,
            &WGS84_ELLIPSOID,
        )
        .unwrap();

        assert!(is_within_tolerance(
            39.2185330046427,
            result.lat2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            -75.57896255751918,
            result.lon2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            29.6308727558034,
            result.azi2.unwrap().0,
            1e-8
        ));
        assert!(is_within_tolerance(-0.9001101472065294, result.a12.0, 1e-9));
        assert_eq!(-100_000.0, result.s12.unwrap().0);
        assert!(is_within_tolerance(
            -99995.89790146981,
            result.m12.unwrap().0,
            1e-3
        ));
        assert!(is_within_tolerance(
            -260803364008.5598,
            result.S12.unwrap(),
            1e4
        ));
    }

    #[test]
    fn test_direct_arc() {
        let a = LatLong::new(Degrees(40.0), Degrees(-75.0));
        let result =
            direct_arc(&a, Degrees(30.0), Degrees(60.0), Caps::ALL, &WGS84_ELLIPSOID).unwrap();

        assert_eq!(60.0, result.a12.0);
        assert!(is_within_tolerance(
            63.72520156409796,
            result.lat2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            27.62338265903043,
            result.lon2.unwrap().0,
            1e-9
        ));
        assert!(is_within_tolerance(
            120.21929995942116,
            result.azi2.unwrap().0,
            1e-8
        ));
        assert!(is_within_tolerance(
            6673029.457846222,
            result.s12.unwrap().0,
            1e-5
        ));
        assert!(is_within_tolerance(
            5524228.486538766,
            result.m12.unwrap().0,
            1e-3
        ));
        assert!(is_within_tolerance(
            0.5017430745446468,
            result.M12.unwrap(),
            1e-12
        ));
        assert!(is_within_tolerance(
            0.5026705123213996,
            result.M21.unwrap(),
            1e-12
        ));
        assert!(is_within_tolerance(
            63851813839803.914,
            result.S12.unwrap(),
            1e4
        ));
    }

    #[test]
    fn test_invalid_positions() {
        let good = LatLong::new(Degrees(45.0), Degrees(0.0));
        let bad_lat = LatLong::new(Degrees(90.5), Degrees(0.0));
        let bad_lon = LatLong::new(Degrees(45.0), Degrees(f64::NAN));

        assert_eq!(
            Err(Error::InvalidPoint(90.5)),
            direct(
                &bad_lat,
                Degrees(0.0),
                Metres(1000.0),
                Caps::STANDARD,
                &WGS84_ELLIPSOID
            )
        );
        assert_eq!(
            Err(Error::InvalidPoint(90.5)),
            inverse(&good, &bad_lat, Caps::STANDARD, &WGS84_ELLIPSOID)
        );
        assert!(inverse(&bad_lon, &good, Caps::STANDARD, &WGS84_ELLIPSOID).is_err());
        assert!(
            direct_arc(&bad_lat, Degrees(0.0), Degrees(1.0), Caps::NONE, &WGS84_ELLIPSOID).is_err()
        );
    }

    #[test]
    fn test_between_positions() {
        let a = LatLong::new(Degrees(-30.2), Degrees(20.5));
        let b = LatLong::new(Degrees(37.4), Degrees(-60.7));

        let segment = GeodesicSegment::between_positions(&a, &b, &WGS84_ELLIPSOID).unwrap();
        assert!(is_within_tolerance(
            -53.42024498864093,
            Degrees::from(segment.azi()).0,
            1e-8
        ));
        assert!(is_within_tolerance(
            11280469.174873523,
            segment.length().0,
            1e-3
        ));

        let end = segment.lat_long(segment.length());
        assert!(is_within_tolerance(37.4, end.lat().0, 1e-9));
        assert!(is_within_tolerance(-60.7, end.lon().0, 1e-9));
    }
}
