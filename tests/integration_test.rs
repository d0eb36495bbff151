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

// extern crate we're testing, same as any other code would do.
extern crate ellipsoid_geodesic;

use angle_sc::is_within_tolerance;
use csv::ReaderBuilder;
use ellipsoid_geodesic::{
    direct, inverse, Caps, Degrees, Ellipsoid, LatLong, Metres, WGS84_ELLIPSOID,
};
use std::env;
use std::path::Path;

#[test]
fn test_inverse_direct_consistency() {
    // Cape Town region to the South Atlantic
    let a = LatLong::new(Degrees(-30.2), Degrees(20.5));
    let b = LatLong::new(Degrees(37.4), Degrees(-60.7));

    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert!(is_within_tolerance(
        -53.42024498864093,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        -60.84514987639671,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        11280469.174873523,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(101.63411572222758, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        6229421.128499619,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        -0.2013530629888196,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -0.20057094356645966,
        result.M21.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -5243856352627.62,
        result.S12.unwrap(),
        1e4
    ));

    // the direct problem with the inverse azimuth and distance recovers b
    let fwd = direct(
        &a,
        result.azi1.unwrap(),
        result.s12.unwrap(),
        Caps::STANDARD,
        &WGS84_ELLIPSOID,
    )
    .unwrap();
    assert!(is_within_tolerance(37.4, fwd.lat2.unwrap().0, 1e-9));
    assert!(is_within_tolerance(-60.7, fwd.lon2.unwrap().0, 1e-9));
}

#[test]
fn test_inverse_direct_consistency_southern_ocean() {
    let a = LatLong::new(Degrees(-63.1), Degrees(155.0));
    let b = LatLong::new(Degrees(78.25), Degrees(-170.75));

    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert!(is_within_tolerance(
        10.95756003466268,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        24.96574638237937,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        15855905.933179142,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(142.73250333812004, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        3857710.5267000566,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        -0.7952437554225708,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -0.7925449882895126,
        result.M21.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        9919674242782.486,
        result.S12.unwrap(),
        1e4
    ));

    let fwd = direct(
        &a,
        result.azi1.unwrap(),
        result.s12.unwrap(),
        Caps::STANDARD,
        &WGS84_ELLIPSOID,
    )
    .unwrap();
    assert!(is_within_tolerance(78.25, fwd.lat2.unwrap().0, 1e-9));
    assert!(is_within_tolerance(-170.75, fwd.lon2.unwrap().0, 1e-9));
}

#[test]
fn test_inverse_short_distance() {
    let a = LatLong::new(Degrees(37.0), Degrees(10.0));
    let b = LatLong::new(Degrees(37.00001), Degrees(10.00001));

    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert!(is_within_tolerance(
        38.73199676900027,
        result.azi1.unwrap().0,
        1e-6
    ));
    assert!(is_within_tolerance(
        38.732002787151195,
        result.azi2.unwrap().0,
        1e-6
    ));
    assert!(is_within_tolerance(
        1.422642392506957,
        result.s12.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        1.2807252098859979e-05,
        result.a12.0,
        1e-12
    ));
    assert!(is_within_tolerance(
        1.4226423924058351,
        result.m12.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        0.9999999999999752,
        result.M12.unwrap(),
        1e-13
    ));
    assert!(is_within_tolerance(
        0.9999999999999752,
        result.M21.unwrap(),
        1e-13
    ));
    assert!(is_within_tolerance(4251223.878632128, result.S12.unwrap(), 1.0));
}

#[test]
fn test_inverse_nearly_antipodal() {
    let a = LatLong::new(Degrees(0.0), Degrees(0.0));
    let b = LatLong::new(Degrees(0.5), Degrees(179.98));

    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert!(is_within_tolerance(
        1.042038151998166,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        178.9579224301469,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        19948624.06130822,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(179.5015938927356, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        122396.5284500633,
        result.m12.unwrap().0,
        1e-2
    ));
    assert!(is_within_tolerance(
        -0.9999621654379116,
        result.M12.unwrap(),
        1e-10
    ));
    assert!(is_within_tolerance(
        -0.9998703396322589,
        result.M21.unwrap(),
        1e-10
    ));
    assert!(is_within_tolerance(
        126033371945661.0,
        result.S12.unwrap(),
        1e6
    ));
}

#[test]
fn test_inverse_antipodal() {
    // exactly antipodal equatorial points: the meridional path wins the
    // tie-break, with a positive half circumference distance
    let a = LatLong::new(Degrees(0.0), Degrees(0.0));
    let b = LatLong::new(Degrees(0.0), Degrees(180.0));

    let result = inverse(&a, &b, Caps::STANDARD, &WGS84_ELLIPSOID).unwrap();
    assert_eq!(180.0, result.azi1.unwrap().0.abs());
    assert_eq!(0.0, result.azi2.unwrap().0.abs());
    assert_eq!(180.0, result.a12.0);
    assert!(is_within_tolerance(
        20003931.4586233,
        result.s12.unwrap().0,
        1e-3
    ));

    // a sphere has no distance correction terms, the result is exactly
    // half its circumference
    let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0).unwrap();
    let result = inverse(&a, &b, Caps::STANDARD, &sphere).unwrap();
    assert_eq!(180.0, result.a12.0);
    assert!(is_within_tolerance(
        core::f64::consts::PI * 6_371_000.0,
        result.s12.unwrap().0,
        1e-6
    ));
}

#[test]
fn test_inverse_symmetric_latitudes() {
    // near antipodal pairs symmetric about the equator lie on a bifurcation
    // line of the inverse problem: the direct problem from the solved
    // azimuth and distance must recover the finish point
    for lat in [10.0, 25.0, 45.0, 60.0, 80.0] {
        let a = LatLong::new(Degrees(-lat), Degrees(10.0));
        let b = LatLong::new(Degrees(lat), Degrees(-170.03));

        let result = inverse(&a, &b, Caps::STANDARD, &WGS84_ELLIPSOID).unwrap();
        let azi1 = result.azi1.unwrap();
        assert!((0.0 < azi1.0) && (azi1.0 < 180.0));

        let round_trip = direct(
            &a,
            azi1,
            result.s12.unwrap(),
            Caps::STANDARD,
            &WGS84_ELLIPSOID,
        )
        .unwrap();
        assert!(is_within_tolerance(lat, round_trip.lat2.unwrap().0, 1e-6));
        assert!(is_within_tolerance(
            -170.03,
            round_trip.lon2.unwrap().0,
            1e-6
        ));
    }
}

#[test]
fn test_inverse_symmetry() {
    let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
    let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));

    let fwd = inverse(&istanbul, &washington, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    let rev = inverse(&washington, &istanbul, Caps::ALL, &WGS84_ELLIPSOID).unwrap();

    assert!(is_within_tolerance(
        -50.69375304113997,
        fwd.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        -132.2646607116376,
        fwd.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        8339863.136005359,
        fwd.s12.unwrap().0,
        1e-3
    ));

    // reversing the points preserves the distances and swaps the scales
    assert_eq!(fwd.s12, rev.s12);
    assert_eq!(fwd.a12, rev.a12);
    assert!(is_within_tolerance(
        6161556.143458228,
        fwd.m12.unwrap().0,
        1e-3
    ));
    assert_eq!(fwd.m12, rev.m12);
    assert_eq!(fwd.M12, rev.M21);
    assert_eq!(fwd.M21, rev.M12);
    assert!(is_within_tolerance(
        0.2607860062600545,
        fwd.M12.unwrap(),
        1e-12
    ));

    // reversing the points negates the area
    assert!(is_within_tolerance(
        57682923391800.05,
        rev.S12.unwrap(),
        1e5
    ));
    assert!(is_within_tolerance(
        -fwd.S12.unwrap(),
        rev.S12.unwrap(),
        1e-3
    ));
}

#[test]
fn test_inverse_meridian() {
    let a = LatLong::new(Degrees(-70.0), Degrees(40.0));
    let b = LatLong::new(Degrees(80.0), Degrees(40.0));

    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert_eq!(0.0, result.azi1.unwrap().0);
    assert_eq!(0.0, result.azi2.unwrap().0);
    assert!(is_within_tolerance(
        16654120.599707069,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(149.90511780391162, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        3194869.918293499,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        -0.8643022617335685,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -0.8625227824411362,
        result.M21.unwrap(),
        1e-12
    ));
    // a meridional geodesic encloses no area
    assert_eq!(0.0, result.S12.unwrap());
}

#[test]
fn test_equatorial_geodesics() {
    // direct: due East along the Equator
    let origin = LatLong::new(Degrees(0.0), Degrees(0.0));
    let result = direct(
        &origin,
        Degrees(90.0),
        Metres(5_000_000.0),
        Caps::ALL,
        &WGS84_ELLIPSOID,
    )
    .unwrap();
    assert_eq!(0.0, result.lat2.unwrap().0);
    assert!(is_within_tolerance(
        44.915764205976075,
        result.lon2.unwrap().0,
        1e-9
    ));
    assert!(is_within_tolerance(90.0, result.azi2.unwrap().0, 1e-9));
    assert!(is_within_tolerance(45.066864871142776, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        4500145.211743112,
        result.m12.unwrap().0,
        1e-3
    ));
    assert_eq!(result.M12, result.M21);
    assert!(is_within_tolerance(
        0.7062810976546231,
        result.M12.unwrap(),
        1e-12
    ));
    assert_eq!(0.0, result.S12.unwrap());

    // inverse: an equatorial geodesic distance is exactly a * lambda12
    let a = LatLong::new(Degrees(0.0), Degrees(-40.0));
    let b = LatLong::new(Degrees(0.0), Degrees(50.0));
    let result = inverse(&a, &b, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert_eq!(90.0, result.azi1.unwrap().0);
    assert_eq!(90.0, result.azi2.unwrap().0);
    let lambda12 = 90.0_f64.to_radians();
    assert!(is_within_tolerance(
        WGS84_ELLIPSOID.a().0 * lambda12,
        result.s12.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(90.30276808388788, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        6356663.562029597,
        result.m12.unwrap().0,
        1e-3
    ));
    assert_eq!(result.M12, result.M21);
    assert_eq!(0.0, result.S12.unwrap());
}

#[test]
fn test_direct_from_north_pole() {
    let north_pole = LatLong::new(Degrees(90.0), Degrees(0.0));
    let result = direct(
        &north_pole,
        Degrees(180.0),
        Metres(10_000_000.0),
        Caps::ALL,
        &WGS84_ELLIPSOID,
    )
    .unwrap();

    assert!(is_within_tolerance(
        0.01777745589996977,
        result.lat2.unwrap().0,
        1e-9
    ));
    assert!(is_within_tolerance(
        180.0,
        libm::fabs(result.lon2.unwrap().0),
        1e-9
    ));
    assert!(is_within_tolerance(
        180.0,
        libm::fabs(result.azi2.unwrap().0),
        1e-9
    ));
    assert!(is_within_tolerance(89.98228214853997, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        6378136.6950415345,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        0.005570362290101932,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        0.0003102751331041654,
        result.M21.unwrap(),
        1e-12
    ));
    assert_eq!(0.0, result.S12.unwrap());
}

#[test]
fn test_sphere() {
    let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0).unwrap();
    let a = LatLong::new(Degrees(10.0), Degrees(20.0));
    let b = LatLong::new(Degrees(50.0), Degrees(100.0));

    let result = inverse(&a, &b, Caps::ALL, &sphere).unwrap();
    assert!(is_within_tolerance(
        40.735902701177714,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        88.85509391941855,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        8444093.322185898,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(75.9395556703585, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        6180124.650562189,
        result.m12.unwrap().0,
        1e-3
    ));
    // on a sphere both geodesic scales are the cosine of the arc length
    let cos_a12 = libm::cos(result.a12.0.to_radians());
    assert!(is_within_tolerance(cos_a12, result.M12.unwrap(), 1e-13));
    assert!(is_within_tolerance(cos_a12, result.M21.unwrap(), 1e-13));
    assert!(is_within_tolerance(
        34088735913136.305,
        result.S12.unwrap(),
        1e4
    ));

    let fwd = direct(
        &a,
        result.azi1.unwrap(),
        result.s12.unwrap(),
        Caps::STANDARD,
        &sphere,
    )
    .unwrap();
    assert!(is_within_tolerance(50.0, fwd.lat2.unwrap().0, 1e-9));
    assert!(is_within_tolerance(100.0, fwd.lon2.unwrap().0, 1e-9));
}

#[test]
fn test_oblate_ellipsoid() {
    // an exaggerated flattening, an order of magnitude larger than the Earth
    let oblate = Ellipsoid::new(Metres(6_400_000.0), 0.02).unwrap();
    let a = LatLong::new(Degrees(20.0), Degrees(-10.0));
    let b = LatLong::new(Degrees(-35.0), Degrees(125.0));

    let result = inverse(&a, &b, Caps::ALL, &oblate).unwrap();
    assert!(is_within_tolerance(
        120.48822168564648,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        79.85402932770141,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        15319833.169740733,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(139.50602914468354, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        4123130.6358913505,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        -0.7650401321737366,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -0.7459731664339541,
        result.M21.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -28118241177766.656,
        result.S12.unwrap(),
        1e5
    ));

    let fwd = direct(
        &a,
        Degrees(45.0),
        Metres(8_000_000.0),
        Caps::ALL,
        &oblate,
    )
    .unwrap();
    assert!(is_within_tolerance(
        47.98834135124479,
        fwd.lat2.unwrap().0,
        1e-9
    ));
    assert!(is_within_tolerance(
        74.21232183057968,
        fwd.lon2.unwrap().0,
        1e-9
    ));
    assert!(is_within_tolerance(
        100.20824476315927,
        fwd.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(72.48406881614625, fwd.a12.0, 1e-9));
    assert!(is_within_tolerance(
        6062352.504189601,
        fwd.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        0.30636815331767087,
        fwd.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        0.3151940597843634,
        fwd.M21.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        38379708581295.69,
        fwd.S12.unwrap(),
        1e5
    ));
}

#[test]
fn test_prolate_ellipsoid() {
    let prolate = Ellipsoid::new(Metres(6_400_000.0), -0.01).unwrap();
    let a = LatLong::new(Degrees(20.0), Degrees(-10.0));
    let b = LatLong::new(Degrees(-35.0), Degrees(125.0));

    let result = inverse(&a, &b, Caps::ALL, &prolate).unwrap();
    assert!(is_within_tolerance(
        120.50425534234746,
        result.azi1.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        82.08602547657786,
        result.azi2.unwrap().0,
        1e-8
    ));
    assert!(is_within_tolerance(
        15424921.33806854,
        result.s12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(136.92943226148574, result.a12.0, 1e-9));
    assert!(is_within_tolerance(
        4391010.78912074,
        result.m12.unwrap().0,
        1e-3
    ));
    assert!(is_within_tolerance(
        -0.7284867938990279,
        result.M12.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -0.7374672521655338,
        result.M21.unwrap(),
        1e-12
    ));
    assert!(is_within_tolerance(
        -27909999464494.76,
        result.S12.unwrap(),
        1e5
    ));

    let fwd = direct(
        &a,
        result.azi1.unwrap(),
        result.s12.unwrap(),
        Caps::STANDARD,
        &prolate,
    )
    .unwrap();
    assert!(is_within_tolerance(-35.0, fwd.lat2.unwrap().0, 1e-9));
    assert!(is_within_tolerance(125.0, fwd.lon2.unwrap().0, 1e-9));
}

#[test]
fn test_inverse_coincident_points() {
    let a = LatLong::new(Degrees(51.5), Degrees(-0.12));

    let result = inverse(&a, &a, Caps::ALL, &WGS84_ELLIPSOID).unwrap();
    assert_eq!(0.0, result.azi1.unwrap().0);
    assert_eq!(0.0, result.azi2.unwrap().0);
    assert_eq!(0.0, result.s12.unwrap().0);
    assert_eq!(0.0, result.a12.0);
    assert_eq!(0.0, result.m12.unwrap().0);
    assert_eq!(1.0, result.M12.unwrap());
    assert_eq!(1.0, result.M21.unwrap());
    assert_eq!(0.0, result.S12.unwrap());
}

#[test]
fn test_inverse_caps_gating() {
    let a = LatLong::new(Degrees(-30.2), Degrees(20.5));
    let b = LatLong::new(Degrees(37.4), Degrees(-60.7));

    let result = inverse(&a, &b, Caps::NONE, &WGS84_ELLIPSOID).unwrap();
    assert!(result.azi1.is_some());
    assert!(result.azi2.is_some());
    assert!(result.s12.is_some());
    assert!(result.m12.is_none());
    assert!(result.M12.is_none());
    assert!(result.M21.is_none());
    assert!(result.S12.is_none());
    // the finish position is an input of the inverse problem
    assert!(result.lat2.is_none());
    assert!(result.lon2.is_none());

    let result = inverse(&a, &b, Caps::REDUCED_LENGTH | Caps::AREA, &WGS84_ELLIPSOID).unwrap();
    assert!(result.m12.is_some());
    assert!(result.M12.is_none());
    assert!(result.S12.is_some());
}

#[test]
#[ignore]
fn test_geodesic_examples() {
    // Read GEODTEST_DIR/GeodTest.dat file and run tests
    let geoid = Ellipsoid::wgs84();

    let filename = "GeodTest.dat";
    let dir_key = "GEODTEST_DIR";

    let p = env::var(dir_key).expect("Environment variable not found: GEODTEST_DIR");
    let path = Path::new(&p);
    let file_path = path.join(filename);
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(file_path)
        .expect("Could not read file: GeodTest.dat");
    let mut line_number = 1;
    for result in csv_reader.records() {
        let record = result.unwrap();

        let lat1 = Degrees(record[0].parse::<f64>().unwrap());
        let lon1 = Degrees(record[1].parse::<f64>().unwrap());
        let azi1 = Degrees(record[2].parse::<f64>().unwrap());
        let lat2 = Degrees(record[3].parse::<f64>().unwrap());
        let lon2 = Degrees(record[4].parse::<f64>().unwrap());
        let _azi2 = Degrees(record[5].parse::<f64>().unwrap());
        let d_metres = Metres(record[6].parse::<f64>().unwrap());
        let d_degrees = Degrees(record[7].parse::<f64>().unwrap());

        let a = LatLong::new(lat1, lon1);
        let b = LatLong::new(lat2, lon2);
        let result = inverse(&a, &b, Caps::STANDARD, &geoid).unwrap();

        let delta_azimuth = libm::fabs(azi1.0 - result.azi1.unwrap().0);
        if 5.5e-5 < delta_azimuth {
            panic!(
                "azimuth, line: {:?} delta: {:?} azimuth: {:?} delta_long: {:?} ",
                line_number, delta_azimuth, azi1, lon2
            );
        }

        let delta_arc = libm::fabs(d_degrees.0.to_radians() - result.a12.0.to_radians());
        if 2.0e-11 < delta_arc {
            panic!(
                "arc length, line: {:?} delta: {:?} length: {:?} delta_long: {:?} ",
                line_number, delta_arc, d_degrees, lon2
            );
        }

        let delta_length_m = libm::fabs(d_metres.0 - result.s12.unwrap().0);
        if line_number <= 150000 {
            let delta_length_m_ratio = delta_length_m / d_metres.0;
            if 1.7e-11 < delta_length_m_ratio {
                panic!(
                    "length, line: {:?} delta: {:?} length: {:?} delta_long: {:?} ",
                    line_number, delta_length_m_ratio, d_metres, result.s12
                );
            }
        } else if 9.0e-5 < delta_length_m {
            panic!(
                "length, line: {:?} delta: {:?} length: {:?} delta_long: {:?} ",
                line_number, delta_length_m, d_metres, result.s12
            );
        }

        //  random_df = tests_df[:100000]
        //  antipodal_df = tests_df[100000:150000]
        //  short_df = tests_df[150000:200000]
        line_number += 1;
        if 200000 < line_number {
            break;
        }
    }
}
