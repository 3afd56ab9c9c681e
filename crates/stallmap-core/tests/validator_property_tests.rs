#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use stallmap_core::errors::Axis;
use stallmap_core::rules::validate;
use stallmap_core::Coordinate;

proptest! {
    #[test]
    fn in_range_pairs_are_accepted(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
        prop_assert!(validate(lat, lng).is_ok());
        let coordinate = Coordinate::new(lat, lng).unwrap();
        prop_assert_eq!(coordinate.latitude(), lat);
        prop_assert_eq!(coordinate.longitude(), lng);
    }

    #[test]
    fn latitude_above_range_is_rejected(lat in 90.000001f64..1.0e6, lng in -180.0f64..=180.0) {
        let err = validate(lat, lng).unwrap_err();
        prop_assert_eq!(err.axis, Axis::Latitude);
        prop_assert_eq!(err.value, lat);
    }

    #[test]
    fn latitude_below_range_is_rejected(lat in -1.0e6f64..-90.000001, lng in -180.0f64..=180.0) {
        prop_assert_eq!(validate(lat, lng).unwrap_err().axis, Axis::Latitude);
    }

    #[test]
    fn longitude_out_of_range_is_rejected(
        lat in -90.0f64..=90.0,
        lng in prop_oneof![180.000001f64..1.0e6, -1.0e6f64..-180.000001],
    ) {
        let err = validate(lat, lng).unwrap_err();
        prop_assert_eq!(err.axis, Axis::Longitude);
        prop_assert_eq!((err.min, err.max), (-180.0, 180.0));
    }

    #[test]
    fn exchange_format_preserves_six_decimals(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
        let coordinate = Coordinate::new(lat, lng).unwrap();
        let parsed = Coordinate::parse_pair(&coordinate.to_pair()).unwrap();
        prop_assert_eq!(parsed.to_pair(), coordinate.to_pair());
    }
}

#[test]
fn test_boundaries_are_inclusive() {
    assert!(validate(90.0, 180.0).is_ok());
    assert!(validate(-90.0, -180.0).is_ok());
}

#[test]
fn test_nan_is_rejected() {
    assert_eq!(validate(f64::NAN, 0.0).unwrap_err().axis, Axis::Latitude);
    assert_eq!(validate(0.0, f64::NAN).unwrap_err().axis, Axis::Longitude);
}
