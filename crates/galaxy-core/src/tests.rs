use crate::constants::*;
use crate::coordinates::*;
use crate::query::*;
use crate::star::*;

use approx::assert_relative_eq;
use glam::DVec3;

#[test]
fn test_base_pixel_poles_and_equator() {
    // Equator at longitude 0 is the centre of pixel 4
    assert_eq!(healpix_base_pixel(DVec3::X), Some(4));
    assert_eq!(healpix_base_pixel(DVec3::Y), Some(5));
    assert_eq!(healpix_base_pixel(DVec3::NEG_X), Some(6));
    assert_eq!(healpix_base_pixel(DVec3::NEG_Y), Some(7));

    assert_eq!(healpix_base_pixel(DVec3::Z), Some(0));
    assert_eq!(healpix_base_pixel(DVec3::NEG_Z), Some(8));
}

#[test]
fn test_base_pixel_face_centres() {
    // Face centres sit at z = ±2/3, longitudes π/4 + k·π/2
    let r = (1.0f64 - 4.0 / 9.0).sqrt();
    for k in 0..4u8 {
        let phi = std::f64::consts::FRAC_PI_4 + k as f64 * std::f64::consts::FRAC_PI_2;
        let north = DVec3::new(r * phi.cos(), r * phi.sin(), 0.7);
        let south = DVec3::new(r * phi.cos(), r * phi.sin(), -0.7);
        assert_eq!(healpix_base_pixel(north), Some(k), "north face {}", k);
        assert_eq!(healpix_base_pixel(south), Some(k + 8), "south face {}", k);
    }
}

#[test]
fn test_base_pixel_degenerate() {
    assert_eq!(healpix_base_pixel(DVec3::ZERO), None);
    assert_eq!(healpix_base_pixel(DVec3::new(f64::NAN, 0.0, 1.0)), None);
}

#[test]
fn test_base_pixel_scale_invariant() {
    let dir = DVec3::new(0.3, -0.8, 0.2);
    assert_eq!(healpix_base_pixel(dir), healpix_base_pixel(dir * 4000.0));
}

#[test]
fn test_propagate_identity_at_reference_epoch() {
    let dir = DVec3::new(0.0, 0.6, 0.8);
    let pos = propagate(dir, DVec3::new(10.0, -5.0, 2.0), 100.0, 0.0);
    assert_relative_eq!(pos.x, 0.0);
    assert_relative_eq!(pos.y, 60.0);
    assert_relative_eq!(pos.z, 80.0);
}

#[test]
fn test_propagate_linear_drift() {
    // 1000 mas/yr at 1000 ly over 1000 years
    let pos = propagate(DVec3::X, DVec3::new(0.0, 1000.0, 0.0), 1000.0, 1000.0);
    let expected_y = 1000.0 * MAS_TO_RAD * 1000.0 * 1000.0;
    assert_relative_eq!(pos.x, 1000.0);
    assert_relative_eq!(pos.y, expected_y, epsilon = 1e-12);
}

#[test]
fn test_sector_bounds() {
    assert!(HealpixSector::new(0).is_err());
    assert!(HealpixSector::new(13).is_err());
    assert_eq!(HealpixSector::new(7).map(|s| s.id()), Ok(7));
    assert_eq!(HealpixSector::all().count(), 12);
}

#[test]
fn test_sector_nested_range() {
    let sector = HealpixSector::new(1).unwrap();
    assert_eq!(sector.nested_range(2), 0..=15);
    let sector = HealpixSector::new(12).unwrap();
    assert_eq!(sector.nested_range(2), 176..=191);
}

#[test]
fn test_sector_filter_cycle() {
    let options: Vec<_> = SectorFilter::options().collect();
    assert_eq!(options.len(), 13);
    assert_eq!(options[0], SectorFilter::All);

    let mut filter = SectorFilter::All;
    for expected in options.iter().skip(1).chain(std::iter::once(&SectorFilter::All)) {
        filter = filter.next();
        assert_eq!(&filter, expected);
    }
}

#[test]
fn test_sector_filter_parse() {
    assert_eq!("All".parse::<SectorFilter>(), Ok(SectorFilter::All));
    assert_eq!(
        "7".parse::<SectorFilter>(),
        Ok(SectorFilter::Sector(HealpixSector::new(7).unwrap()))
    );
    assert_eq!("13".parse::<SectorFilter>(), Err(SectorError::OutOfRange(13)));
    assert!(matches!("north".parse::<SectorFilter>(), Err(SectorError::Unparsable(_))));
}

#[test]
fn test_default_query_params() {
    let params = QueryParams::default();
    assert_eq!(params.min_dist, 10.0);
    assert_eq!(params.max_dist, 400.0);
    assert_eq!(params.healpix, None);
    assert_eq!(params.year, 2016);
}

#[test]
fn test_query_params_wire_format() {
    let json = serde_json::to_value(QueryParams::default()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"min_dist": 10.0, "max_dist": 400.0, "healpix": null, "year": 2016})
    );

    let params = QueryParams {
        healpix: Some(HealpixSector::new(7).unwrap()),
        ..QueryParams::default()
    };
    let json = serde_json::to_value(params).unwrap();
    assert_eq!(json["healpix"], serde_json::json!(7));
}

#[test]
fn test_query_params_defaults_on_decode() {
    let params: QueryParams = serde_json::from_str(r#"{"min_dist": 20, "max_dist": 30}"#).unwrap();
    assert_eq!(params.healpix, None);
    assert_eq!(params.year, REFERENCE_EPOCH);

    let bad = serde_json::from_str::<QueryParams>(
        r#"{"min_dist": 20, "max_dist": 30, "healpix": 13}"#,
    );
    assert!(bad.is_err());
}

#[test]
fn test_query_params_range_check() {
    let mut params = QueryParams::default();
    assert!(params.has_valid_range());
    params.min_dist = 500.0;
    assert!(!params.has_valid_range());
    params.min_dist = f64::NAN;
    assert!(!params.has_valid_range());
}

#[test]
fn test_epoch_offset_extreme_years() {
    let mut params = QueryParams::default();
    assert_eq!(params.epoch_offset_years(), 0.0);

    params.year = i32::MIN;
    assert_eq!(params.epoch_offset_years(), i32::MIN as f64 - 2016.0);
    assert!(params.epoch_offset_years() < 0.0);

    params.year = i32::MAX;
    assert_eq!(params.epoch_offset_years(), i32::MAX as f64 - 2016.0);
    assert!(params.epoch_offset_years() > 0.0);
}

#[test]
fn test_star_record_decode() {
    let star: StarRecord = serde_json::from_str(
        r#"{"source_id": "4472832130942575872", "x": 1.0, "y": 2.0, "z": 3.0, "mag": 9.5, "dist": 5.9}"#,
    )
    .unwrap();
    assert_eq!(star.source_id, "4472832130942575872");
    assert_eq!(star.mag, Some(9.5));
    assert_eq!(star.dist, Some(5.9));
}

#[test]
fn test_star_record_optional_fields() {
    let star: StarRecord =
        serde_json::from_str(r#"{"source_id": 42, "x": 1.0, "y": 2.0, "z": 3.0, "mag": null}"#)
            .unwrap();
    assert_eq!(star.source_id, "42");
    assert_eq!(star.mag, None);
    assert_eq!(star.dist, None);
    assert_eq!(star.magnitude_or_default(), DEFAULT_MAGNITUDE);
}

#[test]
fn test_star_record_requires_position() {
    let missing_z = serde_json::from_str::<StarRecord>(r#"{"source_id": "1", "x": 1.0, "y": 2.0}"#);
    assert!(missing_z.is_err());
}

#[test]
fn test_nan_magnitude_reads_as_default() {
    let star = StarRecord::new("1", 0.0, 0.0, 0.0).with_magnitude(f64::NAN);
    assert_eq!(star.magnitude_or_default(), DEFAULT_MAGNITUDE);
}

#[test]
fn test_response_count() {
    let response = StarQueryResponse::from_stars(vec![
        StarRecord::new("a", 0.0, 0.0, 1.0),
        StarRecord::new("b", 0.0, 1.0, 0.0),
    ]);
    assert_eq!(response.count, 2);
}
