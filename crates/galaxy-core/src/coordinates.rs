use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::constants::MAS_TO_RAD;

/// Order-0 nested HEALPix pixel (0..12) containing `direction`.
///
/// Returns `None` for a zero or non-finite vector. The polar caps hold
/// pixels 0..4 (north) and 8..12 (south), the equatorial belt 4..8.
pub fn healpix_base_pixel(direction: DVec3) -> Option<u8> {
    let len = direction.length();
    if !len.is_finite() || len <= 0.0 {
        return None;
    }

    let z = direction.z / len;
    let phi = direction.y.atan2(direction.x).rem_euclid(TAU);
    // Longitude in units of quarter turns, [0, 4)
    let tt = (phi / FRAC_PI_2).min(4.0 - f64::EPSILON);

    let face = if z.abs() <= 2.0 / 3.0 {
        let temp1 = 0.5 + tt;
        let temp2 = 0.75 * z;
        let ifp = (temp1 - temp2).floor() as i64;
        let ifm = (temp1 + temp2).floor() as i64;

        if ifp == ifm {
            ifp | 4
        } else if ifp < ifm {
            ifp
        } else {
            ifm + 8
        }
    } else {
        let ntt = (tt.floor() as i64).min(3);
        if z > 0.0 { ntt } else { ntt + 8 }
    };

    Some(face as u8)
}

/// Propagate a catalog star from the reference epoch by `delta_years`.
///
/// `direction` is the unit vector at the reference epoch, `angular_velocity_mas`
/// the Cartesian angular velocity in mas/yr. The result is in light years.
pub fn propagate(
    direction: DVec3,
    angular_velocity_mas: DVec3,
    distance_ly: f64,
    delta_years: f64,
) -> DVec3 {
    let origin = direction * distance_ly;
    let linear = angular_velocity_mas * MAS_TO_RAD * distance_ly;
    origin + linear * delta_years
}
