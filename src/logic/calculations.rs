use super::reference::Range;

/// Lowest score a measurement can earn, however far outside its range
pub const OPTIMALITY_FLOOR: f64 = 0.3;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Score how close a measurement is to its optimal range.
///
/// Returns 1.0 inside the inclusive range and decays linearly with the
/// relative distance from the nearest bound, never dropping below
/// [`OPTIMALITY_FLOOR`]. A zero bound would divide by zero, so it scores the
/// floor instead.
pub fn optimality(value: f64, range: Range) -> f64 {
    let (min, max) = range;

    if value >= min && value <= max {
        1.0
    } else if value < min {
        if min == 0.0 {
            return OPTIMALITY_FLOOR;
        }
        (1.0 - (min - value) / min).max(OPTIMALITY_FLOOR)
    } else {
        if max == 0.0 {
            return OPTIMALITY_FLOOR;
        }
        (1.0 - (value - max) / max).max(OPTIMALITY_FLOOR)
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a non-negative product quantity to whole units
pub fn round_whole(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

/// Great-circle distance between two points in km (haversine)
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
