use rand::Rng;

use crate::models::{EnvironmentalSnapshot, GeoPoint, SoilSample, WeatherSample};

/// Simulated field conditions for a location.
///
/// Stands in for a sensor network: every reading is drawn uniformly from a
/// plausible band for the growing season.
pub fn sample_conditions<R: Rng + ?Sized>(location: GeoPoint, rng: &mut R) -> EnvironmentalSnapshot {
    EnvironmentalSnapshot {
        weather: WeatherSample {
            temperature: rng.gen_range(25.0..35.0),
            humidity: rng.gen_range(60.0..80.0),
            rainfall: rng.gen_range(100.0..300.0),
            wind_speed: rng.gen_range(5.0..15.0),
        },
        soil: SoilSample {
            moisture: rng.gen_range(40.0..70.0),
            ph: rng.gen_range(6.0..8.0),
            organic_matter: rng.gen_range(2.0..5.0),
        },
        location,
    }
}
