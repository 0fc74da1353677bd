pub mod calculations;
pub mod disease;
pub mod environment;
pub mod fertilizer;
pub mod reference;
pub mod rules;
pub mod shops;
pub mod weather;
pub mod yield_estimator;

pub use disease::identify_disease;
pub use environment::sample_conditions;
pub use fertilizer::estimate_fertilizer;
pub use shops::nearby_shops;
pub use yield_estimator::{estimate_sensor_yield, estimate_yield};

use crate::error::{AgroError, Result};
use crate::models::EstimationInput;

/// Field area must be a positive, finite number of hectares
pub fn validate_area(area_hectares: f64) -> Result<()> {
    if area_hectares.is_finite() && area_hectares > 0.0 {
        Ok(())
    } else {
        Err(AgroError::InvalidInput(format!(
            "Area must be greater than zero, got {}",
            area_hectares
        )))
    }
}

/// Area plus every supplied measurement must be finite
pub fn validate_input(input: &EstimationInput) -> Result<()> {
    validate_area(input.area_hectares)?;

    let measurements = [
        ("nitrogen", Some(input.nitrogen)),
        ("phosphorus", Some(input.phosphorus)),
        ("potassium", Some(input.potassium)),
        ("rainfall", Some(input.rainfall_mm)),
        ("temperature", Some(input.temperature_c)),
        ("humidity", Some(input.humidity_pct)),
        ("soil pH", input.soil_ph),
        ("organic matter", input.organic_matter_pct),
    ];
    match measurements
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
    {
        Some((name, _)) => Err(AgroError::InvalidInput(format!(
            "{} must be a finite number",
            name
        ))),
        None => Ok(()),
    }
}

/// Computed figures have to survive a JSON round trip
pub fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AgroError::InvalidInput(format!(
            "{} is out of range; check the area and measurements",
            what
        )))
    }
}
