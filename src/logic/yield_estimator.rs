use super::calculations::{mean, optimality, round2};
use super::reference::{self, CropProfile};
use super::rules::{FieldContext, RulesEngine};
use super::{ensure_finite, validate_input};
use crate::error::Result;
use crate::models::{
    ComparisonPoint, CropType, EstimationInput, InputMethod, PredictedYield, SensorReading,
    SensorYieldEstimate, SoilType, YieldEstimate, YieldFactors,
};

/// Nutrient factor never drags yield below half of its potential
const NUTRIENT_FLOOR: f64 = 0.5;

const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 95.0;

/// Fixed multipliers for the comparison chart, not derived from history
const CHART_SERIES: [(&str, f64); 3] = [
    ("Predicted", 1.0),
    ("Optimal", 1.2),
    ("Previous Season", 0.9),
];

/// Estimate yield for a field.
///
/// Combines the crop's base yield with the soil factor, the mean climate
/// optimality and the most limiting nutrient ratio. Out-of-range
/// measurements are scored, never rejected; only a non-positive area is an
/// error.
pub fn estimate_yield(input: &EstimationInput) -> Result<YieldEstimate> {
    validate_input(input)?;

    let crop = CropType::from_str(&input.crop_type);
    let soil = SoilType::from_str(&input.soil_type);
    let profile = reference::crop_profile(crop);
    let soil_factor = reference::soil_profile(soil).yield_factor;

    let environment = environment_factor(input, profile);
    let nutrients = nutrient_factor(input.nitrogen, input.phosphorus, input.potassium);

    let per_hectare = yield_per_hectare(profile.base_yield, soil_factor, environment, nutrients);
    let total = per_hectare * input.area_hectares;

    if crop.is_none() {
        tracing::debug!("Unknown crop '{}', using fallback profile", input.crop_type);
    }
    tracing::debug!(
        crop = %input.crop_type,
        soil_factor,
        environment,
        nutrients,
        per_hectare,
        "Yield estimated"
    );

    let ctx = FieldContext {
        input,
        profile,
        soil,
    };

    Ok(YieldEstimate {
        predicted_yield: PredictedYield {
            total: reported(total, "Total yield")?,
            per_hectare: reported(per_hectare, "Yield per hectare")?,
        },
        confidence: confidence(environment, nutrients),
        factors: YieldFactors {
            soil: round2(soil_factor),
            environment: reported(environment, "Environment factor")?,
            nutrients: reported(nutrients, "Nutrient factor")?,
        },
        recommendations: RulesEngine::yield_advice().evaluate(&ctx),
        chart_data: CHART_SERIES
            .iter()
            .map(|(name, multiplier)| {
                reported(per_hectare * multiplier, "Chart yield")
                    .map(|value| ComparisonPoint::new(name, value))
            })
            .collect::<Result<_>>()?,
    })
}

/// Mean optimality of temperature, rainfall and humidity
pub fn environment_factor(input: &EstimationInput, profile: &CropProfile) -> f64 {
    mean(&[
        optimality(input.temperature_c, profile.temperature_c),
        optimality(input.rainfall_mm, profile.rainfall_mm),
        optimality(input.humidity_pct, profile.humidity_pct),
    ])
}

/// Rounded for the response; overflow is an input error
fn reported(value: f64, what: &str) -> Result<f64> {
    ensure_finite(round2(value), what)
}

/// Liebig-style limiting factor: the worst of the three nutrient ratios
pub fn nutrient_factor(nitrogen: f64, phosphorus: f64, potassium: f64) -> f64 {
    let n = 1.0 + (nitrogen - 50.0) / 200.0;
    let p = 1.0 + (phosphorus - 40.0) / 160.0;
    let k = 1.0 + (potassium - 30.0) / 120.0;
    n.min(p).min(k)
}

pub fn yield_per_hectare(base_yield: f64, soil_factor: f64, environment: f64, nutrients: f64) -> f64 {
    base_yield * soil_factor * environment * nutrients.max(NUTRIENT_FLOOR)
}

/// Confidence percentage, clamped to 60..=95
pub fn confidence(environment: f64, nutrients: f64) -> u32 {
    let raw = 70.0 + (environment - 0.7) * 50.0 + (nutrients - 0.8) * 25.0;
    // NaN inputs clamp to the floor
    let clamped = if raw.is_nan() {
        MIN_CONFIDENCE
    } else {
        raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    };
    clamped.round() as u32
}

const OPTIMAL_MOISTURE_PCT: f64 = 60.0;
const OPTIMAL_SENSOR_PH: f64 = 6.5;
const REFERENCE_NPK: (f64, f64, f64) = (120.0, 60.0, 60.0);

/// Estimate yield from a sensor or environmental feed.
///
/// Climate is not scored here: the environment factor comes from soil
/// moisture and pH when a sensor reading is present, otherwise from a fixed
/// value per input method. Nutrients are averaged against fixed reference
/// levels instead of taking the limiting factor.
pub fn estimate_sensor_yield(
    input: &EstimationInput,
    method: InputMethod,
    sensor: Option<SensorReading>,
) -> Result<SensorYieldEstimate> {
    validate_input(input)?;

    let crop = CropType::from_str(&input.crop_type);
    let soil = SoilType::from_str(&input.soil_type);
    let profile = reference::crop_profile(crop);
    let soil_factor = reference::soil_profile(soil).yield_factor;

    let (environment, confidence) = match (method, sensor) {
        (InputMethod::Sensor, Some(reading)) => {
            let moisture = 1.0 - (reading.soil_moisture - OPTIMAL_MOISTURE_PCT).abs() / 100.0;
            let ph = 1.0 - (reading.soil_ph - OPTIMAL_SENSOR_PH).abs() / 5.0;
            ((moisture + ph) / 2.0, 85)
        }
        (InputMethod::Environmental, _) => (0.9, 80),
        _ => (0.8, 70),
    };

    let (ref_n, ref_p, ref_k) = REFERENCE_NPK;
    let nutrients = mean(&[
        (input.nitrogen / ref_n).min(1.0),
        (input.phosphorus / ref_p).min(1.0),
        (input.potassium / ref_k).min(1.0),
    ]);

    let per_hectare = profile.base_yield * soil_factor * environment * nutrients;
    let total = per_hectare * input.area_hectares;

    tracing::debug!(%method, environment, nutrients, per_hectare, "Sensor yield estimated");

    let ctx = FieldContext {
        input,
        profile,
        soil,
    };

    Ok(SensorYieldEstimate {
        predicted_yield: PredictedYield {
            total: reported(total, "Total yield")?,
            per_hectare: reported(per_hectare, "Yield per hectare")?,
        },
        confidence,
        factors: YieldFactors {
            soil: round2(soil_factor),
            environment: reported(environment, "Environment factor")?,
            nutrients: reported(nutrients, "Nutrient factor")?,
        },
        input_method: method,
        recommendations: RulesEngine::nutrient_advice().evaluate(&ctx),
    })
}
