use super::{FieldContext, Rule};

/// Temperature outside the crop's optimal band
///
/// - Below min: protect from cold
/// - Above max: shade and extra irrigation
pub struct TemperatureRule;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature_range"
    }

    fn name(&self) -> &'static str {
        "Temperature Outside Optimal Range"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        let (min, max) = ctx.profile.temperature_c;
        let temperature = ctx.input.temperature_c;

        if temperature < min {
            Some("Consider using row covers or greenhouse protection during cold periods".into())
        } else if temperature > max {
            Some("Implement shade nets or increase irrigation frequency during hot weather".into())
        } else {
            None
        }
    }
}

/// Seasonal rainfall outside the crop's optimal band
pub struct RainfallRule;

impl Rule for RainfallRule {
    fn id(&self) -> &'static str {
        "rainfall_range"
    }

    fn name(&self) -> &'static str {
        "Rainfall Outside Optimal Range"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        let (min, max) = ctx.profile.rainfall_mm;
        let rainfall = ctx.input.rainfall_mm;

        if rainfall < min {
            Some("Increase irrigation to compensate for low rainfall".into())
        } else if rainfall > max {
            Some("Ensure proper drainage to prevent waterlogging".into())
        } else {
            None
        }
    }
}

/// Fungal risk from sustained humidity. Uses a fixed 85% line rather than
/// the crop's range, so low humidity never produces advice.
pub struct HumidityRule;

const HIGH_HUMIDITY_PCT: f64 = 85.0;

impl Rule for HumidityRule {
    fn id(&self) -> &'static str {
        "high_humidity"
    }

    fn name(&self) -> &'static str {
        "High Humidity"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        (ctx.input.humidity_pct > HIGH_HUMIDITY_PCT)
            .then(|| "Improve air circulation to reduce fungal disease risk".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reference::crop_profile;
    use crate::models::{CropType, EstimationInput};

    fn evaluate(rule: &dyn Rule, input: &EstimationInput) -> Option<String> {
        let ctx = FieldContext {
            input,
            profile: crop_profile(Some(CropType::Wheat)),
            soil: None,
        };
        rule.evaluate(&ctx)
    }

    #[test]
    fn temperature_cold_and_hot() {
        // Wheat: 15-25°C
        let cold = EstimationInput::new("wheat", "loamy", 1.0).with_climate(10.0, 100.0, 65.0);
        assert!(evaluate(&TemperatureRule, &cold).unwrap().contains("row covers"));

        let hot = EstimationInput::new("wheat", "loamy", 1.0).with_climate(30.0, 100.0, 65.0);
        assert!(evaluate(&TemperatureRule, &hot).unwrap().contains("shade nets"));

        let fine = EstimationInput::new("wheat", "loamy", 1.0).with_climate(25.0, 100.0, 65.0);
        assert!(evaluate(&TemperatureRule, &fine).is_none());
    }

    #[test]
    fn rainfall_dry_and_wet() {
        // Wheat: 50-150mm
        let dry = EstimationInput::new("wheat", "loamy", 1.0).with_climate(20.0, 20.0, 65.0);
        assert!(evaluate(&RainfallRule, &dry).unwrap().contains("irrigation"));

        let wet = EstimationInput::new("wheat", "loamy", 1.0).with_climate(20.0, 400.0, 65.0);
        assert!(evaluate(&RainfallRule, &wet).unwrap().contains("drainage"));
    }

    #[test]
    fn humidity_only_fires_above_85() {
        let low = EstimationInput::new("wheat", "loamy", 1.0).with_climate(20.0, 100.0, 10.0);
        assert!(evaluate(&HumidityRule, &low).is_none());

        let edge = EstimationInput::new("wheat", "loamy", 1.0).with_climate(20.0, 100.0, 85.0);
        assert!(evaluate(&HumidityRule, &edge).is_none());

        let high = EstimationInput::new("wheat", "loamy", 1.0).with_climate(20.0, 100.0, 90.0);
        assert!(evaluate(&HumidityRule, &high).is_some());
    }
}
