use super::{FieldContext, Rule};
use crate::models::EstimationInput;

/// A soil nutrient with the level (kg/ha) below which we advise topping it up
pub struct Nutrient {
    id: &'static str,
    name: &'static str,
    threshold: f64,
    level: fn(&EstimationInput) -> f64,
    advice: &'static str,
}

pub const NITROGEN: Nutrient = Nutrient {
    id: "low_nitrogen",
    name: "Low Nitrogen",
    threshold: 80.0,
    level: |input| input.nitrogen,
    advice: "Increase nitrogen application for better vegetative growth",
};

pub const PHOSPHORUS: Nutrient = Nutrient {
    id: "low_phosphorus",
    name: "Low Phosphorus",
    threshold: 40.0,
    level: |input| input.phosphorus,
    advice: "Apply phosphorus fertilizer to improve root development",
};

pub const POTASSIUM: Nutrient = Nutrient {
    id: "low_potassium",
    name: "Low Potassium",
    threshold: 30.0,
    level: |input| input.potassium,
    advice: "Add potassium fertilizer to enhance disease resistance",
};

/// Fires when the measured level is strictly below the nutrient's threshold.
///
/// Thresholds are fixed and crop-independent; crop targets only matter for
/// fertilizer deficiencies.
pub struct NutrientRule(pub Nutrient);

impl Rule for NutrientRule {
    fn id(&self) -> &'static str {
        self.0.id
    }

    fn name(&self) -> &'static str {
        self.0.name
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        let level = (self.0.level)(ctx.input);
        (level < self.0.threshold).then(|| self.0.advice.to_string())
    }
}
