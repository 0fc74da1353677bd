use super::{
    climate::{HumidityRule, RainfallRule, TemperatureRule},
    nutrients::{NutrientRule, NITROGEN, PHOSPHORUS, POTASSIUM},
    soil_care::{
        ClayDrainageTip, CoolHoursTip, IntegratedNutrientTip, OrganicMatterTip, SandySlowReleaseTip,
        SandySplitDoseTip, SoilTestingTip,
    },
    FieldContext, Rule,
};

/// Ordered collection of rules; output order is rule order
pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Advice attached to a yield estimate
    pub fn yield_advice() -> Self {
        Self::new(vec![
            Box::new(NutrientRule(NITROGEN)),
            Box::new(NutrientRule(PHOSPHORUS)),
            Box::new(NutrientRule(POTASSIUM)),
            Box::new(TemperatureRule),
            Box::new(RainfallRule),
            Box::new(HumidityRule),
        ])
    }

    /// Nutrient-only advice, for predictions without climate inputs
    pub fn nutrient_advice() -> Self {
        Self::new(vec![
            Box::new(NutrientRule(NITROGEN)),
            Box::new(NutrientRule(PHOSPHORUS)),
            Box::new(NutrientRule(POTASSIUM)),
        ])
    }

    /// Tips attached to a fertilizer plan
    pub fn fertilizer_tips() -> Self {
        Self::new(vec![
            Box::new(OrganicMatterTip),
            Box::new(SandySplitDoseTip),
            Box::new(SandySlowReleaseTip),
            Box::new(ClayDrainageTip),
            Box::new(SoilTestingTip),
            Box::new(IntegratedNutrientTip),
            Box::new(CoolHoursTip),
        ])
    }

    pub fn evaluate(&self, ctx: &FieldContext) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let advice = rule.evaluate(ctx)?;
                tracing::trace!(rule = rule.id(), name = rule.name(), "Rule fired");
                Some(advice)
            })
            .collect()
    }
}
