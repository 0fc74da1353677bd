use super::{FieldContext, Rule};
use crate::models::SoilType;

const LOW_ORGANIC_MATTER_PCT: f64 = 2.0;

/// Organic matter below 2%
pub struct OrganicMatterTip;

impl Rule for OrganicMatterTip {
    fn id(&self) -> &'static str {
        "low_organic_matter"
    }

    fn name(&self) -> &'static str {
        "Low Organic Matter"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        let organic_matter = ctx.input.organic_matter_pct?;
        (organic_matter < LOW_ORGANIC_MATTER_PCT).then(|| {
            "Increase organic matter by adding compost or farmyard manure regularly".to_string()
        })
    }
}

pub struct SandySplitDoseTip;

impl Rule for SandySplitDoseTip {
    fn id(&self) -> &'static str {
        "sandy_split_dose"
    }

    fn name(&self) -> &'static str {
        "Split Doses on Sandy Soil"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        (ctx.soil == Some(SoilType::Sandy))
            .then(|| "Apply fertilizers in split doses to reduce leaching losses".to_string())
    }
}

pub struct SandySlowReleaseTip;

impl Rule for SandySlowReleaseTip {
    fn id(&self) -> &'static str {
        "sandy_slow_release"
    }

    fn name(&self) -> &'static str {
        "Slow-Release Fertilizer on Sandy Soil"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        (ctx.soil == Some(SoilType::Sandy)).then(|| {
            "Consider slow-release fertilizers for better nutrient efficiency".to_string()
        })
    }
}

pub struct ClayDrainageTip;

impl Rule for ClayDrainageTip {
    fn id(&self) -> &'static str {
        "clay_drainage"
    }

    fn name(&self) -> &'static str {
        "Drainage on Clay Soil"
    }

    fn evaluate(&self, ctx: &FieldContext) -> Option<String> {
        (ctx.soil == Some(SoilType::Clayey)).then(|| {
            "Improve soil drainage and add organic matter to enhance nutrient availability"
                .to_string()
        })
    }
}

pub struct SoilTestingTip;

impl Rule for SoilTestingTip {
    fn id(&self) -> &'static str {
        "soil_testing"
    }

    fn name(&self) -> &'static str {
        "Soil Testing"
    }

    fn evaluate(&self, _ctx: &FieldContext) -> Option<String> {
        Some("Always conduct soil testing before fertilizer application".into())
    }
}

pub struct IntegratedNutrientTip;

impl Rule for IntegratedNutrientTip {
    fn id(&self) -> &'static str {
        "integrated_nutrients"
    }

    fn name(&self) -> &'static str {
        "Integrated Nutrient Management"
    }

    fn evaluate(&self, _ctx: &FieldContext) -> Option<String> {
        Some("Follow integrated nutrient management combining organic and inorganic sources".into())
    }
}

pub struct CoolHoursTip;

impl Rule for CoolHoursTip {
    fn id(&self) -> &'static str {
        "cool_hours"
    }

    fn name(&self) -> &'static str {
        "Apply During Cool Hours"
    }

    fn evaluate(&self, _ctx: &FieldContext) -> Option<String> {
        Some("Apply fertilizers during cool hours to minimize volatilization losses".into())
    }
}
