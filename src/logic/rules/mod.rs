pub mod climate;
pub mod engine;
pub mod nutrients;
pub mod soil_care;

pub use engine::RulesEngine;

use super::reference::CropProfile;
use crate::models::{EstimationInput, SoilType};

/// Everything a rule may look at when deciding whether to speak up
pub struct FieldContext<'a> {
    pub input: &'a EstimationInput,
    pub profile: &'a CropProfile,
    pub soil: Option<SoilType>,
}

/// Trait for agronomic advice rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a line of advice if conditions are met
    fn evaluate(&self, ctx: &FieldContext) -> Option<String>;
}
