use serde::{Deserialize, Serialize};

/// Nutrient shortfall in kg/ha, before any soil adjustment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deficiencies {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl Deficiencies {
    pub fn total(&self) -> f64 {
        self.nitrogen + self.phosphorus + self.potassium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilPhAnalysis {
    pub current: Option<f64>,
    pub optimal: f64,
    /// Positive when the soil is more acidic than the crop wants
    pub adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganicMatterStatus {
    Low,
    Moderate,
    Good,
}

impl OrganicMatterStatus {
    pub fn from_percent(percent: Option<f64>) -> Self {
        match percent {
            Some(p) if p < 1.5 => OrganicMatterStatus::Low,
            Some(p) if p > 3.0 => OrganicMatterStatus::Good,
            _ => OrganicMatterStatus::Moderate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganicMatterAnalysis {
    pub current: Option<f64>,
    pub status: OrganicMatterStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    pub deficiencies: Deficiencies,
    #[serde(rename = "soilpH")]
    pub soil_ph: SoilPhAnalysis,
    pub organic_matter: OrganicMatterAnalysis,
}

/// Product quantities in kg for the whole area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChemicalProducts {
    pub urea: u64,
    pub dap: u64,
    pub mop: u64,
    pub lime: u64,
    pub gypsum: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganicProducts {
    pub compost: u64,
    pub vermicompost: u64,
    pub farmyard_manure: u64,
    pub green_manure_recommended: bool,
    pub biofertilizers: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStage {
    pub stage: String,
    #[serde(rename = "application")]
    pub instructions: String,
}

impl ScheduleStage {
    pub fn new(stage: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            instructions: instructions.into(),
        }
    }
}

/// Estimated spend in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub chemical: f64,
    pub organic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerRecommendations {
    pub chemical: ChemicalProducts,
    pub organic: OrganicProducts,
    pub schedule: Vec<ScheduleStage>,
    pub cost_estimation: CostEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlan {
    pub analysis: SoilAnalysis,
    pub recommendations: FertilizerRecommendations,
    pub tips: Vec<String>,
}
