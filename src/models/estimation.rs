use serde::{Deserialize, Serialize};

/// Field measurements supplied by the caller for one estimate.
///
/// Nutrient levels are kg/ha, rainfall is mm for the season, temperature is
/// °C and humidity is relative percent. Crop and soil stay as the caller's
/// strings; unknown values resolve to fallback reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInput {
    pub crop_type: String,
    pub soil_type: String,
    pub area_hectares: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub soil_ph: Option<f64>,
    pub organic_matter_pct: Option<f64>,
}

impl EstimationInput {
    pub fn new(crop_type: impl Into<String>, soil_type: impl Into<String>, area_hectares: f64) -> Self {
        Self {
            crop_type: crop_type.into(),
            soil_type: soil_type.into(),
            area_hectares,
            nitrogen: 0.0,
            phosphorus: 0.0,
            potassium: 0.0,
            rainfall_mm: 0.0,
            temperature_c: 0.0,
            humidity_pct: 0.0,
            soil_ph: None,
            organic_matter_pct: None,
        }
    }

    pub fn with_nutrients(mut self, nitrogen: f64, phosphorus: f64, potassium: f64) -> Self {
        self.nitrogen = nitrogen;
        self.phosphorus = phosphorus;
        self.potassium = potassium;
        self
    }

    pub fn with_climate(mut self, temperature_c: f64, rainfall_mm: f64, humidity_pct: f64) -> Self {
        self.temperature_c = temperature_c;
        self.rainfall_mm = rainfall_mm;
        self.humidity_pct = humidity_pct;
        self
    }

    pub fn with_soil_ph(mut self, soil_ph: f64) -> Self {
        self.soil_ph = Some(soil_ph);
        self
    }

    pub fn with_organic_matter(mut self, organic_matter_pct: f64) -> Self {
        self.organic_matter_pct = Some(organic_matter_pct);
        self
    }
}
