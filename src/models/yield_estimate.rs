use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedYield {
    /// Tons over the whole area
    pub total: f64,
    /// Tons per hectare
    pub per_hectare: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldFactors {
    pub soil: f64,
    pub environment: f64,
    pub nutrients: f64,
}

/// One bar of the comparison chart shown next to a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_value: f64,
}

impl ComparisonPoint {
    pub fn new(name: &str, yield_value: f64) -> Self {
        Self {
            name: name.to_string(),
            yield_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    pub predicted_yield: PredictedYield,
    pub confidence: u32,
    pub factors: YieldFactors,
    pub recommendations: Vec<String>,
    pub chart_data: Vec<ComparisonPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Manual,
    Sensor,
    Environmental,
}

impl InputMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMethod::Manual => "manual",
            InputMethod::Sensor => "sensor",
            InputMethod::Environmental => "environmental",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sensor" => InputMethod::Sensor,
            "environmental" => InputMethod::Environmental,
            _ => InputMethod::Manual,
        }
    }
}

impl std::fmt::Display for InputMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub soil_moisture: f64,
    #[serde(rename = "soilPH")]
    pub soil_ph: f64,
}

/// Prediction produced from sensor or environmental feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorYieldEstimate {
    pub predicted_yield: PredictedYield,
    pub confidence: u32,
    pub factors: YieldFactors,
    pub input_method: InputMethod,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_point_uses_yield_key() {
        let json = serde_json::to_value(ComparisonPoint::new("Optimal", 6.17)).unwrap();
        assert_eq!(json["name"], "Optimal");
        assert_eq!(json["yield"], 6.17);
    }

    #[test]
    fn input_method_from_str_defaults_to_manual() {
        assert_eq!(InputMethod::from_str("sensor"), InputMethod::Sensor);
        assert_eq!(InputMethod::from_str("Environmental"), InputMethod::Environmental);
        assert_eq!(InputMethod::from_str("manual"), InputMethod::Manual);
        assert_eq!(InputMethod::from_str("telepathy"), InputMethod::Manual);
    }
}
