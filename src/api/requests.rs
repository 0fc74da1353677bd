//! Wire forms of the POST bodies.
//!
//! Every field is optional at the serde level so a missing field produces
//! "Missing required fields" rather than a deserialization error. Numeric
//! fields accept numbers or numeric strings, since form posts often send
//! the latter.

use serde::{Deserialize, Deserializer};

use crate::error::{AgroError, Result};
use crate::models::{EstimationInput, ImageMetadata, InputMethod, SensorReading};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            // "NaN" carries no value; infinities are left for validation to reject
            .map(|n| Some(n).filter(|n| !n.is_nan()))
            .map_err(|_| D::Error::custom(format!("invalid number '{}'", s))),
    }
}

/// Blank strings count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldRequest {
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub nitrogen: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub phosphorus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub potassium: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rainfall: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
}

impl YieldRequest {
    /// Crop, soil and a finite non-zero area are required; measurements default to 0
    pub fn into_input(self) -> Result<EstimationInput> {
        let (Some(crop), Some(soil), Some(area)) = (
            present(self.crop_type),
            present(self.soil_type),
            self.area.filter(|a| a.is_finite() && *a != 0.0),
        ) else {
            return Err(AgroError::MissingFields);
        };

        Ok(EstimationInput::new(crop, soil, area)
            .with_nutrients(
                self.nitrogen.unwrap_or_default(),
                self.phosphorus.unwrap_or_default(),
                self.potassium.unwrap_or_default(),
            )
            .with_climate(
                self.temperature.unwrap_or_default(),
                self.rainfall.unwrap_or_default(),
                self.humidity.unwrap_or_default(),
            ))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerRequest {
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
    #[serde(default, rename = "soilpH", deserialize_with = "lenient_number")]
    pub soil_ph: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub nitrogen_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub phosphorus_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub potassium_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub organic_matter: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub area: Option<f64>,
}

const DEFAULT_FERTILIZER_AREA_HA: f64 = 1.0;

impl FertilizerRequest {
    /// Crop and soil are required; area defaults to one hectare
    pub fn into_input(self) -> Result<EstimationInput> {
        let (Some(crop), Some(soil)) = (present(self.crop_type), present(self.soil_type)) else {
            return Err(AgroError::MissingFields);
        };

        let mut input = EstimationInput::new(
            crop,
            soil,
            self.area.unwrap_or(DEFAULT_FERTILIZER_AREA_HA),
        )
        .with_nutrients(
            self.nitrogen_level.unwrap_or_default(),
            self.phosphorus_level.unwrap_or_default(),
            self.potassium_level.unwrap_or_default(),
        );
        if let Some(ph) = self.soil_ph {
            input = input.with_soil_ph(ph);
        }
        if let Some(organic_matter) = self.organic_matter {
            input = input.with_organic_matter(organic_matter);
        }
        Ok(input)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorYieldRequest {
    #[serde(flatten)]
    pub field: YieldRequest,
    pub input_method: Option<String>,
    pub sensor_data: Option<SensorReading>,
}

impl SensorYieldRequest {
    pub fn into_parts(self) -> Result<(EstimationInput, InputMethod, Option<SensorReading>)> {
        let method = self
            .input_method
            .as_deref()
            .map(InputMethod::from_str)
            .unwrap_or_default();
        Ok((self.field.into_input()?, method, self.sensor_data))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRequest {
    pub crop_type: Option<String>,
    pub image: Option<ImageMetadata>,
}

impl DiseaseRequest {
    pub fn crop_type(&self) -> Option<&str> {
        self.crop_type.as_deref().filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yield_request_accepts_numeric_strings() {
        let req: YieldRequest = serde_json::from_str(
            r#"{"cropType":"rice","soilType":"loamy","area":"2.5","nitrogen":50,"rainfall":""}"#,
        )
        .unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input.area_hectares, 2.5);
        assert_eq!(input.nitrogen, 50.0);
        assert_eq!(input.rainfall_mm, 0.0);
    }

    #[test]
    fn yield_request_requires_area() {
        let missing: YieldRequest =
            serde_json::from_str(r#"{"cropType":"rice","soilType":"loamy"}"#).unwrap();
        assert!(matches!(missing.into_input(), Err(AgroError::MissingFields)));

        let zero: YieldRequest =
            serde_json::from_str(r#"{"cropType":"rice","soilType":"loamy","area":0}"#).unwrap();
        assert!(matches!(zero.into_input(), Err(AgroError::MissingFields)));

        // Negative areas get through here and fail validation in the estimator
        let negative: YieldRequest =
            serde_json::from_str(r#"{"cropType":"rice","soilType":"loamy","area":-1}"#).unwrap();
        assert_eq!(negative.into_input().unwrap().area_hectares, -1.0);
    }

    #[test]
    fn non_finite_area_counts_as_missing() {
        for area in [r#""NaN""#, r#""inf""#, r#""-infinity""#] {
            let json = format!(r#"{{"cropType":"rice","soilType":"loamy","area":{}}}"#, area);
            let req: YieldRequest = serde_json::from_str(&json).unwrap();
            assert!(matches!(req.into_input(), Err(AgroError::MissingFields)), "area {}", area);
        }
    }

    #[test]
    fn nan_measurement_defaults_to_zero() {
        let req: YieldRequest = serde_json::from_str(
            r#"{"cropType":"rice","soilType":"loamy","area":1,"nitrogen":"NaN"}"#,
        )
        .unwrap();
        assert_eq!(req.into_input().unwrap().nitrogen, 0.0);
    }

    #[test]
    fn garbage_number_is_rejected() {
        let result: std::result::Result<YieldRequest, _> =
            serde_json::from_str(r#"{"cropType":"rice","area":"lots"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fertilizer_request_defaults() {
        let req: FertilizerRequest =
            serde_json::from_str(r#"{"cropType":"wheat","soilType":"loamy","nitrogenLevel":30,"soilpH":"7.1"}"#)
                .unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input.area_hectares, 1.0);
        assert_eq!(input.nitrogen, 30.0);
        assert_eq!(input.soil_ph, Some(7.1));
        assert_eq!(input.organic_matter_pct, None);
    }

    #[test]
    fn fertilizer_request_blank_soil_is_missing() {
        let req: FertilizerRequest =
            serde_json::from_str(r#"{"cropType":"wheat","soilType":"  "}"#).unwrap();
        assert!(matches!(req.into_input(), Err(AgroError::MissingFields)));
    }

    #[test]
    fn sensor_request_parts() {
        let req: SensorYieldRequest = serde_json::from_str(
            r#"{"cropType":"maize","soilType":"silt","area":3,"nitrogen":120,
                "inputMethod":"sensor","sensorData":{"soilMoisture":55,"soilPH":6.8}}"#,
        )
        .unwrap();
        let (input, method, sensor) = req.into_parts().unwrap();
        assert_eq!(input.crop_type, "maize");
        assert_eq!(method, InputMethod::Sensor);
        assert_eq!(sensor.unwrap().soil_ph, 6.8);
    }
}
