use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiseaseSeverity {
    Medium,
    High,
}

impl DiseaseSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseSeverity::Medium => "Medium",
            DiseaseSeverity::High => "High",
        }
    }
}

impl std::fmt::Display for DiseaseSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference entry in the disease catalogue
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseProfile {
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub symptoms: &'static str,
    pub cause: &'static str,
    pub severity: DiseaseSeverity,
    pub treatment: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub organic_treatment: &'static [&'static str],
}

/// Metadata of an uploaded leaf photo; the image bytes never reach the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct ImageMetadata {
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageQuality {
    Good,
    Fair,
    Poor,
}

impl ImageQuality {
    pub fn from_confidence(confidence: u32) -> Self {
        if confidence > 85 {
            ImageQuality::Good
        } else if confidence > 70 {
            ImageQuality::Fair
        } else {
            ImageQuality::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub quality: ImageQuality,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseIdentification {
    pub disease: &'static DiseaseProfile,
    pub confidence: u32,
    pub additional_recommendations: Vec<String>,
    pub image_analysis: Option<ImageAnalysis>,
    pub next_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_quality_thresholds() {
        assert_eq!(ImageQuality::from_confidence(99), ImageQuality::Good);
        assert_eq!(ImageQuality::from_confidence(86), ImageQuality::Good);
        assert_eq!(ImageQuality::from_confidence(85), ImageQuality::Fair);
        assert_eq!(ImageQuality::from_confidence(71), ImageQuality::Fair);
        assert_eq!(ImageQuality::from_confidence(70), ImageQuality::Poor);
    }
}
