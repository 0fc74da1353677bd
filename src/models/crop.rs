use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Rice,
    Wheat,
    Maize,
    Cotton,
    Sugarcane,
    Soybean,
    Potato,
}

impl CropType {
    pub const ALL: [CropType; 7] = [
        CropType::Rice,
        CropType::Wheat,
        CropType::Maize,
        CropType::Cotton,
        CropType::Sugarcane,
        CropType::Soybean,
        CropType::Potato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
            CropType::Maize => "maize",
            CropType::Cotton => "cotton",
            CropType::Sugarcane => "sugarcane",
            CropType::Soybean => "soybean",
            CropType::Potato => "potato",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paddy" => Some(CropType::Rice),
            "corn" => Some(CropType::Maize),
            "sugar cane" => Some(CropType::Sugarcane),
            "soya" => Some(CropType::Soybean),
            name => Self::ALL.into_iter().find(|crop| crop.as_str() == name),
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoilType {
    Sandy,
    Loamy,
    Clayey,
    Silt,
    BlackSoil,
    RedSoil,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Clayey => "clayey",
            SoilType::Silt => "silt",
            SoilType::BlackSoil => "black-soil",
            SoilType::RedSoil => "red-soil",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandy" => Some(SoilType::Sandy),
            "loamy" => Some(SoilType::Loamy),
            "clayey" => Some(SoilType::Clayey),
            "silt" => Some(SoilType::Silt),
            "black-soil" | "black soil" | "blacksoil" => Some(SoilType::BlackSoil),
            "red-soil" | "red soil" | "redsoil" => Some(SoilType::RedSoil),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
