//! Static agronomic reference data: per-crop targets and per-soil factors.
//!
//! Everything here is immutable and resolved at compile time. Lookups take
//! an `Option` so callers can pass an unparsed crop or soil straight through
//! and get the documented fallback.

use crate::models::{CropType, SoilType};

/// Inclusive `[min, max]` optimal range
pub type Range = (f64, f64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProfile {
    /// t/ha under ideal conditions
    pub base_yield: f64,
    pub temperature_c: Range,
    pub rainfall_mm: Range,
    pub humidity_pct: Range,
    /// kg/ha
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub soil_ph: f64,
}

const DEFAULT_TEMPERATURE: Range = (20.0, 30.0);
const DEFAULT_RAINFALL: Range = (100.0, 200.0);
const DEFAULT_HUMIDITY: Range = (60.0, 80.0);

pub const FALLBACK_PROFILE: CropProfile = CropProfile {
    base_yield: 3.0,
    temperature_c: DEFAULT_TEMPERATURE,
    rainfall_mm: DEFAULT_RAINFALL,
    humidity_pct: DEFAULT_HUMIDITY,
    nitrogen: 120.0,
    phosphorus: 60.0,
    potassium: 60.0,
    soil_ph: 6.5,
};

const RICE: CropProfile = CropProfile {
    base_yield: 4.5,
    temperature_c: (20.0, 30.0),
    rainfall_mm: (150.0, 300.0),
    humidity_pct: (70.0, 85.0),
    nitrogen: 120.0,
    phosphorus: 60.0,
    potassium: 60.0,
    soil_ph: 6.0,
};

const WHEAT: CropProfile = CropProfile {
    base_yield: 3.8,
    temperature_c: (15.0, 25.0),
    rainfall_mm: (50.0, 150.0),
    humidity_pct: (60.0, 75.0),
    nitrogen: 100.0,
    phosphorus: 50.0,
    potassium: 50.0,
    soil_ph: 6.5,
};

const MAIZE: CropProfile = CropProfile {
    base_yield: 5.2,
    temperature_c: (18.0, 27.0),
    rainfall_mm: (100.0, 200.0),
    humidity_pct: (65.0, 80.0),
    nitrogen: 150.0,
    phosphorus: 70.0,
    potassium: 70.0,
    soil_ph: 6.0,
};

const COTTON: CropProfile = CropProfile {
    base_yield: 2.1,
    temperature_c: (21.0, 30.0),
    rainfall_mm: (75.0, 150.0),
    humidity_pct: (55.0, 70.0),
    nitrogen: 80.0,
    phosphorus: 40.0,
    potassium: 40.0,
    soil_ph: 6.5,
};

const SUGARCANE: CropProfile = CropProfile {
    base_yield: 70.0,
    temperature_c: (20.0, 30.0),
    rainfall_mm: (150.0, 250.0),
    humidity_pct: (75.0, 85.0),
    nitrogen: 200.0,
    phosphorus: 100.0,
    potassium: 100.0,
    soil_ph: 6.5,
};

// No climate data for these two; they share the fallback ranges.
const SOYBEAN: CropProfile = CropProfile {
    base_yield: 2.8,
    temperature_c: DEFAULT_TEMPERATURE,
    rainfall_mm: DEFAULT_RAINFALL,
    humidity_pct: DEFAULT_HUMIDITY,
    nitrogen: 40.0,
    phosphorus: 60.0,
    potassium: 50.0,
    soil_ph: 6.2,
};

const POTATO: CropProfile = CropProfile {
    base_yield: 25.0,
    temperature_c: DEFAULT_TEMPERATURE,
    rainfall_mm: DEFAULT_RAINFALL,
    humidity_pct: DEFAULT_HUMIDITY,
    nitrogen: 180.0,
    phosphorus: 80.0,
    potassium: 120.0,
    soil_ph: 5.8,
};

pub fn crop_profile(crop: Option<CropType>) -> &'static CropProfile {
    match crop {
        Some(CropType::Rice) => &RICE,
        Some(CropType::Wheat) => &WHEAT,
        Some(CropType::Maize) => &MAIZE,
        Some(CropType::Cotton) => &COTTON,
        Some(CropType::Sugarcane) => &SUGARCANE,
        Some(CropType::Soybean) => &SOYBEAN,
        Some(CropType::Potato) => &POTATO,
        None => &FALLBACK_PROFILE,
    }
}

/// Per-nutrient multipliers applied to fertilizer deficiencies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientAdjustment {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

pub const NEUTRAL_ADJUSTMENT: NutrientAdjustment = NutrientAdjustment {
    nitrogen: 1.0,
    phosphorus: 1.0,
    potassium: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilProfile {
    pub yield_factor: f64,
    pub adjustment: NutrientAdjustment,
}

pub const FALLBACK_SOIL: SoilProfile = SoilProfile {
    yield_factor: 1.0,
    adjustment: NEUTRAL_ADJUSTMENT,
};

pub fn soil_profile(soil: Option<SoilType>) -> SoilProfile {
    match soil {
        // Leaching losses
        Some(SoilType::Sandy) => SoilProfile {
            yield_factor: 0.85,
            adjustment: NutrientAdjustment {
                nitrogen: 1.2,
                phosphorus: 1.0,
                potassium: 1.3,
            },
        },
        Some(SoilType::Loamy) => SoilProfile {
            yield_factor: 1.2,
            adjustment: NEUTRAL_ADJUSTMENT,
        },
        // Holds N and K well, but P is poorly available
        Some(SoilType::Clayey) => SoilProfile {
            yield_factor: 1.0,
            adjustment: NutrientAdjustment {
                nitrogen: 0.9,
                phosphorus: 1.2,
                potassium: 0.8,
            },
        },
        Some(SoilType::Silt) => SoilProfile {
            yield_factor: 1.1,
            adjustment: NutrientAdjustment {
                nitrogen: 1.0,
                phosphorus: 1.1,
                potassium: 1.0,
            },
        },
        Some(SoilType::BlackSoil) => SoilProfile {
            yield_factor: 1.15,
            adjustment: NEUTRAL_ADJUSTMENT,
        },
        Some(SoilType::RedSoil) => SoilProfile {
            yield_factor: 0.95,
            adjustment: NEUTRAL_ADJUSTMENT,
        },
        None => FALLBACK_SOIL,
    }
}

pub fn biofertilizers(crop: Option<CropType>) -> &'static str {
    match crop {
        Some(CropType::Rice) => "Azospirillum, Phosphobacteria, and Blue-green algae",
        Some(CropType::Wheat) | Some(CropType::Cotton) | Some(CropType::Potato) => {
            "Azotobacter and Phosphobacteria"
        }
        Some(CropType::Soybean) => "Rhizobium and Phosphobacteria",
        Some(CropType::Maize) | Some(CropType::Sugarcane) | None => {
            "Azospirillum and Phosphobacteria"
        }
    }
}
