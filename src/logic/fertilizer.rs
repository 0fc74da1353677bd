use super::calculations::{round2, round_whole};
use super::reference::{self, NutrientAdjustment};
use super::rules::{FieldContext, RulesEngine};
use super::validate_input;
use crate::error::{AgroError, Result};
use crate::models::{
    ChemicalProducts, CostEstimate, CropType, Deficiencies, EstimationInput, FertilizerPlan,
    FertilizerRecommendations, OrganicMatterAnalysis, OrganicMatterStatus, OrganicProducts,
    ScheduleStage, SoilAnalysis, SoilPhAnalysis, SoilType,
};

/// kg of product per kg of nutrient (urea 46% N, DAP 46% P2O5, MOP 60% K2O)
const UREA_PER_N: f64 = 2.17;
const DAP_PER_P: f64 = 2.17;
const MOP_PER_K: f64 = 1.67;

/// pH amendments kick in beyond half a unit from optimal
const PH_TOLERANCE: f64 = 0.5;
const LIME_KG_PER_HA: f64 = 500.0;
const GYPSUM_KG_PER_HA: f64 = 400.0;

const COMPOST_RATIO: f64 = 0.5;
const VERMICOMPOST_RATIO: f64 = 0.3;
const FARMYARD_MANURE_RATIO: f64 = 0.8;

const GREEN_MANURE_BELOW_PCT: f64 = 2.0;

/// USD per kg
mod price {
    pub const UREA: f64 = 0.30;
    pub const DAP: f64 = 0.40;
    pub const MOP: f64 = 0.35;
    pub const LIME: f64 = 0.10;
    pub const GYPSUM: f64 = 0.12;
    /// USD per organic unit
    pub const COMPOST: f64 = 25.0;
    pub const VERMICOMPOST: f64 = 40.0;
    pub const FARMYARD_MANURE: f64 = 15.0;
}

/// Build a fertilizer plan for a field.
///
/// Deficiencies are measured against the crop's targets, scaled by the soil's
/// nutrient adjustment and converted to product quantities for the whole
/// area. Organic equivalents use the unadjusted deficiency total.
pub fn estimate_fertilizer(input: &EstimationInput) -> Result<FertilizerPlan> {
    validate_input(input)?;

    let crop = CropType::from_str(&input.crop_type);
    let soil = SoilType::from_str(&input.soil_type);
    let profile = reference::crop_profile(crop);
    let adjustment = reference::soil_profile(soil).adjustment;

    let deficiencies = Deficiencies {
        nitrogen: (profile.nitrogen - input.nitrogen).max(0.0),
        phosphorus: (profile.phosphorus - input.phosphorus).max(0.0),
        potassium: (profile.potassium - input.potassium).max(0.0),
    };

    // Without a pH reading there is nothing to correct
    let ph_adjustment = input.soil_ph.map_or(0.0, |ph| profile.soil_ph - ph);

    let chemical = chemical_products(
        &deficiencies,
        &adjustment,
        ph_adjustment,
        input.area_hectares,
    )?;
    let organic = organic_products(&deficiencies, input, crop)?;
    let cost_estimation = estimate_cost(&chemical, &organic);
    let schedule = application_schedule(crop, &chemical);

    tracing::debug!(
        crop = %input.crop_type,
        urea = chemical.urea,
        dap = chemical.dap,
        mop = chemical.mop,
        chemical_cost = cost_estimation.chemical,
        "Fertilizer plan computed"
    );

    let ctx = FieldContext {
        input,
        profile,
        soil,
    };

    Ok(FertilizerPlan {
        analysis: SoilAnalysis {
            deficiencies,
            soil_ph: SoilPhAnalysis {
                current: input.soil_ph,
                optimal: profile.soil_ph,
                adjustment: round2(ph_adjustment),
            },
            organic_matter: OrganicMatterAnalysis {
                current: input.organic_matter_pct,
                status: OrganicMatterStatus::from_percent(input.organic_matter_pct),
            },
        },
        recommendations: FertilizerRecommendations {
            chemical,
            organic,
            schedule,
            cost_estimation,
        },
        tips: RulesEngine::fertilizer_tips().evaluate(&ctx),
    })
}

fn chemical_products(
    deficiencies: &Deficiencies,
    adjustment: &NutrientAdjustment,
    ph_adjustment: f64,
    area: f64,
) -> Result<ChemicalProducts> {
    Ok(ChemicalProducts {
        urea: quantity(deficiencies.nitrogen * adjustment.nitrogen * UREA_PER_N * area, "Urea")?,
        dap: quantity(deficiencies.phosphorus * adjustment.phosphorus * DAP_PER_P * area, "DAP")?,
        mop: quantity(deficiencies.potassium * adjustment.potassium * MOP_PER_K * area, "MOP")?,
        lime: if ph_adjustment > PH_TOLERANCE {
            quantity(LIME_KG_PER_HA * area, "Lime")?
        } else {
            0
        },
        gypsum: if ph_adjustment < -PH_TOLERANCE {
            quantity(GYPSUM_KG_PER_HA * area, "Gypsum")?
        } else {
            0
        },
    })
}

fn organic_products(
    deficiencies: &Deficiencies,
    input: &EstimationInput,
    crop: Option<CropType>,
) -> Result<OrganicProducts> {
    let base = deficiencies.total() * input.area_hectares;
    Ok(OrganicProducts {
        compost: quantity(base * COMPOST_RATIO, "Compost")?,
        vermicompost: quantity(base * VERMICOMPOST_RATIO, "Vermicompost")?,
        farmyard_manure: quantity(base * FARMYARD_MANURE_RATIO, "Farmyard manure")?,
        green_manure_recommended: input
            .organic_matter_pct
            .is_some_and(|om| om < GREEN_MANURE_BELOW_PCT),
        biofertilizers: reference::biofertilizers(crop).to_string(),
    })
}

/// Whole kg of product; anything past `u64` is an input error, not a saturated amount
fn quantity(kg: f64, product: &str) -> Result<u64> {
    // 2^64 is exactly representable, u64::MAX is not
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if kg.is_finite() && kg.round() < LIMIT {
        Ok(round_whole(kg))
    } else {
        Err(AgroError::InvalidInput(format!(
            "{} quantity is out of range; check the area and nutrient levels",
            product
        )))
    }
}

pub fn estimate_cost(chemical: &ChemicalProducts, organic: &OrganicProducts) -> CostEstimate {
    let chemical_cost = chemical.urea as f64 * price::UREA
        + chemical.dap as f64 * price::DAP
        + chemical.mop as f64 * price::MOP
        + chemical.lime as f64 * price::LIME
        + chemical.gypsum as f64 * price::GYPSUM;
    let organic_cost = organic.compost as f64 * price::COMPOST
        + organic.vermicompost as f64 * price::VERMICOMPOST
        + organic.farmyard_manure as f64 * price::FARMYARD_MANURE;

    CostEstimate {
        chemical: round2(chemical_cost),
        organic: round2(organic_cost),
    }
}

/// Share of a product total, rounded to whole kg
fn share(total: u64, fraction: f64) -> u64 {
    round_whole(total as f64 * fraction)
}

/// Staged application plan for the computed product totals
pub fn application_schedule(crop: Option<CropType>, chemical: &ChemicalProducts) -> Vec<ScheduleStage> {
    let ChemicalProducts { urea, dap, mop, .. } = *chemical;

    match crop {
        Some(CropType::Rice) => vec![
            ScheduleStage::new(
                "Pre-planting",
                format!("{} kg DAP, {} kg MOP", dap, share(mop, 0.5)),
            ),
            ScheduleStage::new("Tillering (21 days)", format!("{} kg Urea", share(urea, 0.5))),
            ScheduleStage::new(
                "Panicle initiation (45 days)",
                format!("{} kg Urea, {} kg MOP", share(urea, 0.5), share(mop, 0.5)),
            ),
        ],
        Some(CropType::Wheat) => vec![
            ScheduleStage::new("Sowing", format!("{} kg DAP, {} kg MOP", dap, mop)),
            ScheduleStage::new(
                "Crown root initiation (21 days)",
                format!("{} kg Urea", share(urea, 0.5)),
            ),
            ScheduleStage::new(
                "Jointing stage (45 days)",
                format!("{} kg Urea", share(urea, 0.5)),
            ),
        ],
        Some(CropType::Maize) => vec![
            ScheduleStage::new(
                "Sowing",
                format!("{} kg DAP, {} kg MOP", share(dap, 0.5), mop),
            ),
            ScheduleStage::new(
                "Knee-high stage (30 days)",
                format!("{} kg Urea, {} kg DAP", share(urea, 0.5), share(dap, 0.5)),
            ),
            ScheduleStage::new("Tasseling (60 days)", format!("{} kg Urea", share(urea, 0.5))),
        ],
        _ => vec![
            ScheduleStage::new(
                "Pre-planting",
                format!(
                    "50% of P and K, 20% of N ({} kg DAP, {} kg MOP, {} kg Urea)",
                    share(dap, 0.5),
                    share(mop, 0.5),
                    share(urea, 0.2)
                ),
            ),
            ScheduleStage::new(
                "Vegetative growth",
                format!("40% of N ({} kg Urea)", share(urea, 0.4)),
            ),
            ScheduleStage::new(
                "Reproductive stage",
                format!(
                    "40% of N, 50% of P and K ({} kg Urea, {} kg DAP, {} kg MOP)",
                    share(urea, 0.4),
                    share(dap, 0.5),
                    share(mop, 0.5)
                ),
            ),
        ],
    }
}
