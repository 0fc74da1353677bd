//! Simulated disease identification.
//!
//! There is no image model behind this: a disease is drawn from a small
//! per-crop catalogue and the confidence is randomized. All randomness comes
//! from the caller's `Rng` so results can be reproduced with a seeded RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    CropType, DiseaseIdentification, DiseaseProfile, DiseaseSeverity, ImageAnalysis,
    ImageMetadata, ImageQuality,
};

static RICE_DISEASES: [DiseaseProfile; 2] = [
    DiseaseProfile {
        name: "Rice Blast",
        scientific_name: "Magnaporthe oryzae",
        symptoms: "Diamond-shaped lesions with gray centers and brown borders on leaves. Lesions may also appear on stems and panicles.",
        cause: "Fungal infection caused by Magnaporthe oryzae",
        severity: DiseaseSeverity::High,
        treatment: &[
            "Apply fungicides like Tricyclazole (0.6 g/L) or Isoprothiolane (1.5 ml/L)",
            "Use resistant varieties like Pusa Basmati 1121",
            "Remove and destroy infected plant debris",
            "Ensure proper field drainage",
        ],
        prevention: &[
            "Use certified disease-free seeds",
            "Maintain balanced fertilization (avoid excess nitrogen)",
            "Ensure proper plant spacing for air circulation",
            "Practice crop rotation with non-host crops",
        ],
        organic_treatment: &[
            "Apply neem oil (3-5 ml/L) spray",
            "Use Trichoderma viride as biological control",
            "Apply wood ash around plants",
        ],
    },
    DiseaseProfile {
        name: "Bacterial Leaf Blight",
        scientific_name: "Xanthomonas oryzae pv. oryzae",
        symptoms: "Water-soaked lesions that turn yellow to white. Lesions have wavy margins and may extend to leaf tips.",
        cause: "Bacterial infection spread through water and wind",
        severity: DiseaseSeverity::Medium,
        treatment: &[
            "Apply copper-based bactericides like Copper oxychloride (3 g/L)",
            "Use antibiotics like Streptomycin (0.5 g/L) if permitted",
            "Remove infected plants immediately",
        ],
        prevention: &[
            "Use resistant varieties",
            "Avoid overhead irrigation",
            "Maintain field hygiene",
            "Use balanced fertilization",
        ],
        organic_treatment: &[
            "Apply copper sulfate solution (2 g/L)",
            "Use garlic extract spray",
            "Apply compost tea regularly",
        ],
    },
];

static WHEAT_DISEASES: [DiseaseProfile; 1] = [DiseaseProfile {
    name: "Wheat Rust (Yellow Rust)",
    scientific_name: "Puccinia striiformis",
    symptoms: "Yellow to orange pustules arranged in stripes on leaves. Severely infected leaves may dry up.",
    cause: "Fungal infection favored by cool, moist conditions",
    severity: DiseaseSeverity::High,
    treatment: &[
        "Apply fungicides like Tebuconazole (1 ml/L) or Propiconazole (1 ml/L)",
        "Use systemic fungicides for better control",
        "Apply at first sign of infection",
    ],
    prevention: &[
        "Use resistant wheat varieties",
        "Practice early planting",
        "Ensure proper crop rotation",
        "Remove volunteer wheat plants",
    ],
    organic_treatment: &[
        "Apply sulfur dust (20-25 kg/ha)",
        "Use baking soda spray (5 g/L)",
        "Apply neem oil regularly",
    ],
}];

static MAIZE_DISEASES: [DiseaseProfile; 1] = [DiseaseProfile {
    name: "Northern Corn Leaf Blight",
    scientific_name: "Exserohilum turcicum",
    symptoms: "Long, elliptical, grayish-green or tan lesions on leaves. Lesions may have dark borders.",
    cause: "Fungal infection favored by warm, humid conditions",
    severity: DiseaseSeverity::Medium,
    treatment: &[
        "Apply fungicides like Azoxystrobin (1 ml/L) or Pyraclostrobin (1.5 ml/L)",
        "Use preventive sprays during favorable weather",
        "Ensure good field drainage",
    ],
    prevention: &[
        "Use resistant maize hybrids",
        "Practice crop rotation with non-host crops",
        "Manage crop residue properly",
        "Maintain proper plant spacing",
    ],
    organic_treatment: &[
        "Apply compost tea spray",
        "Use Trichoderma-based biocontrol agents",
        "Apply neem cake to soil",
    ],
}];

static COTTON_DISEASES: [DiseaseProfile; 1] = [DiseaseProfile {
    name: "Cotton Bollworm",
    scientific_name: "Helicoverpa armigera",
    symptoms: "Holes in bolls, damaged flowers and buds. Presence of caterpillars and their excreta.",
    cause: "Insect pest that feeds on cotton bolls and flowers",
    severity: DiseaseSeverity::High,
    treatment: &[
        "Apply insecticides like Chlorpyrifos (2 ml/L) or Cypermethrin (1 ml/L)",
        "Use pheromone traps for monitoring",
        "Apply at economic threshold levels",
    ],
    prevention: &[
        "Use Bt cotton varieties",
        "Practice intercropping with trap crops",
        "Maintain field hygiene",
        "Monitor regularly with pheromone traps",
    ],
    organic_treatment: &[
        "Apply neem-based insecticides (5 ml/L)",
        "Use Bacillus thuringiensis spray",
        "Release natural enemies like Trichogramma",
    ],
}];

const NEXT_STEPS: [&str; 4] = [
    "Monitor the affected area daily",
    "Take preventive measures in surrounding healthy plants",
    "Consult with local agricultural extension officer if symptoms persist",
    "Keep records of treatment applications and their effectiveness",
];

/// Catalogue entries for a crop; crops without entries share rice's
pub fn diseases_for(crop: Option<CropType>) -> &'static [DiseaseProfile] {
    match crop {
        Some(CropType::Wheat) => &WHEAT_DISEASES,
        Some(CropType::Maize) => &MAIZE_DISEASES,
        Some(CropType::Cotton) => &COTTON_DISEASES,
        _ => &RICE_DISEASES,
    }
}

/// Pick a likely disease for the crop and attach follow-up advice.
///
/// A supplied photo raises the confidence band from 70..=84 to 80..=99.
pub fn identify_disease<R: Rng + ?Sized>(
    crop_type: &str,
    image: Option<&ImageMetadata>,
    rng: &mut R,
) -> DiseaseIdentification {
    let crop = CropType::from_str(crop_type);
    let candidates = diseases_for(crop);
    let disease = candidates.choose(&mut *rng).unwrap_or(&RICE_DISEASES[0]);

    let confidence = if image.is_some() {
        rng.gen_range(80..=99u32)
    } else {
        rng.gen_range(70..=84u32)
    };

    tracing::debug!(crop = crop_type, disease = disease.name, confidence, "Disease selected");

    DiseaseIdentification {
        disease,
        confidence,
        additional_recommendations: follow_up_advice(disease, crop),
        image_analysis: image.map(|meta| ImageAnalysis {
            size: meta.size,
            content_type: meta.content_type.clone(),
            quality: ImageQuality::from_confidence(confidence),
        }),
        next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}

fn follow_up_advice(disease: &DiseaseProfile, crop: Option<CropType>) -> Vec<String> {
    let mut advice = Vec::new();

    if disease.severity == DiseaseSeverity::High {
        advice.push("Immediate action required - disease can cause significant yield loss");
        advice.push("Consider emergency treatment measures");
    }

    advice.push("Monitor weather conditions as they affect disease development");
    advice.push("Maintain detailed records of disease occurrence and treatment");
    advice.push("Consider soil health improvement for better plant resistance");

    if crop == Some(CropType::Rice) && disease.name.contains("Blast") {
        advice.push("Reduce nitrogen fertilizer application temporarily");
        advice.push("Improve field drainage to reduce humidity");
    }

    advice.into_iter().map(String::from).collect()
}
