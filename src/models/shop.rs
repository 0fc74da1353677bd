use super::environmental::GeoPoint;
use serde::{Deserialize, Serialize};

/// Agricultural input supplier listed in the shop directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub location: GeoPoint,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyShop {
    #[serde(flatten)]
    pub shop: Shop,
    /// Great-circle distance in km
    pub distance: f64,
}
