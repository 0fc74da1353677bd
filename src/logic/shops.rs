use super::calculations::distance_km;
use crate::models::{GeoPoint, NearbyShop, Shop};

pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Verified shops within `radius_km` of `origin`, nearest first
pub fn nearby_shops(shops: &[Shop], origin: GeoPoint, radius_km: f64) -> Vec<NearbyShop> {
    let mut nearby: Vec<NearbyShop> = shops
        .iter()
        .filter(|shop| shop.verified)
        .map(|shop| NearbyShop {
            distance: distance_km(origin.lat, origin.lng, shop.location.lat, shop.location.lng),
            shop: shop.clone(),
        })
        .filter(|s| s.distance <= radius_km)
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}
