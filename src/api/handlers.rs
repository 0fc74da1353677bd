use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;

use super::error::ApiError;
use super::requests::{DiseaseRequest, FertilizerRequest, SensorYieldRequest, YieldRequest};
use super::AppState;
use crate::logic::{self, shops::DEFAULT_RADIUS_KM, weather};
use crate::models::{
    AlertReport, DiseaseIdentification, EnvironmentalSnapshot, FertilizerPlan, GeoPoint,
    SensorYieldEstimate, WeatherReport, YieldEstimate,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

const COORDINATES_REQUIRED: &str = "Coordinates required";

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

pub async fn predict_yield(
    payload: Result<Json<YieldRequest>, JsonRejection>,
) -> ApiResult<YieldEstimate> {
    let Json(request) = payload?;
    let input = request.into_input()?;
    Ok(Json(logic::estimate_yield(&input)?))
}

pub async fn recommend_fertilizer(
    payload: Result<Json<FertilizerRequest>, JsonRejection>,
) -> ApiResult<FertilizerPlan> {
    let Json(request) = payload?;
    let input = request.into_input()?;
    Ok(Json(logic::estimate_fertilizer(&input)?))
}

pub async fn predict_yield_from_sensors(
    payload: Result<Json<SensorYieldRequest>, JsonRejection>,
) -> ApiResult<SensorYieldEstimate> {
    let Json(request) = payload?;
    let (input, method, sensor) = request.into_parts()?;
    Ok(Json(logic::estimate_sensor_yield(&input, method, sensor)?))
}

pub async fn identify_disease(
    payload: Result<Json<DiseaseRequest>, JsonRejection>,
) -> ApiResult<DiseaseIdentification> {
    let Json(request) = payload?;
    let crop_type = request
        .crop_type()
        .ok_or_else(|| ApiError::BadRequest("Crop type is required".into()))?;

    let mut rng = rand::thread_rng();
    Ok(Json(logic::identify_disease(
        crop_type,
        request.image.as_ref(),
        &mut rng,
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl WeatherQuery {
    fn location_or(&self, fallback: GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: self.lat.unwrap_or(fallback.lat),
            lng: self.lon.unwrap_or(fallback.lng),
        }
    }
}

/// Current conditions, daily forecast and farming advisories.
/// Falls back to sample data whenever the weather service can't answer.
pub async fn weather_report(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> ApiResult<WeatherReport> {
    let Query(query) = query?;
    let now = Utc::now();

    let Some(client) = state.weather.as_deref() else {
        tracing::info!("Weather API key not configured, using sample data");
        return Ok(Json(weather::mock_report(now)));
    };
    let at = query.location_or(client.default_location());

    let current = match client.fetch_current(at).await {
        Ok(current) => current,
        Err(e) => {
            tracing::warn!("Current weather unavailable, using sample data: {}", e);
            return Ok(Json(weather::mock_report(now)));
        }
    };

    let forecast = match client.fetch_forecast(at).await {
        Ok(periods) => Some(periods),
        Err(e) => {
            tracing::warn!("Forecast unavailable, using sample forecast: {}", e);
            None
        }
    };

    Ok(Json(weather::build_report(&current, forecast.as_deref(), now)))
}

pub async fn weather_alerts(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> ApiResult<AlertReport> {
    let Query(query) = query?;
    let now = Utc::now();

    let Some(client) = state.weather.as_deref() else {
        tracing::info!("Weather API key not configured, using sample alerts");
        return Ok(Json(weather::mock_alerts(now)));
    };
    let at = query.location_or(client.default_location());

    let (current, forecast) = tokio::join!(client.fetch_current(at), client.fetch_forecast(at));
    match (current, forecast) {
        (Ok(current), Ok(forecast)) => {
            let report = weather::alert_report(&current, &forecast, now);
            for alert in &report.alerts {
                tracing::debug!(category = alert.category.as_str(), id = %alert.id, "Alert raised");
            }
            Ok(Json(report))
        }
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Weather service error, using sample alerts: {}", e);
            Ok(Json(weather::mock_alerts(now)))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
}

pub async fn environmental_data(
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> ApiResult<EnvironmentalSnapshot> {
    let Query(query) = query?;
    let (Some(lat), Some(lng)) = (query.lat, query.lng) else {
        return Err(ApiError::BadRequest(COORDINATES_REQUIRED.into()));
    };

    let mut rng = rand::thread_rng();
    Ok(Json(logic::sample_conditions(GeoPoint { lat, lng }, &mut rng)))
}

/// Verified shops near a point. Zero coordinates are treated as missing.
pub async fn nearby_shops(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let lat = query.lat.unwrap_or_default();
    let lng = query.lng.unwrap_or_default();
    if lat == 0.0 || lng == 0.0 {
        return Err(ApiError::BadRequest(COORDINATES_REQUIRED.into()));
    }

    let radius = query.radius.unwrap_or(DEFAULT_RADIUS_KM);
    let shops = logic::nearby_shops(&state.config.shops, GeoPoint { lat, lng }, radius);
    tracing::debug!("{} shops within {} km", shops.len(), radius);

    Ok(Json(serde_json::json!({ "shops": shops })))
}
