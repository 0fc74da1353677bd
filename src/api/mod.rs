pub mod error;
pub mod handlers;
pub mod requests;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::error::Result;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only when a usable API key is configured
    pub weather: Option<Arc<OpenWeatherMapClient>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let weather = match config.weather() {
            Some(owm) => Some(Arc::new(OpenWeatherMapClient::new(owm.clone())?)),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            weather,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        // Estimation
        .route("/api/predict-yield", post(handlers::predict_yield))
        .route("/yield-prediction", post(handlers::predict_yield))
        .route(
            "/api/fertilizer-recommendation",
            post(handlers::recommend_fertilizer),
        )
        .route(
            "/fertilizer-recommendation",
            post(handlers::recommend_fertilizer),
        )
        .route(
            "/api/predictions/yield",
            post(handlers::predict_yield_from_sensors),
        )
        .route("/api/identify-disease", post(handlers::identify_disease))
        // Weather
        .route("/api/weather", get(handlers::weather_report))
        .route("/api/weather-alerts", get(handlers::weather_alerts))
        // Field data
        .route("/api/environmental-data", get(handlers::environmental_data))
        .route("/api/shops/nearby", get(handlers::nearby_shops))
        // Middleware (applied in reverse order)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
