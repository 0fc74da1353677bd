use crate::config::OpenWeatherMapConfig;
use crate::error::{AgroError, Result};
use crate::models::{CurrentConditions, ForecastPeriod, GeoPoint, WeatherCondition};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Coordinates used when a request carries none
    pub fn default_location(&self) -> GeoPoint {
        GeoPoint {
            lat: self.config.default_latitude,
            lng: self.config.default_longitude,
        }
    }

    /// Fetch observed conditions at a location
    pub async fn fetch_current(&self, at: GeoPoint) -> Result<CurrentConditions> {
        let response: OwmCurrentResponse = self.get("weather", at).await?;
        Ok(convert_current(response))
    }

    /// Fetch the 5-day/3-hour forecast for a location
    pub async fn fetch_forecast(&self, at: GeoPoint) -> Result<Vec<ForecastPeriod>> {
        let response: OwmForecastResponse = self.get("forecast", at).await?;
        Ok(response.list.iter().map(convert_forecast_item).collect())
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .request("weather", self.default_location())
            .send()
            .await
            .map_err(unavailable)?;

        Ok(response.status().is_success())
    }

    /// The key travels as a query parameter, so transport errors must be
    /// stripped of their URL before they are reported.
    fn request(&self, endpoint: &str, at: GeoPoint) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/{}", self.config.base_url, endpoint))
            .query(&[
                ("lat", at.lat.to_string()),
                ("lon", at.lng.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ])
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, at: GeoPoint) -> Result<T> {
        let response = self
            .request(endpoint, at)
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgroError::DataSourceUnavailable(format!(
                "OpenWeatherMap {} returned {}: {}",
                endpoint, status, body
            )));
        }

        response.json().await.map_err(|e| {
            AgroError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap {} response: {}",
                endpoint,
                e.without_url()
            ))
        })
    }
}

fn unavailable(err: reqwest::Error) -> AgroError {
    AgroError::DataSourceUnavailable(format!("OpenWeatherMap: {}", err.without_url()))
}

fn convert_current(response: OwmCurrentResponse) -> CurrentConditions {
    let weather = response.weather.into_iter().next();
    let (condition, description, icon) = weather
        .map(|w| (w.main, w.description, w.icon))
        .unwrap_or_default();

    CurrentConditions {
        location: response.name,
        temperature_c: response.main.temp,
        humidity_pct: response.main.humidity,
        wind_speed_ms: response.wind.speed,
        condition,
        description,
        icon,
    }
}

fn convert_forecast_item(item: &OwmForecastItem) -> ForecastPeriod {
    let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);
    let first = item.weather.first();

    ForecastPeriod {
        timestamp,
        temperature_c: item.main.temp,
        humidity_pct: item.main.humidity,
        wind_speed_ms: item.wind.speed,
        rain_3h_mm: item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0),
        weather: first
            .map(|w| WeatherCondition::from_owm_id(w.id))
            .unwrap_or_default(),
        condition: first.map(|w| w.main.clone()).unwrap_or_default(),
        description: first.map(|w| w.description.clone()).unwrap_or_default(),
        icon: first.map(|w| w.icon.clone()).unwrap_or_default(),
    }
}
