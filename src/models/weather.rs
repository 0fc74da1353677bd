use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories from OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            600..=622 => WeatherCondition::Snow,
            701 => WeatherCondition::Mist,
            741 => WeatherCondition::Fog,
            800 => WeatherCondition::Clear,
            801..=804 => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }
}

/// Observed conditions at a location, metric units
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// A single 3-hour forecast period, metric units
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_ms: f64,
    pub rain_3h_mm: f64,
    pub weather: WeatherCondition,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: i64,
    pub humidity: f64,
    /// km/h
    pub wind_speed: i64,
    pub condition: String,
    pub description: String,
    pub location: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Unix seconds
    pub date: i64,
    pub temp: i64,
    pub condition: String,
    pub description: String,
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AdvisoryKind,
    pub icon: String,
}

impl Advisory {
    pub fn new(title: &str, description: impl Into<String>, kind: AdvisoryKind, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            kind,
            icon: icon.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyForecast>,
    pub advisories: Vec<Advisory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Watch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Temperature,
    Frost,
    Wind,
    Precipitation,
    Storm,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Temperature => "temperature",
            AlertCategory::Frost => "frost",
            AlertCategory::Wind => "wind",
            AlertCategory::Precipitation => "precipitation",
            AlertCategory::Storm => "storm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Moderate,
    Severe,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub category: AlertCategory,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub recommendations: Vec<String>,
    pub is_active: bool,
    pub is_dismissed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReport {
    pub alerts: Vec<WeatherAlert>,
    pub location: String,
    pub last_updated: DateTime<Utc>,
}
