//! Farming advisories and severe-weather alerts derived from observed
//! conditions and the 3-hour forecast.
//!
//! Everything here is pure: the caller passes in `now` and the upstream
//! data (or nothing, to get the sample data served when the weather
//! service is unavailable).

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{
    Advisory, AdvisoryKind, AlertCategory, AlertKind, AlertReport, AlertSeverity,
    CurrentConditions, CurrentWeather, DailyForecast, ForecastPeriod, WeatherAlert,
    WeatherCondition, WeatherReport,
};

const MS_TO_KMH: f64 = 3.6;
const FORECAST_DAYS: usize = 5;
const SAMPLE_LOCATION: &str = "Sample Location";

// Advisory thresholds
const HOT_ADVISORY_C: f64 = 35.0;
const FROST_ADVISORY_C: f64 = 5.0;
const RAIN_DAYS_ADVISORY: usize = 2;
const WINDY_ADVISORY_MS: f64 = 10.0;
const HUMID_ADVISORY_PCT: f64 = 80.0;

// Alert thresholds
const EXTREME_HEAT_C: f64 = 40.0;
const HIGH_HEAT_C: f64 = 35.0;
const FROST_ALERT_C: f64 = 2.0;
const STRONG_WIND_MS: f64 = 15.0;
const SEVERE_WIND_MS: f64 = 20.0;
const HEAVY_RAIN_3H_MM: f64 = 10.0;
const SEVERE_RAIN_TOTAL_MM: f64 = 50.0;

/// Wire form of the observed conditions (whole °C, wind in km/h)
pub fn current_weather(current: &CurrentConditions) -> CurrentWeather {
    CurrentWeather {
        temperature: current.temperature_c.round() as i64,
        humidity: current.humidity_pct,
        wind_speed: (current.wind_speed_ms * MS_TO_KMH).round() as i64,
        condition: current.condition.clone(),
        description: current.description.clone(),
        location: current.location.clone(),
        icon: current.icon.clone(),
    }
}

/// First forecast period of each calendar day (UTC), at most five days
pub fn daily_forecasts(periods: &[ForecastPeriod]) -> Vec<DailyForecast> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    periods
        .iter()
        .filter(|p| seen.insert(p.timestamp.date_naive()))
        .take(FORECAST_DAYS)
        .map(|p| DailyForecast {
            date: p.timestamp.timestamp(),
            temp: p.temperature_c.round() as i64,
            condition: p.condition.clone(),
            description: p.description.clone(),
            humidity: p.humidity_pct,
            wind_speed: p.wind_speed_ms,
            icon: p.icon.clone(),
        })
        .collect()
}

/// Build the weather report.
///
/// A missing forecast (the forecast call failed but current conditions
/// arrived) is filled with the sample forecast.
pub fn build_report(
    current: &CurrentConditions,
    forecast: Option<&[ForecastPeriod]>,
    now: DateTime<Utc>,
) -> WeatherReport {
    let forecast = match forecast {
        Some(periods) => daily_forecasts(periods),
        None => mock_forecast(now),
    };
    WeatherReport {
        current: current_weather(current),
        advisories: advisories(current, &forecast),
        forecast,
    }
}

/// Farming advisories for the conditions; never empty
pub fn advisories(current: &CurrentConditions, forecast: &[DailyForecast]) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if current.temperature_c > HOT_ADVISORY_C {
        advisories.push(Advisory::new(
            "High Temperature Alert",
            "Extremely high temperatures detected. Ensure adequate irrigation and consider shade protection for sensitive crops.",
            AdvisoryKind::Warning,
            "sun",
        ));
    } else if current.temperature_c < FROST_ADVISORY_C {
        advisories.push(Advisory::new(
            "Frost Warning",
            "Low temperatures may cause frost. Protect sensitive crops and consider covering plants.",
            AdvisoryKind::Warning,
            "snowflake",
        ));
    }

    let rain_days = forecast
        .iter()
        .filter(|day| {
            let condition = day.condition.to_lowercase();
            condition.contains("rain") || condition.contains("storm")
        })
        .count();
    if rain_days >= RAIN_DAYS_ADVISORY {
        advisories.push(Advisory::new(
            "Rainfall Alert",
            format!(
                "Rain expected for {} days. Consider postponing spraying operations and ensure proper drainage.",
                rain_days
            ),
            AdvisoryKind::Info,
            "cloud-rain",
        ));
    }

    if current.wind_speed_ms > WINDY_ADVISORY_MS {
        advisories.push(Advisory::new(
            "Strong Wind Advisory",
            "Strong winds detected. Secure structures and avoid aerial spraying operations.",
            AdvisoryKind::Warning,
            "wind",
        ));
    }

    if current.humidity_pct > HUMID_ADVISORY_PCT {
        advisories.push(Advisory::new(
            "High Humidity Alert",
            "High humidity levels may promote fungal diseases. Monitor crops closely and ensure good air circulation.",
            AdvisoryKind::Info,
            "droplets",
        ));
    }

    if advisories.is_empty() {
        advisories.push(Advisory::new(
            "Optimal Conditions",
            "Weather conditions are favorable for most farming activities. Good time for field work and crop monitoring.",
            AdvisoryKind::Info,
            "sun",
        ));
    }

    advisories
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Severe-weather alerts, in order: heat, frost, wind, heavy rain, storms
pub fn weather_alerts(
    current: &CurrentConditions,
    forecast: &[ForecastPeriod],
    now: DateTime<Utc>,
) -> Vec<WeatherAlert> {
    let stamp = now.timestamp_millis();
    let temp = current.temperature_c;
    let alert = |id: &str,
                 category: AlertCategory,
                 title: &str,
                 description: String,
                 severity: AlertSeverity,
                 window: (DateTime<Utc>, DateTime<Utc>),
                 recommendations: &[&str]| WeatherAlert {
        id: format!("{}-{}", id, stamp),
        kind: AlertKind::Warning,
        category,
        title: title.to_string(),
        description,
        severity,
        start_time: window.0,
        end_time: window.1,
        location: current.location.clone(),
        recommendations: strings(recommendations),
        is_active: true,
        is_dismissed: false,
    };

    let mut alerts = Vec::new();

    if temp > EXTREME_HEAT_C {
        alerts.push(alert(
            "temp-extreme",
            AlertCategory::Temperature,
            "Extreme Heat Warning",
            format!(
                "Dangerous heat conditions with temperatures reaching {}°C. Immediate action required to protect crops and livestock.",
                temp.round()
            ),
            AlertSeverity::Extreme,
            (now, now + Duration::hours(12)),
            &[
                "Increase irrigation immediately",
                "Provide emergency shade for crops",
                "Monitor livestock closely for heat stress",
                "Avoid all non-essential field work",
                "Ensure adequate water supply",
            ],
        ));
    } else if temp > HIGH_HEAT_C {
        alerts.push(alert(
            "temp-high",
            AlertCategory::Temperature,
            "High Temperature Alert",
            format!(
                "High temperatures of {}°C detected. Take precautions to protect crops.",
                temp.round()
            ),
            AlertSeverity::Severe,
            (now, now + Duration::hours(8)),
            &[
                "Increase irrigation frequency",
                "Provide shade for sensitive crops",
                "Monitor crop stress levels",
                "Avoid spraying during peak heat",
            ],
        ));
    }

    if temp < FROST_ALERT_C {
        alerts.push(alert(
            "frost-warning",
            AlertCategory::Frost,
            "Frost Warning",
            format!(
                "Freezing temperatures of {}°C. Frost damage likely for sensitive crops.",
                temp.round()
            ),
            AlertSeverity::Severe,
            (now, now + Duration::hours(6)),
            &[
                "Cover sensitive plants immediately",
                "Use frost protection methods",
                "Harvest ready crops if possible",
                "Check irrigation systems for freezing",
            ],
        ));
    }

    let wind = current.wind_speed_ms;
    if wind > STRONG_WIND_MS {
        alerts.push(alert(
            "wind-strong",
            AlertCategory::Wind,
            "Strong Wind Warning",
            format!(
                "Strong winds of {} km/h detected. Structural damage possible.",
                (wind * MS_TO_KMH).round()
            ),
            if wind > SEVERE_WIND_MS {
                AlertSeverity::Severe
            } else {
                AlertSeverity::Moderate
            },
            (now, now + Duration::hours(6)),
            &[
                "Secure all loose structures",
                "Avoid aerial spraying operations",
                "Check greenhouse anchoring",
                "Monitor young plants for damage",
            ],
        ));
    }

    let heavy_rain: Vec<&ForecastPeriod> = forecast
        .iter()
        .filter(|p| p.rain_3h_mm > HEAVY_RAIN_3H_MM)
        .collect();
    if let Some(last) = heavy_rain.last() {
        let total: f64 = heavy_rain.iter().map(|p| p.rain_3h_mm).sum();
        alerts.push(alert(
            "rain-heavy",
            AlertCategory::Precipitation,
            "Heavy Rainfall Warning",
            format!(
                "Heavy rainfall expected with total amounts of {}mm over the next 24 hours.",
                total.round()
            ),
            if total > SEVERE_RAIN_TOTAL_MM {
                AlertSeverity::Severe
            } else {
                AlertSeverity::Moderate
            },
            (now, last.timestamp),
            &[
                "Ensure proper field drainage",
                "Postpone spraying operations",
                "Secure equipment and materials",
                "Monitor for flooding in low areas",
            ],
        ));
    }

    let mut storms = forecast
        .iter()
        .filter(|p| p.weather == WeatherCondition::Thunderstorm);
    if let Some(first) = storms.next() {
        let last = storms.last().unwrap_or(first);
        alerts.push(alert(
            "storm-warning",
            AlertCategory::Storm,
            "Thunderstorm Warning",
            "Thunderstorms expected in your area. Lightning and hail possible.".to_string(),
            AlertSeverity::Severe,
            (first.timestamp, last.timestamp),
            &[
                "Seek shelter immediately when storms approach",
                "Secure all outdoor equipment",
                "Avoid working in open fields",
                "Protect crops from potential hail damage",
            ],
        ));
    }

    alerts
}

pub fn alert_report(
    current: &CurrentConditions,
    forecast: &[ForecastPeriod],
    now: DateTime<Utc>,
) -> AlertReport {
    AlertReport {
        alerts: weather_alerts(current, forecast, now),
        location: current.location.clone(),
        last_updated: now,
    }
}

/// Sample conditions served when the weather service is unavailable
pub fn mock_report(now: DateTime<Utc>) -> WeatherReport {
    WeatherReport {
        current: CurrentWeather {
            temperature: 28,
            humidity: 65.0,
            wind_speed: 12,
            condition: "Partly Cloudy".into(),
            description: "partly cloudy".into(),
            location: SAMPLE_LOCATION.into(),
            icon: "02d".into(),
        },
        forecast: mock_forecast(now),
        advisories: vec![Advisory::new(
            "Sample Advisory",
            "This is sample weather data. Configure OPENWEATHERMAP_API_KEY for real data.",
            AdvisoryKind::Info,
            "sun",
        )],
    }
}

pub fn mock_forecast(now: DateTime<Utc>) -> Vec<DailyForecast> {
    const DAYS: [(i64, &str, &str, f64, f64, &str); 5] = [
        (28, "Partly Cloudy", "partly cloudy", 65.0, 3.3, "02d"),
        (30, "Sunny", "clear sky", 60.0, 2.5, "01d"),
        (27, "Rain", "light rain", 80.0, 4.2, "10d"),
        (26, "Rain", "moderate rain", 85.0, 5.1, "10d"),
        (29, "Partly Cloudy", "few clouds", 70.0, 3.8, "02d"),
    ];

    let start = now.timestamp();
    DAYS.iter()
        .zip(0i64..)
        .map(
            |(&(temp, condition, description, humidity, wind_speed, icon), day)| DailyForecast {
                date: start + day * 86_400,
                temp,
                condition: condition.into(),
                description: description.into(),
                humidity,
                wind_speed,
                icon: icon.into(),
            },
        )
        .collect()
}

/// Sample alerts served when the weather service is unavailable
pub fn mock_alerts(now: DateTime<Utc>) -> AlertReport {
    AlertReport {
        alerts: vec![
            WeatherAlert {
                id: "mock-1".into(),
                kind: AlertKind::Warning,
                category: AlertCategory::Precipitation,
                title: "Heavy Rainfall Warning".into(),
                description: "Heavy rainfall expected in the next 24 hours. Rainfall amounts of 50-75mm possible.".into(),
                severity: AlertSeverity::Severe,
                start_time: now,
                end_time: now + Duration::hours(24),
                location: SAMPLE_LOCATION.into(),
                recommendations: strings(&[
                    "Ensure proper field drainage",
                    "Postpone spraying operations",
                    "Secure loose equipment and structures",
                    "Monitor low-lying areas for flooding",
                ]),
                is_active: true,
                is_dismissed: false,
            },
            WeatherAlert {
                id: "mock-2".into(),
                kind: AlertKind::Watch,
                category: AlertCategory::Temperature,
                title: "Heat Wave Watch".into(),
                description: "Temperatures may exceed 40°C in the coming days. Monitor crop stress levels.".into(),
                severity: AlertSeverity::Moderate,
                start_time: now + Duration::days(2),
                end_time: now + Duration::days(5),
                location: "Regional Area".into(),
                recommendations: strings(&[
                    "Increase irrigation frequency",
                    "Provide shade for sensitive crops",
                    "Monitor livestock for heat stress",
                    "Avoid heavy field work during peak hours",
                ]),
                is_active: true,
                is_dismissed: false,
            },
        ],
        location: SAMPLE_LOCATION.into(),
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap()
    }

    fn conditions(temp: f64, humidity: f64, wind_ms: f64) -> CurrentConditions {
        CurrentConditions {
            location: "Ludhiana".into(),
            temperature_c: temp,
            humidity_pct: humidity,
            wind_speed_ms: wind_ms,
            condition: "Clear".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
        }
    }

    fn period(hours: i64, rain_mm: f64, owm_id: u32) -> ForecastPeriod {
        let weather = WeatherCondition::from_owm_id(owm_id);
        ForecastPeriod {
            timestamp: now() + Duration::hours(hours),
            temperature_c: 24.6,
            humidity_pct: 70.0,
            wind_speed_ms: 3.0,
            rain_3h_mm: rain_mm,
            weather,
            condition: format!("{:?}", weather),
            description: "test".into(),
            icon: "10d".into(),
        }
    }

    #[test]
    fn current_weather_converts_units() {
        let current = current_weather(&conditions(27.6, 55.0, 5.0));
        assert_eq!(current.temperature, 28);
        assert_eq!(current.wind_speed, 18);
        assert_eq!(current.location, "Ludhiana");
    }

    #[test]
    fn daily_forecast_takes_first_period_per_day() {
        // Starts 06:00; every 3 h for 7 days
        let periods: Vec<_> = (0..56).map(|i| period(i * 3, 0.0, 800)).collect();
        let daily = daily_forecasts(&periods);
        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].date, now().timestamp());
        // Day two starts at midnight, 18 h after the first period
        assert_eq!(daily[1].date, (now() + Duration::hours(18)).timestamp());
        assert_eq!(daily[0].temp, 25);
    }

    #[test]
    fn calm_weather_gets_optimal_conditions() {
        let advisories = advisories(&conditions(25.0, 60.0, 3.0), &[]);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].title, "Optimal Conditions");
    }

    #[test]
    fn advisories_fire_in_order() {
        let forecast = mock_forecast(now());
        let advisories = advisories(&conditions(38.0, 85.0, 12.0), &forecast);
        let titles: Vec<_> = advisories.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "High Temperature Alert",
                "Rainfall Alert",
                "Strong Wind Advisory",
                "High Humidity Alert"
            ]
        );
        assert!(advisories[1].description.starts_with("Rain expected for 2 days."));
    }

    #[test]
    fn frost_advisory_below_five() {
        let advisories = advisories(&conditions(3.0, 50.0, 1.0), &[]);
        assert_eq!(advisories[0].title, "Frost Warning");
        assert_eq!(advisories[0].kind, AdvisoryKind::Warning);
    }

    #[test]
    fn missing_forecast_uses_sample_days() {
        let report = build_report(&conditions(25.0, 60.0, 3.0), None, now());
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(report.forecast[1].condition, "Sunny");
        assert_eq!(report.forecast[4].date, now().timestamp() + 4 * 86_400);
        // Two sample rain days trigger the rainfall advisory
        assert_eq!(report.advisories[0].title, "Rainfall Alert");
    }

    #[test]
    fn mock_report_shape() {
        let report = mock_report(now());
        assert_eq!(report.current.temperature, 28);
        assert_eq!(report.current.wind_speed, 12);
        assert_eq!(report.advisories.len(), 1);
        assert_eq!(report.advisories[0].title, "Sample Advisory");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["current"]["windSpeed"], 12);
        assert_eq!(json["forecast"][2]["description"], "light rain");
        assert_eq!(json["advisories"][0]["type"], "info");
    }

    #[test]
    fn extreme_heat_alert() {
        let alerts = weather_alerts(&conditions(42.4, 30.0, 2.0), &[], now());
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.severity, AlertSeverity::Extreme);
        assert_eq!(alert.id, format!("temp-extreme-{}", now().timestamp_millis()));
        assert_eq!(alert.end_time, now() + Duration::hours(12));
        assert_eq!(alert.recommendations.len(), 5);
        assert!(alert.description.contains("42°C"));
    }

    #[test]
    fn high_heat_alert_between_35_and_40() {
        let alerts = weather_alerts(&conditions(37.0, 30.0, 2.0), &[], now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "High Temperature Alert");
        assert_eq!(alerts[0].severity, AlertSeverity::Severe);
        assert_eq!(alerts[0].end_time, now() + Duration::hours(8));
    }

    #[test]
    fn frost_and_wind_alerts() {
        let alerts = weather_alerts(&conditions(-1.0, 90.0, 16.0), &[], now());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, AlertCategory::Frost);
        assert_eq!(alerts[1].category, AlertCategory::Wind);
        assert_eq!(alerts[1].severity, AlertSeverity::Moderate);
        // 16 m/s = 57.6 km/h
        assert!(alerts[1].description.contains("58 km/h"));

        let gale = weather_alerts(&conditions(10.0, 50.0, 22.0), &[], now());
        assert_eq!(gale[0].severity, AlertSeverity::Severe);
    }

    #[test]
    fn heavy_rain_alert_totals_periods() {
        let forecast = vec![
            period(3, 12.0, 501),
            period(6, 4.0, 500),
            period(9, 25.0, 502),
            period(12, 20.0, 502),
        ];
        let alerts = weather_alerts(&conditions(25.0, 60.0, 3.0), &forecast, now());
        assert_eq!(alerts.len(), 1);
        let rain = &alerts[0];
        assert_eq!(rain.category, AlertCategory::Precipitation);
        // 12 + 25 + 20 = 57 > 50
        assert_eq!(rain.severity, AlertSeverity::Severe);
        assert!(rain.description.contains("57mm"));
        assert_eq!(rain.end_time, now() + Duration::hours(12));
    }

    #[test]
    fn storm_alert_spans_storm_periods() {
        let forecast = vec![
            period(3, 0.0, 800),
            period(6, 2.0, 211),
            period(9, 0.0, 800),
            period(15, 1.0, 201),
        ];
        let alerts = weather_alerts(&conditions(25.0, 60.0, 3.0), &forecast, now());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, AlertCategory::Storm);
        assert_eq!(alerts[0].start_time, now() + Duration::hours(6));
        assert_eq!(alerts[0].end_time, now() + Duration::hours(15));
    }

    #[test]
    fn single_storm_period_starts_and_ends_together() {
        let forecast = vec![period(6, 0.0, 200)];
        let alerts = weather_alerts(&conditions(25.0, 60.0, 3.0), &forecast, now());
        assert_eq!(alerts[0].start_time, alerts[0].end_time);
    }

    #[test]
    fn mock_alerts_shape() {
        let report = mock_alerts(now());
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.alerts[0].id, "mock-1");
        assert_eq!(report.alerts[1].kind, AlertKind::Watch);
        assert_eq!(report.alerts[1].start_time, now() + Duration::days(2));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["alerts"][1]["type"], "watch");
        assert_eq!(json["alerts"][0]["isActive"], true);
        assert_eq!(json["lastUpdated"], "2024-06-01T06:00:00Z");
    }
}
