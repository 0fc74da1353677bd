use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

use super::{create_router, AppState};
use crate::config::{Config, OpenWeatherMapConfig};
use crate::models::{GeoPoint, Shop};

fn test_app() -> Router {
    let config = Config {
        shops: vec![
            Shop {
                name: "Connaught Seeds".into(),
                address: Some("Block A, Connaught Place".into()),
                phone: None,
                location: GeoPoint {
                    lat: 28.6315,
                    lng: 77.2167,
                },
                products: vec!["Seeds".into(), "Urea".into()],
                verified: true,
            },
            Shop {
                name: "Unlisted Depot".into(),
                address: None,
                phone: None,
                location: GeoPoint {
                    lat: 28.6140,
                    lng: 77.2091,
                },
                products: Vec::new(),
                verified: false,
            },
        ],
        ..Config::default()
    };
    create_router(AppState::new(config).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    send_to(test_app(), request).await
}

async fn send_to(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_response(response).await)
}

/// App whose weather client talks to `base_url`
fn app_with_weather(base_url: &str) -> Router {
    let owm = OpenWeatherMapConfig {
        base_url: base_url.into(),
        timeout_secs: 2,
        ..OpenWeatherMapConfig::with_api_key("test_key")
    };
    let config = Config {
        openweathermap: Some(owm),
        ..Config::default()
    };
    let state = AppState::new(config).unwrap();
    assert!(state.weather.is_some());
    create_router(state)
}

/// Local upstream that answers current conditions but fails the forecast
async fn current_only_upstream() -> String {
    let upstream = Router::new()
        .route(
            "/weather",
            axum::routing::get(|| async {
                axum::Json(json!({
                    "name": "Ludhiana",
                    "main": {"temp": 31.4, "humidity": 48},
                    "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
                    "wind": {"speed": 4.0}
                }))
            }),
        )
        .route(
            "/forecast",
            axum::routing::get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_check() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn predict_yield_scenario() {
    let request = post_json(
        "/api/predict-yield",
        json!({
            "cropType": "rice", "soilType": "loamy", "area": 10,
            "nitrogen": 50, "phosphorus": 40, "potassium": 30,
            "rainfall": 200, "temperature": 25, "humidity": 60
        }),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictedYield"]["perHectare"], 5.14);
    assert_eq!(body["predictedYield"]["total"], 51.43);
    assert_eq!(body["confidence"], 88);
    assert_eq!(body["factors"]["soil"], 1.2);
    assert_eq!(body["chartData"].as_array().unwrap().len(), 3);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn legacy_yield_path() {
    let request = post_json(
        "/yield-prediction",
        json!({"cropType": "wheat", "soilType": "silt", "area": 1}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["predictedYield"]["total"].is_number());
}

#[tokio::test]
async fn predict_yield_missing_area() {
    let request = post_json(
        "/api/predict-yield",
        json!({"cropType": "rice", "soilType": "loamy"}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn predict_yield_negative_area() {
    let request = post_json(
        "/api/predict-yield",
        json!({"cropType": "rice", "soilType": "loamy", "area": -3}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Area"));
}

#[tokio::test]
async fn predict_yield_nan_area_is_missing() {
    let request = post_json(
        "/api/predict-yield",
        json!({"cropType": "rice", "soilType": "loamy", "area": "NaN"}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn overflowing_inputs_are_bad_requests() {
    let request = post_json(
        "/api/predict-yield",
        json!({
            "cropType": "rice", "soilType": "loamy", "area": "1e10",
            "nitrogen": "1e308", "phosphorus": "1e308", "potassium": "1e308"
        }),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("out of range"));

    let request = post_json(
        "/api/predict-yield",
        json!({"cropType": "rice", "soilType": "loamy", "area": 1, "nitrogen": "inf"}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: nitrogen must be a finite number");

    let request = post_json(
        "/api/fertilizer-recommendation",
        json!({"cropType": "wheat", "soilType": "loamy", "nitrogenLevel": 30, "area": "1e300"}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Urea quantity is out of range"));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/predict-yield")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn fertilizer_missing_soil_type() {
    let request = post_json(
        "/api/fertilizer-recommendation",
        json!({"cropType": "wheat", "nitrogenLevel": 30}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing required fields"}));
}

#[tokio::test]
async fn fertilizer_wheat_plan() {
    let request = post_json(
        "/fertilizer-recommendation",
        json!({
            "cropType": "wheat", "soilType": "loamy", "soilpH": 6.5,
            "nitrogenLevel": 30, "phosphorusLevel": 50, "potassiumLevel": 50,
            "organicMatter": 1.0
        }),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["deficiencies"]["nitrogen"], 70.0);
    assert_eq!(body["recommendations"]["chemical"]["urea"], 152);
    assert_eq!(body["recommendations"]["organic"]["greenManureRecommended"], true);
    assert_eq!(body["recommendations"]["schedule"][0]["stage"], "Sowing");
    assert_eq!(body["tips"][0], "Increase organic matter by adding compost or farmyard manure regularly");
}

#[tokio::test]
async fn sensor_prediction() {
    let request = post_json(
        "/api/predictions/yield",
        json!({
            "cropType": "wheat", "soilType": "loamy", "area": 2,
            "nitrogen": 120, "phosphorus": 60, "potassium": 60,
            "inputMethod": "sensor",
            "sensorData": {"soilMoisture": 60, "soilPH": 6.5}
        }),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 85);
    assert_eq!(body["inputMethod"], "sensor");
    assert_eq!(body["predictedYield"]["perHectare"], 4.56);
}

#[tokio::test]
async fn identify_disease_requires_crop() {
    let (status, body) = send(post_json("/api/identify-disease", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Crop type is required");
}

#[tokio::test]
async fn identify_disease_with_image() {
    let request = post_json(
        "/api/identify-disease",
        json!({"cropType": "cotton", "image": {"size": 1024, "type": "image/png"}}),
    );
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease"]["name"], "Cotton Bollworm");
    let confidence = body["confidence"].as_u64().unwrap();
    assert!((80..=99).contains(&confidence));
    assert_eq!(body["imageAnalysis"]["type"], "image/png");
    assert_eq!(body["nextSteps"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn weather_without_key_serves_sample_data() {
    let (status, body) = send(get("/api/weather?lat=30.9&lon=75.85")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["location"], "Sample Location");
    assert_eq!(body["forecast"].as_array().unwrap().len(), 5);
    assert_eq!(body["advisories"][0]["title"], "Sample Advisory");
}

#[tokio::test]
async fn weather_alerts_without_key_serves_sample_alerts() {
    let (status, body) = send(get("/api/weather-alerts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
    assert_eq!(body["alerts"][0]["id"], "mock-1");
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn unreachable_weather_service_serves_sample_data() {
    let app = app_with_weather("http://127.0.0.1:9");
    let (status, body) = send_to(app.clone(), get("/api/weather")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["location"], "Sample Location");
    assert_eq!(body["advisories"][0]["title"], "Sample Advisory");

    let (status, body) = send_to(app, get("/api/weather-alerts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 2);
    assert_eq!(body["alerts"][0]["id"], "mock-1");
}

#[tokio::test]
async fn forecast_failure_keeps_current_conditions() {
    let app = app_with_weather(&current_only_upstream().await);

    let (status, body) = send_to(app.clone(), get("/api/weather?lat=30.9&lon=75.85")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["location"], "Ludhiana");
    assert_eq!(body["current"]["temperature"], 31);
    assert_eq!(body["current"]["windSpeed"], 14);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 5);

    // Alerts need both feeds, so a failed forecast means sample alerts
    let (status, body) = send_to(app, get("/api/weather-alerts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"][0]["id"], "mock-1");
}

#[tokio::test]
async fn environmental_data_requires_coordinates() {
    let (status, body) = send(get("/api/environmental-data?lat=28.6")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Coordinates required");

    let (status, body) = send(get("/api/environmental-data?lat=28.6&lng=77.2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["lat"], 28.6);
    let ph = body["soil"]["ph"].as_f64().unwrap();
    assert!((6.0..8.0).contains(&ph));
}

#[tokio::test]
async fn nearby_shops_lists_verified_only() {
    let (status, body) = send(get("/api/shops/nearby?lat=28.6139&lng=77.2090")).await;
    assert_eq!(status, StatusCode::OK);
    let shops = body["shops"].as_array().unwrap();
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["name"], "Connaught Seeds");
    assert!(shops[0]["distance"].as_f64().unwrap() < 3.0);
}

#[tokio::test]
async fn nearby_shops_zero_coordinates() {
    let (status, body) = send(get("/api/shops/nearby?lat=0&lng=77.2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Coordinates required");
}
