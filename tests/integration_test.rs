use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use weather_finder::{router, AppState, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---

fn current_body(with_aqi: bool) -> Value {
    // ---
    let mut body = json!({
        "location": { "name": "London", "region": "City of London, Greater London", "country": "United Kingdom" },
        "current": {
            "temp_c": 11.5, "temp_f": 52.7,
            "feelslike_c": 9.6, "feelslike_f": 49.3,
            "wind_kph": 19.1, "wind_mph": 11.9,
            "wind_degree": 230, "wind_dir": "SW",
            "humidity": 76, "pressure_mb": 1012.0, "pressure_in": 29.88,
            "uv": 2.0, "vis_km": 10.0,
            "condition": { "text": "Overcast and cloudy", "icon": "//cdn.weatherapi.com/weather/64x64/day/122.png" }
        }
    });
    if with_aqi {
        body["current"]["air_quality"] = json!({
            "co": 230.3, "no2": 19.5, "o3": 51.2,
            "pm2_5": 6.1, "pm10": 8.35,
            "us-epa-index": 1, "gb-defra-index": 3
        });
    }
    body
}

fn forecast_body() -> Value {
    // ---
    let day = |date: &str| {
        json!({
            "date": date,
            "day": { "maxtemp_c": 13.2, "mintemp_c": 7.9, "avgtemp_c": 10.4, "uv": 1.0,
                     "condition": { "text": "Patchy rain nearby", "icon": "//cdn/r.png" } },
            "hour": [
                { "time": format!("{date} 00:00"), "temp_c": 8.1, "condition": { "text": "Cloudy", "icon": "//cdn/c.png" } },
                { "time": format!("{date} 12:00"), "temp_c": 13.0, "condition": { "text": "Light rain", "icon": "//cdn/r.png" } }
            ]
        })
    };
    json!({
        "location": { "name": "London", "region": "City of London, Greater London", "country": "United Kingdom" },
        "forecast": { "forecastday": [day("2025-11-12"), day("2025-11-13"), day("2025-11-14")] }
    })
}

async fn mount_current(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("days", "3"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

/// Serve the real router on an ephemeral port, pointed at `upstream`.
async fn spawn_app(upstream: &MockServer) -> Result<String> {
    // ---
    let client = WeatherClient::with_base_url(&upstream.uri(), "test-key");
    let app = router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn search_with_air_quality_renders_classified_block() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(true)))
        .expect(1)
        .mount(&upstream)
        .await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
        1,
    )
    .await;

    let base = spawn_app(&upstream).await?;
    let client = Client::new();

    let view: Value = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "  London ", "aqi": true }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(view["status"], "current");
    assert_eq!(view["kind"], "loaded");
    assert_eq!(view["temperature"], "12°C");
    assert_eq!(view["mood"], "bg-overcast");
    assert_eq!(view["wind"], "19.1 kph");

    let aq = &view["air_quality"];
    assert_eq!(aq["epa"]["text"], "Good");
    assert_eq!(aq["epa"]["tier"], "aq-good");
    assert_eq!(aq["defra"]["text"], "Low");

    let pollutants = aq["pollutants"].as_array().expect("pollutants array");
    assert_eq!(pollutants.len(), 6);
    for p in pollutants {
        let value = p["value"].as_str().expect("string value");
        let well_formed = value == "—"
            || value
                .split_once('.')
                .is_some_and(|(_, decimals)| decimals.len() == 2);
        assert!(well_formed, "bad pollutant value {value}");
    }
    // SO₂ was not supplied
    assert_eq!(pollutants[4]["value"], "—");
    assert_eq!(pollutants[1]["value"], "8.35");

    Ok(())
}

#[tokio::test]
async fn search_without_aqi_has_no_air_quality_block() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("aqi", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(false)))
        .expect(1)
        .mount(&upstream)
        .await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
        1,
    )
    .await;

    let base = spawn_app(&upstream).await?;
    let view: Value = Client::new()
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London" }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(view["kind"], "loaded");
    assert!(view["air_quality"].is_null());
    Ok(())
}

#[tokio::test]
async fn current_failure_collapses_both_slots() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    mount_current(&upstream, ResponseTemplate::new(503), 1).await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
        1,
    )
    .await;

    let base = spawn_app(&upstream).await?;
    let client = Client::new();

    let response = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London", "aqi": false }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let view: Value = response.json().await?;
    assert_eq!(view["kind"], "failed");
    assert_eq!(view["error"], "Failed to fetch current weather");

    let forecast: Value = client
        .put(format!("{base}/view"))
        .json(&json!({ "view": "forecast" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(forecast["status"], "forecast");
    assert_eq!(forecast["kind"], "empty");

    Ok(())
}

#[tokio::test]
async fn malformed_current_body_discards_good_forecast() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    mount_current(
        &upstream,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        1,
    )
    .await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
        1,
    )
    .await;

    let base = spawn_app(&upstream).await?;
    let client = Client::new();

    let view: Value = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(view["kind"], "failed");
    assert_eq!(view["error"], "Failed to fetch current weather");

    let forecast: Value = client
        .put(format!("{base}/view"))
        .json(&json!({ "view": "forecast" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(forecast["status"], "forecast");
    assert_eq!(forecast["kind"], "empty");

    Ok(())
}

#[tokio::test]
async fn search_settles_after_caller_disconnects() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    let delay = Duration::from_millis(500);
    mount_current(
        &upstream,
        ResponseTemplate::new(200)
            .set_body_json(current_body(false))
            .set_delay(delay),
        1,
    )
    .await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200)
            .set_body_json(forecast_body())
            .set_delay(delay),
        1,
    )
    .await;

    let base = spawn_app(&upstream).await?;

    let impatient = Client::builder()
        .timeout(Duration::from_millis(100))
        .build()?;
    let sent = impatient
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London" }))
        .send()
        .await;
    assert!(sent.is_err(), "caller should have timed out");

    let client = Client::new();
    let mut view = Value::Null;
    for _ in 0..50 {
        view = client.get(format!("{base}/view")).send().await?.json().await?;
        if view["status"] != "loading" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert_eq!(view["status"], "current");
    assert_eq!(view["kind"], "loaded");
    assert_eq!(view["temperature"], "12°C");

    Ok(())
}

#[tokio::test]
async fn unit_toggles_never_refetch_and_reset_on_new_search() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    mount_current(
        &upstream,
        ResponseTemplate::new(200).set_body_json(current_body(false)),
        2,
    )
    .await;
    mount_forecast(
        &upstream,
        ResponseTemplate::new(200).set_body_json(forecast_body()),
        2,
    )
    .await;

    let base = spawn_app(&upstream).await?;
    let client = Client::new();

    let first: Value = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(first["temperature"], "12°C");

    let fahrenheit: Value = client
        .put(format!("{base}/units"))
        .json(&json!({ "temperature": "F", "wind": "mph" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fahrenheit["temperature"], "53°F");
    assert_eq!(fahrenheit["feels_like"], "49°F");
    assert_eq!(fahrenheit["wind"], "11.9 mph");

    let celsius: Value = client
        .put(format!("{base}/units"))
        .json(&json!({ "temperature": "C" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(celsius["temperature"], first["temperature"]);
    assert_eq!(celsius["wind"], "11.9 mph");

    // Switch to the forecast panel, then search again: view and units reset.
    let forecast: Value = client
        .put(format!("{base}/view"))
        .json(&json!({ "view": "forecast" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(forecast["kind"], "loaded");
    assert_eq!(forecast["location"], "London, City of London, Greater London, United Kingdom");
    assert_eq!(forecast["days"].as_array().map(Vec::len), Some(3));
    assert_eq!(forecast["days"][0]["date"], "12 November, 2025");
    assert_eq!(forecast["days"][0]["hours"][1]["time"], "12:00");

    let second: Value = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "London" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(second["status"], "current");
    assert_eq!(second["units"]["temperature"], "C");
    assert_eq!(second["units"]["wind"], "kph");
    assert_eq!(second["wind"], "19.1 kph");

    Ok(())
}

#[tokio::test]
async fn blank_query_is_rejected_without_upstream_calls() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    mount_current(&upstream, ResponseTemplate::new(200), 0).await;
    mount_forecast(&upstream, ResponseTemplate::new(200), 0).await;

    let base = spawn_app(&upstream).await?;
    let client = Client::new();

    let response = client
        .post(format!("{base}/search"))
        .json(&json!({ "query": "   ", "aqi": true }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let idle: Value = client.get(format!("{base}/view")).send().await?.json().await?;
    assert_eq!(idle["status"], "idle");

    Ok(())
}

#[tokio::test]
async fn health_endpoint_is_ok() -> Result<()> {
    // ---
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await?;

    let body: Value = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}
