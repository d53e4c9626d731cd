//! OpenWeatherClient against a mock HTTP server.

use skycast::api::{LookupTarget, OpenWeatherClient, NOT_FOUND_FALLBACK};
use skycast::config::Config;
use skycast::error::ApiError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paris_payload() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 2.3488, "lat": 48.8534},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 21.4, "feels_like": 20.9, "temp_min": 19.8, "temp_max": 23.1,
                 "pressure": 1016, "humidity": 48},
        "visibility": 10000,
        "wind": {"speed": 3.6, "deg": 250},
        "clouds": {"all": 0},
        "sys": {"country": "FR", "sunrise": 1718941500, "sunset": 1718999900},
        "timezone": 7200,
        "name": "Paris",
        "cod": 200
    })
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    let config = Config::for_base_url("test-key", &server.uri()).unwrap();
    OpenWeatherClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_weather_by_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let snapshot = client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("Paris".into()))
        .await
        .unwrap();

    assert_eq!(snapshot.name, "Paris");
    assert_eq!(snapshot.sys.country, "FR");
    assert_eq!(snapshot.main.humidity, 48);
}

#[tokio::test]
async fn test_fetch_weather_by_coordinates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let target = LookupTarget::Coordinates {
        lat: 48.85,
        lon: 2.35,
        label: "Paris, FR".into(),
    };
    let snapshot = client_for(&mock_server).fetch_weather(&target).await.unwrap();

    assert_eq!(snapshot.name, "Paris");
}

#[tokio::test]
async fn test_city_names_are_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "São Paulo & Co"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("São Paulo & Co".into()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_not_found_carries_upstream_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("Atlantis".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.to_string(), "city not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_error_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("Paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Upstream { status: 502, .. }));
    assert_eq!(err.to_string(), NOT_FOUND_FALLBACK);
}

#[tokio::test]
async fn test_unauthorized_message_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("Paris".into()))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid API key.");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": 5})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_weather(&LookupTarget::City("Paris".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_suggest_cities() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Lon"))
        .and(query_param("limit", "5"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "London", "country": "GB", "state": "England", "lat": 51.5, "lon": -0.12,
             "local_names": {"en": "London"}},
            {"name": "London", "country": "CA", "state": "Ontario", "lat": 42.98, "lon": -81.24}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let suggestions = client_for(&mock_server).suggest_cities("Lon").await.unwrap();

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].label(), "London, GB, England");
    assert_eq!(suggestions[1].country, "CA");
}

#[tokio::test]
async fn test_transport_failure() {
    // Bind and release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = Config::for_base_url("test-key", &format!("http://127.0.0.1:{port}")).unwrap();
    let client = OpenWeatherClient::new(&config).unwrap();

    let err = client.suggest_cities("Lon").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
