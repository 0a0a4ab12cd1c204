//! OpenWeather client and icon fetcher against a mock HTTP server.

use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use weather_core::{
    Config, IconFailure, WeatherProvider, error::QueryCause,
    provider::openweather::OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn paris_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [
            { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }
        ],
        "base": "stations",
        "main": {
            "temp": 15.0,
            "feels_like": 14.2,
            "temp_min": 13.9,
            "temp_max": 16.1,
            "pressure": 1012,
            "humidity": 70
        },
        "visibility": 10000,
        "wind": { "speed": 3.5, "deg": 90 },
        "clouds": { "all": 75 },
        "dt": 1_700_000_000,
        "sys": {
            "type": 2,
            "id": 2041230,
            "country": "FR",
            "sunrise": 1_699_945_200,
            "sunset": 1_699_979_400
        },
        "timezone": 3600,
        "id": 2988507,
        "name": "Paris",
        "cod": 200
    })
}

fn create_test_provider(mock_server: &MockServer, timeout_secs: u64) -> OpenWeatherProvider {
    let mut config = Config {
        timeout_secs,
        ..Config::default()
    };
    config.openweather.base_url = mock_server.uri();
    config.openweather.icon_base_url = mock_server.uri();

    #[allow(clippy::expect_used)]
    OpenWeatherProvider::new("TEST_KEY".into(), &config).expect("Failed to create provider")
}

async fn setup_weather_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 0, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

// ============================================================================
// Weather
// ============================================================================

#[tokio::test]
async fn current_weather_sends_city_key_and_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server, 5);
    let report = provider.current("Paris").await.unwrap();

    assert_eq!(report.city, "Paris");
    assert_eq!(report.country, "FR");
    assert_eq!(report.temperature_c, 15.0);
    assert_eq!(report.feels_like_c, 14.2);
    assert_eq!(report.temp_min_c, 13.9);
    assert_eq!(report.temp_max_c, 16.1);
    assert_eq!(report.humidity_pct, 70);
    assert_eq!(report.pressure_hpa, 1012);
    assert_eq!(report.visibility_m, 10000);
    assert_eq!(report.wind_speed_mps, 3.5);
    assert_eq!(report.wind_deg, 90);
    assert_eq!(report.condition, "Clouds");
    assert_eq!(report.description, "broken clouds");
    assert_eq!(report.longitude, 2.3488);
    assert_eq!(report.latitude, 48.8534);
    assert_eq!(report.utc_offset.local_minus_utc(), 3600);
    assert_eq!(report.sunrise.timestamp(), 1_699_945_200);
    assert_eq!(report.sunset.timestamp(), 1_699_979_400);
    assert_eq!(report.icon, "04d");
}

#[tokio::test]
async fn not_found_status_becomes_query_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.current("Atlantis").await.unwrap_err();

    assert_eq!(err.city, "Atlantis");
    assert_eq!(err.to_string(), "Atlantis not found");
    match err.cause {
        QueryCause::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("unexpected cause: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_collapses_into_same_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(&mock_server, ResponseTemplate::new(500)).await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.current("Paris").await.unwrap_err();

    assert_eq!(err.to_string(), "Paris not found");
}

#[tokio::test]
async fn malformed_json_is_a_shape_failure() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.current("Paris").await.unwrap_err();

    assert!(matches!(err.cause, QueryCause::Shape(_)));
}

#[tokio::test]
async fn missing_nested_field_is_a_shape_failure() {
    let mock_server = MockServer::start().await;
    let mut body = paris_response();
    body["wind"].as_object_mut().unwrap().remove("deg");
    setup_weather_mock(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.current("Paris").await.unwrap_err();

    assert_eq!(err.city, "Paris");
    assert!(matches!(err.cause, QueryCause::Shape(_)));
}

#[tokio::test]
async fn slow_service_hits_the_timeout() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(paris_response())
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let provider = create_test_provider(&mock_server, 1);
    let err = provider.current("Paris").await.unwrap_err();

    assert!(matches!(err.cause, QueryCause::Transport(_)));
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_api_key() {
    let mock_server = MockServer::start().await;
    setup_weather_mock(
        &mock_server,
        ResponseTemplate::new(200).set_delay(Duration::from_secs(3)),
    )
    .await;

    let provider = create_test_provider(&mock_server, 1);
    let err = provider.current("Paris").await.unwrap_err();

    assert!(!err.cause.to_string().contains("TEST_KEY"));
}

// ============================================================================
// Icons
// ============================================================================

#[tokio::test]
async fn icon_is_downloaded_and_decoded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/w/04d.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server, 5);
    let icon = provider.icon("04d").await.unwrap();

    assert_eq!((icon.width, icon.height), (2, 2));
    assert_eq!(icon.pixel(1, 1), Some([200, 100, 0, 255]));
}

#[tokio::test]
async fn missing_icon_is_an_icon_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/w/zz.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.icon("zz").await.unwrap_err();

    assert!(matches!(err, IconFailure::Status { .. }));
}

#[tokio::test]
async fn undecodable_icon_is_an_icon_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/w/01d.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server, 5);
    let err = provider.icon("01d").await.unwrap_err();

    assert!(matches!(err, IconFailure::Decode { .. }));
}
