use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use climate_api::{create_router, ClimateStore, DateWindow, HttpServer, Measurement, Station};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn sample_store() -> ClimateStore {
    ClimateStore::from_rows(
        &[
            Measurement::new("USC1", "2016-08-22", 68.0).with_prcp(0.3),
            Measurement::new("USC1", "2016-08-23", 70.0).with_prcp(0.05),
            Measurement::new("USC2", "2016-08-23", 71.0),
            Measurement::new("USC1", "2017-08-20", 75.0).with_prcp(0.08),
            Measurement::new("USC1", "2017-08-22", 79.0).with_prcp(0.0),
            Measurement::new("USC2", "2017-08-23", 81.0).with_prcp(0.45),
        ],
        &[
            Station::new("USC1", "WAIKIKI 717.2, HI US").with_location(21.2716, -157.8168, 3.0),
            Station::new("USC2", "KANEOHE 838.1, HI US").with_location(21.4234, -157.8015, 14.6),
        ],
    )
    .expect("Failed to build sample store")
}

fn app() -> Router {
    create_router(Arc::new(sample_store()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to execute request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get_json(app: Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK, "GET {} returned {}: {}", uri, status, body);
    serde_json::from_str(&body).expect("Response is not JSON")
}

#[tokio::test]
async fn test_home_lists_routes() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "Available Routes:<br/>/api/v1.0/precipitations<br/>/api/v1.0/stations<br/>\
         /api/v1.0/tobs<br/>/api/v1.0/start_date<br/>/api/v1.0/start_date/end_date"
    );
}

#[tokio::test]
async fn test_precipitations_trailing_year() {
    let value = get_json(app(), "/api/v1.0/precipitations").await;
    assert_eq!(
        value,
        json!([
            { "2016-08-23": 0.05 },
            { "2016-08-23": null },
            { "2017-08-20": 0.08 },
            { "2017-08-22": 0.0 }
        ])
    );
}

#[tokio::test]
async fn test_precipitation_dates_inside_window() {
    let window = DateWindow::trailing_year();
    let value = get_json(app(), "/api/v1.0/precipitations").await;
    for record in value.as_array().expect("array") {
        let object = record.as_object().expect("object");
        assert_eq!(object.len(), 1);
        let date = object.keys().next().expect("one key");
        assert!(window.contains(date), "{} outside {}", date, window);
    }
}

#[tokio::test]
async fn test_stations() {
    let value = get_json(app(), "/api/v1.0/stations").await;
    assert_eq!(value, json!([{ "station": "USC1" }, { "station": "USC2" }]));
}

#[tokio::test]
async fn test_tobs_trailing_year() {
    let value = get_json(app(), "/api/v1.0/tobs").await;
    assert_eq!(
        value,
        json!([
            { "station": "USC1", "date": "2016-08-23", "tobs": 70.0 },
            { "station": "USC2", "date": "2016-08-23", "tobs": 71.0 },
            { "station": "USC1", "date": "2017-08-20", "tobs": 75.0 },
            { "station": "USC1", "date": "2017-08-22", "tobs": 79.0 }
        ])
    );
}

#[tokio::test]
async fn test_start_end_summary_example() {
    let (status, body) = get(app(), "/api/v1.0/2017-08-20/2017-08-22").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"TMIN":75.0,"TAVG":77.0,"TMAX":79.0}]"#);
}

#[tokio::test]
async fn test_start_end_same_day_includes_start() {
    let value = get_json(app(), "/api/v1.0/2017-08-20/2017-08-20").await;
    assert_eq!(value, json!([{ "TMIN": 75.0, "TAVG": 75.0, "TMAX": 75.0 }]));
}

#[tokio::test]
async fn test_start_summary() {
    let value = get_json(app(), "/api/v1.0/2017-08-22").await;
    assert_eq!(value, json!([{ "TMIN": 79.0, "TAVG": 80.0, "TMAX": 81.0 }]));
}

#[tokio::test]
async fn test_start_beyond_data_returns_nulls() {
    let (status, body) = get(app(), "/api/v1.0/2099-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"TMIN":null,"TAVG":null,"TMAX":null}]"#);
}

#[tokio::test]
async fn test_reversed_range_returns_nulls() {
    let value = get_json(app(), "/api/v1.0/2017-08-22/2017-08-20").await;
    assert_eq!(value, json!([{ "TMIN": null, "TAVG": null, "TMAX": null }]));
}

#[tokio::test]
async fn test_malformed_start_is_not_rejected() {
    // Compared as text: "not-a-date" sorts after every stored date.
    let value = get_json(app(), "/api/v1.0/not-a-date").await;
    assert_eq!(value, json!([{ "TMIN": null, "TAVG": null, "TMAX": null }]));
}

#[tokio::test]
async fn test_summary_ordering() {
    let value = get_json(app(), "/api/v1.0/2016-01-01").await;
    let summary = &value[0];
    let min = summary["TMIN"].as_f64().expect("TMIN");
    let avg = summary["TAVG"].as_f64().expect("TAVG");
    let max = summary["TMAX"].as_f64().expect("TMAX");
    assert!(min <= avg && avg <= max);
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let router = app();
    for uri in [
        "/api/v1.0/precipitations",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-08-23/2017-08-22",
    ] {
        let (_, first) = get(router.clone(), uri).await;
        let (_, second) = get(router.clone(), uri).await;
        assert_eq!(first, second, "GET {} is not idempotent", uri);
    }
}

#[tokio::test]
async fn test_health() {
    let value = get_json(app(), "/health").await;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let (status, _) = get(app(), "/api/v2.0/stations").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_over_csv_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = TempDir::new()?;
    let cache_dir = TempDir::new()?;

    let measurements = data_dir.path().join("hawaii_measurements.csv");
    let mut file = std::fs::File::create(&measurements)?;
    file.write_all(
        b"station,date,prcp,tobs\n\
          USC1,2017-08-20,0.08,75\n\
          USC1,2017-08-22,,79\n",
    )?;

    let stations = data_dir.path().join("hawaii_stations.csv");
    let mut file = std::fs::File::create(&stations)?;
    file.write_all(
        b"station,name,latitude,longitude,elevation\n\
          USC1,WAIKIKI 717.2,21.2716,-157.8168,3\n\
          USC2,KANEOHE 838.1,21.4234,-157.8015,14.6\n",
    )?;

    let store = ClimateStore::open()
        .measurements(measurements)
        .stations(stations)
        .cache_dir(cache_dir.path())
        .call()
        .await?;
    let router = HttpServer::new("127.0.0.1:0".parse()?, Arc::new(store)).router();

    let (_, body) = get(router.clone(), "/api/v1.0/2017-08-20/2017-08-22").await;
    assert_eq!(body, r#"[{"TMIN":75.0,"TAVG":77.0,"TMAX":79.0}]"#);

    let value = get_json(router.clone(), "/api/v1.0/precipitations").await;
    assert_eq!(value, json!([{ "2017-08-20": 0.08 }, { "2017-08-22": null }]));

    let value = get_json(router, "/api/v1.0/stations").await;
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    Ok(())
}
