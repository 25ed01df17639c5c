use crate::helpers::{assert_close, empty_database, get_json, seeded_database, spawn_app};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::{collections::HashSet, sync::Arc};

#[tokio::test]
async fn stations_lists_each_station_once() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!(["USC00519397", "USC00513117", "USC00519281", "USC00511918"])
    );

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn stations_is_empty_array_for_empty_dataset() {
    let test_app = spawn_app(Arc::new(empty_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn precipitation_on_date_returns_first_row() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation/2016-08-22").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"date": "2016-08-22", "prcp": 0.08}));
}

#[tokio::test]
async fn precipitation_on_each_recorded_date_echoes_the_date() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    for date in ["2010-01-01", "2016-08-21", "2017-01-15", "2017-08-12", "2017-08-23"] {
        let (status, body) =
            get_json(&test_app.app, &format!("/api/v1.0/precipitation/{date}")).await;
        assert_eq!(status, StatusCode::OK, "{date}");
        assert_eq!(body["date"], date);
    }

    // Recorded date with no precipitation value
    let (_, body) = get_json(&test_app.app, "/api/v1.0/precipitation/2017-01-15").await;
    assert_eq!(body["prcp"], Value::Null);
}

#[tokio::test]
async fn precipitation_on_malformed_date_is_bad_request() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    for date in ["2021-13-40", "not-a-date", "2017-02-30", "20170823"] {
        let (status, body) =
            get_json(&test_app.app, &format!("/api/v1.0/precipitation/{date}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{date}");
        assert_eq!(body, json!({"error": "Invalid date format. Use YYYY-MM-DD."}));
    }
}

#[tokio::test]
async fn precipitation_on_absent_date_is_not_found() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation/2016-08-20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Date of 2016-08-20 not found"}));
}

#[tokio::test]
async fn precipitation_last_year_stays_inside_window() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"date": "2017-08-23", "prcp": 0.0},
            {"date": "2016-08-22", "prcp": 0.08},
            {"date": "2016-08-22", "prcp": 0.4},
            {"date": "2017-01-15", "prcp": null},
            {"date": "2017-08-01", "prcp": 0.0},
            {"date": "2017-08-10", "prcp": 0.02},
            {"date": "2017-08-12", "prcp": null}
        ])
    );

    for reading in body.as_array().unwrap() {
        let date = reading["date"].as_str().unwrap();
        assert!(("2016-08-22"..="2017-08-23").contains(&date), "{date} outside window");
    }
}

#[tokio::test]
async fn tobs_last_year_projects_temperatures() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);

    let readings = body.as_array().unwrap();
    assert_eq!(readings.len(), 7);
    assert_eq!(readings[0], json!({"date": "2017-08-23", "tobs": 81.0}));
    assert_eq!(readings[6], json!({"date": "2017-08-12", "tobs": null}));
    assert!(readings.iter().all(|r| r["date"] != "2016-08-21"));
}

#[tokio::test]
async fn last_year_endpoints_are_empty_for_empty_dataset() {
    let test_app = spawn_app(Arc::new(empty_database().await)).await;

    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs"] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn most_active_station_summarizes_window() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs/mostactivestation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["station_id"], "USC00519281");
    assert_eq!(body["station_name"], "WAIHEE 837.5, HI US");
    assert_close(&body["min_temp"], 62.0);
    assert_close(&body["max_temp"], 80.0);
    assert_close(&body["avg_temp"], 220.0 / 3.0);
}

#[tokio::test]
async fn most_active_station_is_not_found_for_empty_dataset() {
    let test_app = spawn_app(Arc::new(empty_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs/mostactivestation").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn temperature_stats_from_start_date() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2017-08-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["start_date"], "2017-08-01");
    assert!(body.get("end_date").is_none());
    assert_close(&body["min_temp"], 78.0);
    assert_close(&body["max_temp"], 81.0);
    assert_close(&body["avg_temp"], 239.0 / 3.0);
}

#[tokio::test]
async fn temperature_stats_after_last_date_are_null() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2018-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"start_date": "2018-01-01", "min_temp": null, "max_temp": null, "avg_temp": null})
    );
}

#[tokio::test]
async fn temperature_stats_between_dates() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2017-08-01/2017-08-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "start_date": "2017-08-01",
            "end_date": "2017-08-10",
            "min_temp": 78.0,
            "max_temp": 80.0,
            "avg_temp": 79.0
        })
    );
}

#[tokio::test]
async fn temperature_stats_with_inverted_range_are_null() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/2017-08-23/2017-08-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min_temp"], Value::Null);
    assert_eq!(body["max_temp"], Value::Null);
    assert_eq!(body["avg_temp"], Value::Null);
}

#[tokio::test]
async fn temperature_stats_reject_malformed_dates() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    for uri in [
        "/api/v1.0/2017-13-01",
        "/api/v1.0/yesterday",
        "/api/v1.0/2017-08-01/someday",
        "/api/v1.0/2017-02-30/2017-08-01",
    ] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Invalid date format. Use YYYY-MM-DD.");
    }
}

#[tokio::test]
async fn non_utf8_path_segments_get_json_errors() {
    let test_app = spawn_app(Arc::new(seeded_database().await)).await;

    for uri in [
        "/api/v1.0/precipitation/%FF",
        "/api/v1.0/%FF",
        "/api/v1.0/2017-08-01/%FF",
    ] {
        let (status, body) = get_json(&test_app.app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": "Invalid date format. Use YYYY-MM-DD."}));
    }
}
