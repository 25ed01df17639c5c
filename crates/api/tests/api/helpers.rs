use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use climate_api::{
    app, app_state_with, db, ClimateData, Database, MeasurementFilter, PrecipitationReading,
    StationActivity, TemperatureReading, TemperatureSummary,
};
use hyper::{header, Method};
use mockall::mock;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use time::Date;
use tower::ServiceExt;

const SCHEMA: &str = include_str!("../fixtures/schema.sql");
const SEED: &str = include_str!("../fixtures/seed.sql");

mock! {
    pub ClimateAccess {}

    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn station_ids(&self) -> Result<Vec<String>, db::Error>;
        async fn station_name(&self, station_id: &str) -> Result<Option<String>, db::Error>;
        async fn latest_date(&self) -> Result<Option<Date>, db::Error>;
        async fn first_precipitation_on(
            &self,
            date: Date,
        ) -> Result<Option<PrecipitationReading>, db::Error>;
        async fn precipitation(
            &self,
            filter: MeasurementFilter,
        ) -> Result<Vec<PrecipitationReading>, db::Error>;
        async fn temperature_observations(
            &self,
            filter: MeasurementFilter,
        ) -> Result<Vec<TemperatureReading>, db::Error>;
        async fn most_active_station(
            &self,
            filter: MeasurementFilter,
        ) -> Result<Option<StationActivity>, db::Error>;
        async fn temperature_summary(
            &self,
            filter: MeasurementFilter,
        ) -> Result<TemperatureSummary, db::Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub async fn spawn_app(data: Arc<dyn ClimateData>) -> TestApp {
    let state = app_state_with(String::from("http://127.0.0.1:5000"), data);
    TestApp { app: app(state) }
}

/// In-memory copy of the fixture dataset. A single connection keeps the
/// in-memory database alive for the lifetime of the pool.
pub async fn seeded_database() -> Database {
    database_with(SEED).await
}

pub async fn empty_database() -> Database {
    database_with("").await
}

async fn database_with(seed: &str) -> Database {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    if !seed.is_empty() {
        sqlx::raw_sql(seed).execute(&pool).await.unwrap();
    }
    Database::from_pool(pool)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body).expect("response body is JSON");
    (status, json)
}

pub fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("expected a number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
