use crate::{
    climate::{self, Climate},
    db, index_handler, precipitation_by_date, precipitation_last_year, routes, stations,
    tobs_by_date_range, tobs_by_start_date, tobs_last_year, tobs_most_active_station,
    ClimateData, Database,
};
use anyhow::Context;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub climate: Arc<Climate>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::measurements::stations::stations,
        routes::measurements::precipitation::precipitation_last_year,
        routes::measurements::precipitation::precipitation_by_date,
        routes::measurements::temperature::tobs_last_year,
        routes::measurements::temperature::tobs_most_active_station,
        routes::measurements::temperature::tobs_by_start_date,
        routes::measurements::temperature::tobs_by_date_range,
    ),
    components(
        schemas(
                climate::ErrorResponse,
                climate::MostActiveStation,
                climate::TemperatureStats,
                db::PrecipitationReading,
                db::TemperatureReading,
        )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only RESTful api over Hawaii weather station precipitation and temperature measurements")
    )
)]
struct ApiDoc;

/// Open the dataset and wire the query service on top of it.
pub async fn build_app_state(remote_url: String, database_path: String) -> anyhow::Result<AppState> {
    let database = Database::new(&database_path).await?;
    database
        .health_check()
        .await
        .context("dataset failed health check")?;

    let overview = database.dataset_overview().await?;
    info!(
        "dataset holds {} stations and {} measurements ({} to {})",
        overview.stations,
        overview.measurements,
        overview.first_date.as_deref().unwrap_or("n/a"),
        overview.last_date.as_deref().unwrap_or("n/a"),
    );

    Ok(app_state_with(remote_url, Arc::new(database)))
}

/// State over any data source; tests use this with an in-memory database or a mock.
pub fn app_state_with(remote_url: String, data: Arc<dyn ClimateData>) -> AppState {
    AppState {
        remote_url,
        climate: Arc::new(Climate::new(data)),
    }
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/precipitation", get(precipitation_last_year))
        .route("/api/v1.0/precipitation/{date}", get(precipitation_by_date))
        .route("/api/v1.0/tobs", get(tobs_last_year))
        .route(
            "/api/v1.0/tobs/mostactivestation",
            get(tobs_most_active_station),
        )
        .route("/api/v1.0/{start}", get(tobs_by_start_date))
        .route("/api/v1.0/{start}/{end}", get(tobs_by_date_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
