use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    climate::{Error, MostActiveStation, TemperatureStats},
    AppState, TemperatureReading,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations for every measurement in the last 366 days of data", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn tobs_last_year(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, Error> {
    state
        .climate
        .temperature_observations_last_year()
        .await
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs/mostactivestation",
    responses(
        (status = OK, description = "Temperature summary of the station with the most measurements in the last 366 days of data", body = MostActiveStation),
        (status = NOT_FOUND, description = "No measurements in the window", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn tobs_most_active_station(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MostActiveStation>, Error> {
    state.climate.most_active_station_summary().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/max/avg from the start date on, null when nothing matches", body = TemperatureStats),
        (status = BAD_REQUEST, description = "Date is not YYYY-MM-DD", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn tobs_by_start_date(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TemperatureStats>, Error> {
    let Path(start) = path?;
    state.climate.temperature_stats_from(&start).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date included, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date included, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature min/max/avg between the dates, null when nothing matches", body = TemperatureStats),
        (status = BAD_REQUEST, description = "A date is not YYYY-MM-DD", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn tobs_by_date_range(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<TemperatureStats>, Error> {
    let Path((start, end)) = path?;
    state
        .climate
        .temperature_stats_range(&start, &end)
        .await
        .map(Json)
}
