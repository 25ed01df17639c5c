use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::{climate::Error, AppState, PrecipitationReading};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for every measurement in the last 366 days of data", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn precipitation_last_year(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, Error> {
    state.climate.precipitation_last_year().await.map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation/{date}",
    params(
         ("date" = String, Path, description = "Measurement date, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Precipitation recorded on the date", body = PrecipitationReading),
        (status = BAD_REQUEST, description = "Date is not YYYY-MM-DD", body = crate::ErrorResponse),
        (status = NOT_FOUND, description = "No measurement on the date", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn precipitation_by_date(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<PrecipitationReading>, Error> {
    let Path(date) = path?;
    state.climate.precipitation_on(&date).await.map(Json)
}
