use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use utoipa::ToSchema;

use crate::db::{
    self, parse_date, ClimateData, MeasurementFilter, PrecipitationReading, TemperatureReading,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate {
        value: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidPath(#[from] PathRejection),
    #[error("{0}")]
    NotFound(String),
    #[error("Failed to read dataset: {0}")]
    DataAccess(#[from] db::Error),
}

/// Body returned with every non-2xx response.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidDate { value, source } => {
                debug!("rejected date '{}': {}", value, source);
                StatusCode::BAD_REQUEST
            }
            Error::InvalidPath(rejection) => {
                debug!("rejected path: {}", rejection.body_text());
                rejection.status()
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DataAccess(e) => {
                error!("dataset query failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MostActiveStation {
    pub station_id: String,
    pub station_name: String,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}

/// Temperature aggregates for a date range. The aggregates are null when no
/// measurement falls inside the range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureStats {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}

fn requested_date(value: &str) -> Result<Date, Error> {
    parse_date(value).map_err(|source| Error::InvalidDate {
        value: value.to_owned(),
        source,
    })
}

/// Query service over the measurement dataset. Every operation is a pure
/// read, so one instance is shared across all requests.
pub struct Climate {
    data: Arc<dyn ClimateData>,
}

impl Climate {
    pub fn new(data: Arc<dyn ClimateData>) -> Self {
        Self { data }
    }

    pub async fn list_stations(&self) -> Result<Vec<String>, Error> {
        Ok(self.data.station_ids().await?)
    }

    pub async fn precipitation_on(&self, date: &str) -> Result<PrecipitationReading, Error> {
        let requested = requested_date(date)?;
        self.data
            .first_precipitation_on(requested)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Date of {} not found", date)))
    }

    pub async fn precipitation_last_year(&self) -> Result<Vec<PrecipitationReading>, Error> {
        match self.one_year_window().await? {
            Some(window) => Ok(self.data.precipitation(window).await?),
            None => Ok(vec![]),
        }
    }

    pub async fn temperature_observations_last_year(
        &self,
    ) -> Result<Vec<TemperatureReading>, Error> {
        match self.one_year_window().await? {
            Some(window) => Ok(self.data.temperature_observations(window).await?),
            None => Ok(vec![]),
        }
    }

    /// Temperature summary for the station with the most measurements in the
    /// one-year window, computed over that station's rows in the same window.
    pub async fn most_active_station_summary(&self) -> Result<MostActiveStation, Error> {
        let window = self
            .one_year_window()
            .await?
            .ok_or_else(|| Error::NotFound(String::from("No measurements recorded")))?;

        let active = self
            .data
            .most_active_station(window.clone())
            .await?
            .ok_or_else(|| {
                Error::NotFound(String::from("No measurements in the last year of data"))
            })?;
        debug!(
            "most active station {} with {} observations",
            active.station_id, active.observations
        );

        let station_name = self
            .data
            .station_name(&active.station_id)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("Station {} not found", active.station_id))
            })?;

        let summary = self
            .data
            .temperature_summary(window.for_station(active.station_id.clone()))
            .await?;

        Ok(MostActiveStation {
            station_id: active.station_id,
            station_name,
            min_temp: summary.min_temp,
            max_temp: summary.max_temp,
            avg_temp: summary.avg_temp,
        })
    }

    pub async fn temperature_stats_from(&self, start: &str) -> Result<TemperatureStats, Error> {
        let start_date = requested_date(start)?;
        let summary = self
            .data
            .temperature_summary(MeasurementFilter::starting(start_date))
            .await?;

        Ok(TemperatureStats {
            start_date: start.to_owned(),
            end_date: None,
            min_temp: summary.min_temp,
            max_temp: summary.max_temp,
            avg_temp: summary.avg_temp,
        })
    }

    pub async fn temperature_stats_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, Error> {
        let start_date = requested_date(start)?;
        let end_date = requested_date(end)?;
        let summary = self
            .data
            .temperature_summary(MeasurementFilter::between(start_date, end_date))
            .await?;

        Ok(TemperatureStats {
            start_date: start.to_owned(),
            end_date: Some(end.to_owned()),
            min_temp: summary.min_temp,
            max_temp: summary.max_temp,
            avg_temp: summary.avg_temp,
        })
    }

    /// `None` when the dataset holds no measurements.
    async fn one_year_window(&self) -> Result<Option<MeasurementFilter>, Error> {
        let latest = self.data.latest_date().await?;
        Ok(latest.map(MeasurementFilter::one_year_ending))
    }
}
