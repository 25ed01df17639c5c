use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use super::MeasurementFilter;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date: {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Stored date '{value}' is not a YYYY-MM-DD date: {source}")]
    StoredDate {
        value: String,
        source: time::error::Parse,
    },
}

/// Read-only access to the measurement and station tables.
///
/// Every method returns rows in table order unless it documents otherwise.
#[async_trait]
pub trait ClimateData: Send + Sync {
    /// All station ids, one per station row.
    async fn station_ids(&self) -> Result<Vec<String>, Error>;
    async fn station_name(&self, station_id: &str) -> Result<Option<String>, Error>;
    /// Most recent measurement date, `None` for an empty table.
    async fn latest_date(&self) -> Result<Option<Date>, Error>;
    /// First row (lowest row id) recorded on `date`.
    async fn first_precipitation_on(
        &self,
        date: Date,
    ) -> Result<Option<PrecipitationReading>, Error>;
    async fn precipitation(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Vec<PrecipitationReading>, Error>;
    async fn temperature_observations(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Vec<TemperatureReading>, Error>;
    /// Station with the most rows matching `filter`. Ties go to the lowest
    /// station id.
    async fn most_active_station(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Option<StationActivity>, Error>;
    /// Min/max/avg of `tobs` over matching rows; all `None` when nothing
    /// matches.
    async fn temperature_summary(
        &self,
        filter: MeasurementFilter,
    ) -> Result<TemperatureSummary, Error>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationReading {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    /// Precipitation in inches, null when not recorded
    pub prcp: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureReading {
    /// Measurement date, YYYY-MM-DD
    pub date: String,
    /// Temperature observation in degrees Fahrenheit, null when not recorded
    pub tobs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationActivity {
    pub station_id: String,
    pub observations: i64,
}

/// Min/max/avg of `tobs`, `None` when no row matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureSummary {
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub avg_temp: Option<f64>,
}
