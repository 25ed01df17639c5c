pub mod climate;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use climate::{Climate, Error, ErrorResponse, MostActiveStation, TemperatureStats};
pub use db::{
    ClimateData, Database, DatasetOverview, MeasurementFilter, PrecipitationReading,
    StationActivity, TemperatureReading, TemperatureSummary,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
