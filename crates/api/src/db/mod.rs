pub mod climate_data;
pub mod sqlite;

pub use climate_data::*;
pub use sqlite::{Database, DatasetOverview};

use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

/// Calendar dates are stored and accepted as `YYYY-MM-DD`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Length of the trailing window used by the "last year" endpoints, counted
/// back from the latest recorded date.
pub const ONE_YEAR_WINDOW_DAYS: i64 = 366;

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

pub fn format_date(date: Date) -> Result<String, time::error::Format> {
    date.format(DATE_FORMAT)
}

/// Row selection shared by every measurement query. Bounds are inclusive;
/// an unset field does not constrain the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasurementFilter {
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub station_id: Option<String>,
}

impl MeasurementFilter {
    pub fn starting(start: Date) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    pub fn between(start: Date, end: Date) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            station_id: None,
        }
    }

    /// `[latest - 366 days, latest]`
    pub fn one_year_ending(latest: Date) -> Self {
        Self::between(
            latest.saturating_sub(Duration::days(ONE_YEAR_WINDOW_DAYS)),
            latest,
        )
    }

    pub fn for_station(mut self, station_id: impl Into<String>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }
}
