use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use std::time::Duration;
use time::Date;

use super::{
    format_date, parse_date, ClimateData, Error, MeasurementFilter, PrecipitationReading,
    StationActivity, TemperatureReading, TemperatureSummary,
};

/// Shared read-only handle on the dataset. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// Row counts and date span, logged at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverview {
    pub stations: i64,
    pub measurements: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

impl Database {
    pub async fn new(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-16000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open dataset at {}", path))?;

        info!("SQLite dataset opened read-only at: {}", path);
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool, e.g. an in-memory database in tests.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow::anyhow!(
                "Database integrity check failed: {}",
                result
            ));
        }

        Ok(())
    }

    pub async fn dataset_overview(&self) -> Result<DatasetOverview> {
        let (stations, measurements, first_date, last_date): (
            i64,
            i64,
            Option<String>,
            Option<String>,
        ) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM station), COUNT(*), MIN(date), MAX(date)
             FROM measurement",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to summarize dataset")?;

        Ok(DatasetOverview {
            stations,
            measurements,
            first_date,
            last_date,
        })
    }
}

/// Builds ` WHERE ...` for `filter` plus the values to bind, in order.
fn filter_clause(filter: &MeasurementFilter) -> Result<(String, Vec<String>), Error> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(start) = filter.start {
        conditions.push("date >= ?");
        bindings.push(format_date(start)?);
    }
    if let Some(end) = filter.end {
        conditions.push("date <= ?");
        bindings.push(format_date(end)?);
    }
    if let Some(ref station_id) = filter.station_id {
        conditions.push("station = ?");
        bindings.push(station_id.clone());
    }

    if conditions.is_empty() {
        Ok((String::new(), bindings))
    } else {
        Ok((format!(" WHERE {}", conditions.join(" AND ")), bindings))
    }
}

fn precipitation_from_row(row: &SqliteRow) -> Result<PrecipitationReading, sqlx::Error> {
    Ok(PrecipitationReading {
        date: row.try_get("date")?,
        prcp: row.try_get("prcp")?,
    })
}

impl Database {
    async fn fetch_filtered(
        &self,
        select: &str,
        suffix: &str,
        filter: &MeasurementFilter,
    ) -> Result<Vec<SqliteRow>, Error> {
        let (clause, bindings) = filter_clause(filter)?;
        let query = format!("{}{}{}", select, clause, suffix);
        debug!("measurement query: {} {:?}", query, bindings);

        let mut q = sqlx::query(&query);
        for binding in &bindings {
            q = q.bind(binding);
        }
        Ok(q.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl ClimateData for Database {
    async fn station_ids(&self) -> Result<Vec<String>, Error> {
        let ids = sqlx::query_scalar("SELECT station FROM station ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn station_name(&self, station_id: &str) -> Result<Option<String>, Error> {
        let name = sqlx::query_scalar(
            "SELECT name FROM station WHERE station = ? ORDER BY id LIMIT 1",
        )
        .bind(station_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(name)
    }

    async fn latest_date(&self) -> Result<Option<Date>, Error> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        latest
            .map(|value| {
                parse_date(&value).map_err(|source| Error::StoredDate { value, source })
            })
            .transpose()
    }

    async fn first_precipitation_on(
        &self,
        date: Date,
    ) -> Result<Option<PrecipitationReading>, Error> {
        let row = sqlx::query(
            "SELECT date, prcp FROM measurement WHERE date = ? ORDER BY id LIMIT 1",
        )
        .bind(format_date(date)?)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(precipitation_from_row).transpose()?)
    }

    async fn precipitation(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Vec<PrecipitationReading>, Error> {
        let rows = self
            .fetch_filtered("SELECT date, prcp FROM measurement", " ORDER BY id", &filter)
            .await?;

        Ok(rows
            .iter()
            .map(precipitation_from_row)
            .collect::<Result<_, _>>()?)
    }

    async fn temperature_observations(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let rows = self
            .fetch_filtered("SELECT date, tobs FROM measurement", " ORDER BY id", &filter)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                Ok(TemperatureReading {
                    date: row.try_get("date")?,
                    tobs: row.try_get("tobs")?,
                })
            })
            .collect::<Result<_, sqlx::Error>>()?)
    }

    async fn most_active_station(
        &self,
        filter: MeasurementFilter,
    ) -> Result<Option<StationActivity>, Error> {
        let rows = self
            .fetch_filtered(
                "SELECT station, COUNT(*) AS observations FROM measurement",
                " GROUP BY station ORDER BY observations DESC, station ASC LIMIT 1",
                &filter,
            )
            .await?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };
        Ok(Some(StationActivity {
            station_id: row.try_get("station")?,
            observations: row.try_get("observations")?,
        }))
    }

    async fn temperature_summary(
        &self,
        filter: MeasurementFilter,
    ) -> Result<TemperatureSummary, Error> {
        // Aggregates over zero rows still produce one row of NULLs.
        let rows = self
            .fetch_filtered(
                "SELECT CAST(MIN(tobs) AS REAL) AS min_temp,
                        CAST(MAX(tobs) AS REAL) AS max_temp,
                        AVG(tobs) AS avg_temp
                 FROM measurement",
                "",
                &filter,
            )
            .await?;

        let Some(row) = rows.first() else {
            return Ok(TemperatureSummary::default());
        };
        Ok(TemperatureSummary {
            min_temp: row.try_get("min_temp")?,
            max_temp: row.try_get("max_temp")?,
            avg_temp: row.try_get("avg_temp")?,
        })
    }
}
