use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::db::connection::Database;
use crate::domain::{Coordinates, Cost, Report, Weather};
use crate::errors::ServerError;
use crate::store::ReportStore;

const SELECT_REPORTS: &str = r#"
    select id, created_at, accident_date, accident_time, parties_involved,
           estimated_cost_cents, location, weather, description,
           latitude, longitude, images_json, party_details_json
    from reports
    order by seq desc
"#;

/// Reports persisted in SQLite. Party details and image handles are JSON columns.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ReportStore for SqliteStore {
    fn append(&self, report: Report) -> Result<(), ServerError> {
        self.db.with_conn(|conn| insert_report(conn, &report))
    }

    fn list(&self) -> Result<Vec<Report>, ServerError> {
        self.db.with_conn(|conn| list_reports(conn))
    }

    fn len(&self) -> Result<usize, ServerError> {
        self.db.with_conn(|conn| {
            let count: i64 = conn
                .query_row("select count(*) from reports", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(format!("count reports failed: {e}")))?;
            Ok(count as usize)
        })
    }

    fn contains(&self, id: &str) -> Result<bool, ServerError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "select exists(select 1 from reports where id = ?)",
                params![id],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(format!("lookup report failed: {e}")))
        })
    }
}

pub fn insert_report(conn: &Connection, report: &Report) -> Result<(), ServerError> {
    let images_json = serde_json::to_string(&report.images)
        .map_err(|e| ServerError::DbError(format!("encode images failed: {e}")))?;
    let party_details_json = serde_json::to_string(&report.party_details)
        .map_err(|e| ServerError::DbError(format!("encode party details failed: {e}")))?;

    conn.execute(
        r#"
        insert into reports (
          id, created_at, accident_date, accident_time, parties_involved,
          estimated_cost_cents, location, weather, description,
          latitude, longitude, images_json, party_details_json
        )
        values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            report.id,
            report.created_at.to_rfc3339(),
            report.date.format("%Y-%m-%d").to_string(),
            report.time.format("%H:%M").to_string(),
            report.parties_involved,
            report.estimated_cost.cents(),
            report.location,
            report.weather.as_str(),
            report.description,
            report.coordinates.map(|c| c.latitude),
            report.coordinates.map(|c| c.longitude),
            images_json,
            party_details_json,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert report failed: {e}")))?;

    Ok(())
}

pub fn list_reports(conn: &Connection) -> Result<Vec<Report>, ServerError> {
    let mut stmt = conn
        .prepare(SELECT_REPORTS)
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map([], ReportRow::from_row)
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    let mut reports = Vec::new();
    for row in rows {
        let row = row.map_err(|e| ServerError::DbError(format!("Row read failed: {e}")))?;
        reports.push(row.into_report()?);
    }
    Ok(reports)
}

/// Raw column values, decoded into a `Report` outside the rusqlite callback.
struct ReportRow {
    id: String,
    created_at: String,
    accident_date: String,
    accident_time: String,
    parties_involved: u32,
    estimated_cost_cents: i64,
    location: String,
    weather: String,
    description: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    images_json: String,
    party_details_json: String,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            created_at: row.get(1)?,
            accident_date: row.get(2)?,
            accident_time: row.get(3)?,
            parties_involved: row.get(4)?,
            estimated_cost_cents: row.get(5)?,
            location: row.get(6)?,
            weather: row.get(7)?,
            description: row.get(8)?,
            latitude: row.get(9)?,
            longitude: row.get(10)?,
            images_json: row.get(11)?,
            party_details_json: row.get(12)?,
        })
    }

    fn into_report(self) -> Result<Report, ServerError> {
        let corrupt = |what: &str, e: &dyn std::fmt::Display| {
            ServerError::DbError(format!("report {}: bad {what}: {e}", self.id))
        };

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| corrupt("created_at", &e))?
            .with_timezone(&Utc);
        let date = NaiveDate::parse_from_str(&self.accident_date, "%Y-%m-%d")
            .map_err(|e| corrupt("accident_date", &e))?;
        let time = NaiveTime::parse_from_str(&self.accident_time, "%H:%M")
            .map_err(|e| corrupt("accident_time", &e))?;
        let estimated_cost = Cost::from_cents(self.estimated_cost_cents)
            .ok_or_else(|| corrupt("estimated_cost_cents", &self.estimated_cost_cents))?;
        let weather = self.weather.parse::<Weather>().map_err(|e| corrupt("weather", &e))?;
        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => {
                Some(Coordinates::new(lat, lng).map_err(|e| corrupt("coordinates", &e))?)
            }
            _ => None,
        };
        let images =
            serde_json::from_str(&self.images_json).map_err(|e| corrupt("images_json", &e))?;
        let party_details = serde_json::from_str(&self.party_details_json)
            .map_err(|e| corrupt("party_details_json", &e))?;

        Ok(Report {
            id: self.id.clone(),
            created_at,
            date,
            time,
            parties_involved: self.parties_involved,
            estimated_cost,
            location: self.location,
            weather,
            description: self.description,
            images,
            coordinates,
            party_details,
        })
    }
}
