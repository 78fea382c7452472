// app.rs
use chrono::Utc;
use tracing::{error, info};

use crate::config::{Config, StorageBackend};
use crate::db::{init_db, Database, SqliteStore};
use crate::domain::{NewReport, Report};
use crate::errors::ServerError;
use crate::geocoding::{Geocoder, GoogleGeocoder};
use crate::remote::{AccidentSink, HttpAccidentSink};
use crate::sessions::Sessions;
use crate::store::{ImageStore, MemoryStore, ReportStore};

/// Everything a request handler can reach.
pub struct App {
    pub config: Config,
    pub store: Box<dyn ReportStore>,
    pub images: ImageStore,
    pub sessions: Sessions,
    pub sink: Option<Box<dyn AccidentSink>>,
    pub geocoder: Box<dyn Geocoder>,
}

impl App {
    pub fn new(
        config: Config,
        store: Box<dyn ReportStore>,
        sink: Option<Box<dyn AccidentSink>>,
        geocoder: Box<dyn Geocoder>,
    ) -> Self {
        let sessions = Sessions::new(config.form.default_party_count);
        let images = ImageStore::with_limit(config.storage.max_image_bytes);
        Self {
            config,
            store,
            images,
            sessions,
            sink,
            geocoder,
        }
    }

    /// Wires the configured store, remote backend and geocoder.
    pub fn from_config(config: Config) -> Result<Self, ServerError> {
        let store: Box<dyn ReportStore> = match config.storage.backend {
            StorageBackend::Memory => Box::new(MemoryStore::new()),
            StorageBackend::Sqlite => {
                let db = Database::new(config.storage.database_path.clone());
                init_db(&db, &config.storage.schema_path)?;
                Box::new(SqliteStore::new(db))
            }
        };

        let sink: Option<Box<dyn AccidentSink>> = if config.remote.enabled {
            let sink = HttpAccidentSink::new(&config.remote)
                .map_err(|e| ServerError::Setup(format!("remote backend: {e}")))?;
            info!(url = %sink.accidents_url(), "forwarding reports to remote backend");
            Some(Box::new(sink))
        } else {
            None
        };

        let geocoder = GoogleGeocoder::new(&config.geocoding)
            .map_err(|e| ServerError::Setup(format!("geocoder: {e}")))?;
        if !geocoder.is_configured() {
            info!("no geocoding API key; location lookups are disabled");
        }

        Ok(Self::new(config, store, sink, Box::new(geocoder)))
    }

    /// Stamps the submission, forwards it to the remote backend when one is
    /// configured, and appends it to the store.
    ///
    /// Remote failures are logged and otherwise ignored: the local append
    /// happens either way.
    pub fn accept(&self, new_report: NewReport) -> Result<Report, ServerError> {
        let report = Report::accept(new_report, Utc::now());

        if let Some(sink) = &self.sink {
            let images = self.images.resolve(&report.images)?;
            match sink.submit(&report, &images) {
                Ok(accident_id) => {
                    info!(report_id = %report.id, %accident_id, "report forwarded to backend")
                }
                Err(e) => error!(report_id = %report.id, error = %e, "error submitting report"),
            }
        }

        self.store.append(report.clone())?;
        info!(
            report_id = %report.id,
            parties = report.parties_involved,
            images = report.images.len(),
            "report accepted"
        );
        Ok(report)
    }
}
