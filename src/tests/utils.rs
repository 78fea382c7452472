use crate::app::App;
use crate::config::Config;
use crate::domain::{Coordinates, Report};
use crate::geocoding::{GeocodeError, Geocoder, Place};
use crate::logging::init_test_logging;
use crate::remote::{AccidentSink, RemoteError};
use crate::router::handle;
use crate::store::{MemoryStore, StoredImage};
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::{Arc, Mutex};

/// Cookie header every test visitor sends.
pub const VISITOR: &str = "draft=test-visitor";

/// Answers every lookup with the same place, or fails when there is none.
pub struct StubGeocoder {
    place: Option<Place>,
}

impl StubGeocoder {
    pub fn found(address: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            place: Some(Place {
                formatted_address: address.to_string(),
                coordinates: Coordinates::new(latitude, longitude).unwrap(),
            }),
        }
    }

    pub fn failing() -> Self {
        Self { place: None }
    }

    fn answer(&self) -> Result<Option<Place>, GeocodeError> {
        self.place.clone().map(Some).ok_or(GeocodeError::NotConfigured)
    }
}

impl Geocoder for StubGeocoder {
    fn search(&self, _query: &str) -> Result<Option<Place>, GeocodeError> {
        self.answer()
    }

    fn reverse(&self, _at: Coordinates) -> Result<Option<Place>, GeocodeError> {
        self.answer()
    }
}

/// Records what was forwarded: (location, number of images).
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl AccidentSink for RecordingSink {
    fn submit(&self, report: &Report, images: &[Arc<StoredImage>]) -> Result<String, RemoteError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((report.location.clone(), images.len()));
        Ok(calls.len().to_string())
    }
}

/// Backend that is always down.
pub struct FailingSink;

impl AccidentSink for FailingSink {
    fn submit(&self, _report: &Report, _images: &[Arc<StoredImage>]) -> Result<String, RemoteError> {
        Err(RemoteError::Network {
            stage: "report",
            message: "connection refused".to_string(),
        })
    }
}

/// In-memory app with a failing geocoder and no remote backend.
pub fn init_test_app() -> App {
    init_test_app_with(None, Box::new(StubGeocoder::failing()))
}

pub fn init_test_app_with(sink: Option<Box<dyn AccidentSink>>, geocoder: Box<dyn Geocoder>) -> App {
    init_test_logging();
    App::new(Config::default(), Box::new(MemoryStore::new()), sink, geocoder)
}

pub fn get(app: &App, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", VISITOR)
        .body(Body::empty())
        .unwrap();

    handle(req, app).expect("Failed to handle request")
}

pub fn post_form(app: &App, uri: &str, body: &str) -> Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", VISITOR)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap();

    handle(req, app).expect("Failed to handle request")
}

pub fn body_text(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

/// Fills every required field for `count` parties, first names `Party{i}`.
pub fn party_form_body(count: usize) -> String {
    let mut pairs = vec![("partyCount".to_string(), count.to_string())];
    for i in 0..count {
        for (field, value) in [
            ("firstName", format!("Party{i}")),
            ("lastName", "Doe".to_string()),
            ("address", "1 Elm St".to_string()),
            ("phone", "555-0100".to_string()),
            ("driversLicense", format!("DL{i}")),
            ("insuranceNumber", format!("INS{i}")),
            ("insuranceProvider", "Acme".to_string()),
        ] {
            pairs.push((format!("party-{i}-{field}"), value));
        }
    }
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

pub const REPORT_BODY: &str = "date=2024-01-01&time=10%3A00&partiesInvolved=2&estimatedCost=500.00\
&location=123+Main+St&weatherCondition=Rainy&description=Rear-ended+at+a+light";
