// geocoding.rs
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::GeocodingConfig;
use crate::domain::Coordinates;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding is not configured")]
    NotConfigured,
    #[error("geocoding request failed: {0}")]
    Network(String),
    #[error("geocoder answered HTTP {0}")]
    Http(u16),
    #[error("geocoder status {0}")]
    Status(String),
    #[error("could not decode geocoder response: {0}")]
    Decode(String),
}

/// A resolved address.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

/// Resolves free-text searches and map points to a single address.
pub trait Geocoder: Send + Sync {
    fn search(&self, query: &str) -> Result<Option<Place>, GeocodeError>;
    fn reverse(&self, at: Coordinates) -> Result<Option<Place>, GeocodeError>;
}

/// Google Geocoding web service.
pub struct GoogleGeocoder {
    client: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    pub fn new(cfg: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let endpoint = Url::parse(&cfg.endpoint).map_err(|e| GeocodeError::Network(e.to_string()))?;
        let client = Client::builder()
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: cfg.api_key.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn request_url(&self, key: &str, value: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(key, value)
            .append_pair("key", &self.api_key);
        url
    }

    fn lookup(&self, key: &str, value: &str) -> Result<Option<Place>, GeocodeError> {
        if !self.is_configured() {
            return Err(GeocodeError::NotConfigured);
        }

        let resp = self
            .client
            .get(self.request_url(key, value))
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(GeocodeError::Http(resp.status().as_u16()));
        }

        let body: GeocodeResponse = resp
            .json()
            .map_err(|e| GeocodeError::Decode(e.to_string()))?;
        first_place(body)
    }
}

fn first_place(body: GeocodeResponse) -> Result<Option<Place>, GeocodeError> {
    match body.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Ok(None),
        _ => return Err(GeocodeError::Status(body.status)),
    }

    let Some(first) = body.results.into_iter().next() else {
        return Ok(None);
    };
    let coordinates = Coordinates::new(first.geometry.location.lat, first.geometry.location.lng)
        .map_err(|e| GeocodeError::Decode(e.to_string()))?;

    Ok(Some(Place {
        formatted_address: first.formatted_address,
        coordinates,
    }))
}

impl Geocoder for GoogleGeocoder {
    fn search(&self, query: &str) -> Result<Option<Place>, GeocodeError> {
        self.lookup("address", query)
    }

    fn reverse(&self, at: Coordinates) -> Result<Option<Place>, GeocodeError> {
        self.lookup("latlng", &format!("{},{}", at.latitude, at.longitude))
    }
}
