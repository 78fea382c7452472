// src/domain/draft.rs

use chrono::{NaiveDate, NaiveTime};

use crate::domain::errors::FormError;
use crate::domain::parties::{check_party_count, PartyDetail};
use crate::domain::report::{Coordinates, Cost, ImageHandle, NewReport, Weather};
use crate::forms::FormFields;

/// Input names posted by the report form.
pub mod fields {
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const PARTIES_INVOLVED: &str = "partiesInvolved";
    pub const ESTIMATED_COST: &str = "estimatedCost";
    pub const LOCATION: &str = "location";
    pub const WEATHER: &str = "weatherCondition";
    pub const DESCRIPTION: &str = "description";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}

/// Everything a visitor has entered into the report form that is not a
/// plain input value: photos, saved party details, the picked location.
///
/// The running party count is tracked separately from the saved party
/// details and the two are never reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    images: Vec<ImageHandle>,
    party_details: Vec<PartyDetail>,
    party_count: u32,
    location: String,
    coordinates: Option<Coordinates>,
}

impl ReportDraft {
    pub fn new(default_party_count: u32) -> Self {
        Self {
            images: Vec::new(),
            party_details: Vec::new(),
            party_count: default_party_count,
            location: String::new(),
            coordinates: None,
        }
    }

    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    pub fn party_details(&self) -> &[PartyDetail] {
        &self.party_details
    }

    pub fn party_count(&self) -> u32 {
        self.party_count
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Upload and camera capture both land here. Photos are never removed.
    pub fn add_images(&mut self, handles: impl IntoIterator<Item = ImageHandle>) {
        self.images.extend(handles);
    }

    pub fn set_party_count(&mut self, count: u32) {
        self.party_count = count;
    }

    pub fn save_party_details(&mut self, details: Vec<PartyDetail>) {
        self.party_details = details;
    }

    pub fn set_location(&mut self, location: impl Into<String>, coordinates: Option<Coordinates>) {
        self.location = location.into();
        self.coordinates = coordinates;
    }

    /// "Details added for 2 parties", once anything has been saved.
    pub fn party_summary(&self) -> Option<String> {
        match self.party_details.len() {
            0 => None,
            1 => Some("Details added for 1 party".to_string()),
            n => Some(format!("Details added for {n} parties")),
        }
    }

    /// Drops what `submitted` (the draft as it was when the report was
    /// built) carried into the report. Photos added and details saved
    /// since then stay for the next report.
    pub fn clear_submitted(&mut self, submitted: &ReportDraft, default_party_count: u32) {
        // Photos are append-only, so the submitted ones are a prefix.
        if self.images.starts_with(&submitted.images) {
            self.images.drain(..submitted.images.len());
        }
        if self.party_details == submitted.party_details {
            self.party_details.clear();
        }
        if self.party_count == submitted.party_count {
            self.party_count = default_party_count;
        }
        if self.location == submitted.location && self.coordinates == submitted.coordinates {
            self.location.clear();
            self.coordinates = None;
        }
    }

    /// Validates the posted form and assembles the report it describes.
    ///
    /// The draft keeps its state; the caller resets it once the report
    /// has been accepted.
    pub fn submit(&self, form: &FormFields) -> Result<NewReport, FormError> {
        let date = NaiveDate::parse_from_str(required(form, fields::DATE)?, "%Y-%m-%d")
            .map_err(|e| FormError::invalid(fields::DATE, e.to_string()))?;

        let time_raw = required(form, fields::TIME)?;
        let time = NaiveTime::parse_from_str(time_raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time_raw, "%H:%M:%S"))
            .map_err(|e| FormError::invalid(fields::TIME, e.to_string()))?;

        let parties_involved = required(form, fields::PARTIES_INVOLVED)?
            .parse::<u32>()
            .map_err(|e| FormError::invalid(fields::PARTIES_INVOLVED, e.to_string()))?;
        let parties_involved = check_party_count(parties_involved, fields::PARTIES_INVOLVED)?;

        let estimated_cost = Cost::parse(required(form, fields::ESTIMATED_COST)?)?;
        let location = required(form, fields::LOCATION)?.to_string();
        let weather: Weather = required(form, fields::WEATHER)?.parse()?;
        let description = required(form, fields::DESCRIPTION)?.to_string();

        // Picked coordinates only describe the location they were picked for.
        let coordinates = self.coordinates.filter(|_| self.location.trim() == location);

        Ok(NewReport {
            date,
            time,
            parties_involved,
            estimated_cost,
            location,
            weather,
            description,
            images: self.images.clone(),
            coordinates,
            party_details: self.party_details.clone(),
        })
    }
}

fn required<'a>(form: &'a FormFields, name: &'static str) -> Result<&'a str, FormError> {
    form.get(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(FormError::Missing(name))
}
