// src/domain/report.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::FormError;
use crate::domain::parties::PartyDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rainy,
    Snowy,
    Foggy,
    Windy,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Rainy,
        Weather::Snowy,
        Weather::Foggy,
        Weather::Windy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rainy => "Rainy",
            Weather::Snowy => "Snowy",
            Weather::Foggy => "Foggy",
            Weather::Windy => "Windy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|w| w.as_str() == s.trim())
            .ok_or_else(|| FormError::invalid("weatherCondition", format!("unknown condition {s:?}")))
    }
}

/// Estimated damage in whole cents. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(i64);

impl Cost {
    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents >= 0).then_some(Cost(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses what a `type="number" step="0.01" min="0"` input submits:
    /// digits, optionally followed by a dot and at most two decimals.
    pub fn parse(input: &str) -> Result<Self, FormError> {
        const FIELD: &str = "estimatedCost";

        let s = input.trim();
        if s.is_empty() {
            return Err(FormError::Missing(FIELD));
        }
        if s.starts_with('-') {
            return Err(FormError::invalid(FIELD, "must not be negative"));
        }

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(FormError::invalid(FIELD, format!("{s:?} is not a number")));
        }
        if frac.len() > 2 {
            return Err(FormError::invalid(FIELD, "at most two decimal places"));
        }

        let too_large = || FormError::invalid(FIELD, "amount is too large");
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => frac.parse().map_err(|_| too_large())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Cost)
            .ok_or_else(too_large)
    }
}

/// `$1,250.50`, or `$500` when there are no cents.
impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.0 / 100).to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        match self.0 % 100 {
            0 => write!(f, "${grouped}"),
            cents => write!(f, "${grouped}.{cents:02}"),
        }
    }
}

/// Opaque reference to an uploaded photo held by the image store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FormError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FormError::invalid("latitude", "must be between -90 and 90"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FormError::invalid("longitude", "must be between -180 and 180"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A validated submission that has not been accepted yet:
/// no identifier, no creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub parties_involved: u32,
    pub estimated_cost: Cost,
    pub location: String,
    pub weather: Weather,
    pub description: String,
    pub images: Vec<ImageHandle>,
    pub coordinates: Option<Coordinates>,
    pub party_details: Vec<PartyDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub parties_involved: u32,
    pub estimated_cost: Cost,
    pub location: String,
    #[serde(rename = "weatherCondition")]
    pub weather: Weather,
    pub description: String,
    pub images: Vec<ImageHandle>,
    pub coordinates: Option<Coordinates>,
    pub party_details: Vec<PartyDetail>,
}

impl Report {
    /// Stamps a submission with a fresh v4 identifier and its creation time.
    pub fn accept(new: NewReport, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at,
            date: new.date,
            time: new.time,
            parties_involved: new.parties_involved,
            estimated_cost: new.estimated_cost,
            location: new.location,
            weather: new.weather,
            description: new.description,
            images: new.images,
            coordinates: new.coordinates,
            party_details: new.party_details,
        }
    }

    pub fn occurred_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// "January 1, 2024"
    pub fn created_label(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }

    /// "Jan 1, 2024, 10:00 AM"
    pub fn occurred_label(&self) -> String {
        self.occurred_at().format("%b %-d, %Y, %-I:%M %p").to_string()
    }
}
