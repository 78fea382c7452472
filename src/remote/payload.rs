use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::domain::{PartyDetail, Report};

/// JSON body posted to the accident backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccidentPayload {
    /// The backend assigns the real identifier; always 0 on send.
    pub accident_id: i64,
    pub location: String,
    pub accident_date: String,
    pub weather: String,
    pub daylight: String,
    pub estimated_cost: f64,
    pub number_of_parties: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub parties: Vec<PartyPayload>,
    pub event_data: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyPayload {
    pub accident_id: String,
    pub license: String,
    pub last_name: String,
    pub first_name: String,
    pub address: String,
    pub phone: String,
    pub remarks: String,
    pub insurance_provider: String,
    pub insurance_number: String,
}

impl AccidentPayload {
    pub fn from_report(report: &Report, cfg: &RemoteConfig) -> Self {
        let (latitude, longitude) = report
            .coordinates
            .map(|c| (c.latitude, c.longitude))
            .unwrap_or((0.0, 0.0));

        Self {
            accident_id: 0,
            location: report.location.clone(),
            accident_date: format!(
                "{}T{}:00.000Z",
                report.date.format("%Y-%m-%d"),
                report.time.format("%H:%M")
            ),
            weather: report.weather.to_string(),
            daylight: cfg.daylight.clone(),
            estimated_cost: report.estimated_cost.as_f64(),
            number_of_parties: report.parties_involved,
            latitude,
            longitude,
            parties: report
                .party_details
                .iter()
                .map(|p| PartyPayload::from_detail(p, &cfg.party_accident_id))
                .collect(),
            event_data: cfg.event_data.clone(),
            description: report.description.clone(),
        }
    }
}

impl PartyPayload {
    fn from_detail(detail: &PartyDetail, accident_id: &str) -> Self {
        Self {
            accident_id: accident_id.to_string(),
            license: detail.drivers_license.clone(),
            last_name: detail.last_name.clone(),
            first_name: detail.first_name.clone(),
            address: detail.address.clone(),
            phone: detail.phone.clone(),
            remarks: detail.remarks.clone(),
            insurance_provider: detail.insurance_provider.clone(),
            insurance_number: detail.insurance_number.clone(),
        }
    }
}

/// Backend reply to the report post. The identifier may come back as a
/// number or a string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccident {
    pub accident_id: serde_json::Value,
}

impl CreatedAccident {
    pub fn id_text(&self) -> String {
        match &self.accident_id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
