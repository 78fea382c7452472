// src/domain/parties.rs

use serde::{Deserialize, Serialize};

use crate::domain::errors::FormError;
use crate::forms::FormFields;

/// Contact and insurance details for one party involved in an accident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDetail {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub drivers_license: String,
    pub remarks: String,
    pub insurance_number: String,
    pub insurance_provider: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartyField {
    FirstName,
    LastName,
    Address,
    Phone,
    DriversLicense,
    InsuranceNumber,
    InsuranceProvider,
    Remarks,
}

impl PartyField {
    /// Modal display order.
    pub const ALL: [PartyField; 8] = [
        PartyField::FirstName,
        PartyField::LastName,
        PartyField::Address,
        PartyField::Phone,
        PartyField::DriversLicense,
        PartyField::InsuranceNumber,
        PartyField::InsuranceProvider,
        PartyField::Remarks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PartyField::FirstName => "firstName",
            PartyField::LastName => "lastName",
            PartyField::Address => "address",
            PartyField::Phone => "phone",
            PartyField::DriversLicense => "driversLicense",
            PartyField::InsuranceNumber => "insuranceNumber",
            PartyField::InsuranceProvider => "insuranceProvider",
            PartyField::Remarks => "remarks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartyField::FirstName => "First Name",
            PartyField::LastName => "Last Name",
            PartyField::Address => "Address",
            PartyField::Phone => "Phone",
            PartyField::DriversLicense => "Driver's License",
            PartyField::InsuranceNumber => "Insurance Number",
            PartyField::InsuranceProvider => "Insurance Provider",
            PartyField::Remarks => "Remarks",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, PartyField::Remarks)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        PartyField::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl PartyDetail {
    pub fn get(&self, field: PartyField) -> &str {
        match field {
            PartyField::FirstName => &self.first_name,
            PartyField::LastName => &self.last_name,
            PartyField::Address => &self.address,
            PartyField::Phone => &self.phone,
            PartyField::DriversLicense => &self.drivers_license,
            PartyField::InsuranceNumber => &self.insurance_number,
            PartyField::InsuranceProvider => &self.insurance_provider,
            PartyField::Remarks => &self.remarks,
        }
    }

    fn slot(&mut self, field: PartyField) -> &mut String {
        match field {
            PartyField::FirstName => &mut self.first_name,
            PartyField::LastName => &mut self.last_name,
            PartyField::Address => &mut self.address,
            PartyField::Phone => &mut self.phone,
            PartyField::DriversLicense => &mut self.drivers_license,
            PartyField::InsuranceNumber => &mut self.insurance_number,
            PartyField::InsuranceProvider => &mut self.insurance_provider,
            PartyField::Remarks => &mut self.remarks,
        }
    }
}

/// Hidden input carrying the number of parties the modal was opened for.
pub const PARTY_COUNT_FIELD: &str = "partyCount";

/// Most parties one report can describe.
pub const MAX_PARTIES: u32 = 50;

/// Accepts 1..=[`MAX_PARTIES`]. `field` names the input the count came from.
pub fn check_party_count(count: u32, field: &'static str) -> Result<u32, FormError> {
    match count {
        0 => Err(FormError::NoParties),
        n if n > MAX_PARTIES => Err(FormError::invalid(
            field,
            format!("at most {MAX_PARTIES} parties are supported"),
        )),
        n => Ok(n),
    }
}

/// Editable state of the party details modal.
///
/// Opened for a fixed number of parties, every record seeded empty.
/// Nothing here reaches the report draft until `save` succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyForm {
    parties: Vec<PartyDetail>,
}

impl PartyForm {
    pub fn new(count: u32) -> Result<Self, FormError> {
        let count = check_party_count(count, PARTY_COUNT_FIELD)?;
        Ok(Self {
            parties: vec![PartyDetail::default(); count as usize],
        })
    }

    /// Rebuilds the modal from a posted form. Inputs are named
    /// `party-{index}-{field}`; repeated inputs resolve to the last value.
    pub fn from_fields(fields: &FormFields) -> Result<Self, FormError> {
        let count = fields
            .get(PARTY_COUNT_FIELD)
            .ok_or(FormError::Missing(PARTY_COUNT_FIELD))?
            .trim()
            .parse::<u32>()
            .map_err(|e| FormError::invalid(PARTY_COUNT_FIELD, e.to_string()))?;

        let mut form = Self::new(count)?;
        for (name, value) in fields.iter() {
            if let Some((index, field)) = Self::parse_input_name(name) {
                form.set(index, field, value);
            }
        }
        Ok(form)
    }

    pub fn input_name(index: usize, field: PartyField) -> String {
        format!("party-{index}-{}", field.name())
    }

    fn parse_input_name(name: &str) -> Option<(usize, PartyField)> {
        let rest = name.strip_prefix("party-")?;
        let (index, field) = rest.split_once('-')?;
        Some((index.parse().ok()?, PartyField::from_name(field)?))
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn parties(&self) -> &[PartyDetail] {
        &self.parties
    }

    /// Returns false when `index` is outside the modal.
    pub fn set(&mut self, index: usize, field: PartyField, value: impl Into<String>) -> bool {
        match self.parties.get_mut(index) {
            Some(party) => {
                *party.slot(field) = value.into();
                true
            }
            None => false,
        }
    }

    /// Checks every required field and hands back exactly `len()` records.
    pub fn save(self) -> Result<Vec<PartyDetail>, FormError> {
        for (index, party) in self.parties.iter().enumerate() {
            for field in PartyField::ALL {
                if field.is_required() && party.get(field).trim().is_empty() {
                    return Err(FormError::PartyFieldMissing {
                        party: index + 1,
                        field: field.name(),
                    });
                }
            }
        }
        Ok(self.parties)
    }
}
