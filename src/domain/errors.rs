use thiserror::Error;

/// Validation failures for the report form and the party details modal.
///
/// Field names are the HTML input names so the message points at the
/// control that needs fixing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// `party` is 1-based, matching the "Party N" headings.
    #[error("party {party}: missing required field `{field}`")]
    PartyFieldMissing { party: usize, field: &'static str },

    #[error("number of parties must be at least 1")]
    NoParties,
}

impl FormError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FormError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
