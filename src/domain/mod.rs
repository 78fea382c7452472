pub mod draft;
pub mod errors;
pub mod listing;
pub mod parties;
pub mod report;

pub use draft::ReportDraft;
pub use errors::FormError;
pub use listing::ListView;
pub use parties::{PartyDetail, PartyField, PartyForm};
pub use report::{Coordinates, Cost, ImageHandle, NewReport, Report, Weather};
