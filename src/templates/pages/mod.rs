pub mod party_modal;
pub mod report_form;
pub mod report_list;

pub use party_modal::party_modal;
pub use report_form::{image_grid, location_picker, party_summary, report_form_page};
pub use report_list::{report_list, report_list_page};
