//! Weekly timesheet views: the week list and its modals.

mod add_week;
mod document_details_component;
mod state;
mod timesheets_component;
mod upload;

pub use add_week::{AddWeekComponent, AddWeekState};
pub use document_details_component::DocumentDetailsComponent;
pub use state::{TimesheetsPane, TimesheetsState};
pub use timesheets_component::TimesheetsComponent;
pub use upload::{UploadComponent, UploadState};
