//! UI components: navigation, dashboard, work site picker, timesheets and modals.

pub mod common;
pub mod component;
pub mod dashboard;
pub mod location;
pub mod nav_bar;
pub mod timesheets;

pub use component::*;
pub use dashboard::DashboardComponent;
pub use location::LocationComponent;
pub use nav_bar::{VerticalNavBarComponent, VerticalNavBarState};
pub use timesheets::{AddWeekComponent, DocumentDetailsComponent, TimesheetsComponent, UploadComponent};
