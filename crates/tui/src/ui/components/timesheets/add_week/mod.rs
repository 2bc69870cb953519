mod add_week_component;
mod state;

pub use add_week_component::AddWeekComponent;
pub use state::AddWeekState;
