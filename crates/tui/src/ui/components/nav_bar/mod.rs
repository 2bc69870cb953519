//! Vertical navigation bar component.
//!
//! Renders one button per route, highlights the active route, and switches
//! routes on click. Keyboard route switching (F1..F3, Tab) is handled by the
//! main view so it works regardless of which component is active.

mod nav_bar_component;
mod state;

pub use nav_bar_component::VerticalNavBarComponent;
pub use state::{NavItem, VerticalNavBarState};
