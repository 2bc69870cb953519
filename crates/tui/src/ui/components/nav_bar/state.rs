use ratatui::layout::Rect;
use visadesk_types::Route;

/// A single item in the vertical navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Short text rendered inside the button.
    pub icon: String,
    /// Route associated with this item
    pub route: Route,
}

impl NavItem {
    pub fn new(icon: impl Into<String>, route: Route) -> Self {
        Self { icon: icon.into(), route }
    }
}

/// State for the vertical navigation bar.
#[derive(Debug, Default, Clone)]
pub struct VerticalNavBarState {
    /// Items displayed in the navigation bar.
    pub items: Vec<NavItem>,
    /// Index of the currently selected item.
    pub selected_index: usize,
    /// Last rendered area of the nav bar; used for hit testing.
    pub last_area: Rect,
    /// Last computed per-item row areas for hit testing.
    pub per_item_areas: Vec<Rect>,
}

impl VerticalNavBarState {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Creates a nav bar with one item per route, in route order.
    pub fn defaults_for_views() -> Self {
        Self::new(vec![
            NavItem::new("[Home]", Route::Dashboard),
            NavItem::new("[Hrs]", Route::Timesheets),
            NavItem::new("[Site]", Route::Location),
        ])
    }

    pub fn set_route(&mut self, route: Route) -> Route {
        if let Some(idx) = self.items.iter().position(|item| item.route == route) {
            self.selected_index = idx;
        }
        route
    }

    pub fn route_at(&self, index: usize) -> Option<Route> {
        self.items.get(index).map(|item| item.route)
    }

    /// Route after (or before) the selected one, wrapping around.
    pub fn cycle(&self, forward: bool) -> Option<Route> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let index = if forward {
            (self.selected_index + 1) % len
        } else {
            (self.selected_index + len - 1) % len
        };
        self.route_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_in_both_directions() {
        let mut state = VerticalNavBarState::defaults_for_views();
        assert_eq!(state.cycle(false), Some(Route::Location));
        state.set_route(Route::Location);
        assert_eq!(state.cycle(true), Some(Route::Dashboard));
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn empty_bar_has_no_routes() {
        assert_eq!(VerticalNavBarState::default().cycle(true), None);
    }
}
