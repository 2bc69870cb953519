//! Component system for the Visadesk TUI.
//!
//! Components are self-contained UI elements that handle their own events
//! and rendering while integrating with the application through a consistent
//! interface. They never mutate routing or modal state directly; instead they
//! return [`Effect`]s which the runtime executes.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use visadesk_types::{Effect, Msg};

use crate::app::App;

/// A trait representing a UI component with its own behavior.
///
/// # Component Lifecycle
///
/// 1. **Route entry**: `on_route_enter()` runs when the component becomes the active view
/// 2. **Event Handling**: keys, mouse events and messages arrive through the `handle_*` methods
/// 3. **Rendering**: `render()` draws the component into the provided frame area
/// 4. **Route exit**: `on_route_exit()` runs before the component is dropped
pub(crate) trait Component {
    /// Handle an application message routed to this component.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component is the active view or modal.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events; components do their own hit testing against the
    /// areas recorded during the last render.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn on_route_enter(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    fn on_route_exit(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    /// Returns `true` while a text field owned by the component has focus, in
    /// which case printable keys must not trigger global shortcuts.
    fn captures_text(&self, _app: &App) -> bool {
        false
    }

    /// Render the component into the given area.
    ///
    /// Implementations should only draw and record hit-test areas; state
    /// changes belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        vec![area]
    }
}

/// Finds the index of the row containing `(x, y)`, if the point lies in `container`.
pub(crate) fn find_target_index_by_mouse_position(container: &Rect, rows: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = ratatui::layout::Position::new(x, y);
    if !container.contains(position) {
        return None;
    }
    rows.iter().position(|row| row.contains(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_position_maps_to_row() {
        let container = Rect::new(0, 0, 20, 10);
        let rows = vec![Rect::new(1, 1, 18, 1), Rect::new(1, 2, 18, 1)];
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 5, 2), Some(1));
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 5, 5), None);
        assert_eq!(find_target_index_by_mouse_position(&container, &rows, 30, 1), None);
    }
}
