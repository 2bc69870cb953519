use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::Borders,
};
use visadesk_types::Effect;

use super::VerticalNavBarState;
use crate::{
    app::App,
    ui::{
        components::{Component, find_target_index_by_mouse_position},
        theme::theme_helpers::{self as th, ButtonRenderOptions, render_button},
    },
};

/// Renders a vertical column of route buttons with selection styling.
#[derive(Debug, Default)]
pub struct VerticalNavBarComponent {
    /// Optional title for the surrounding block. When `None`, no title is shown.
    pub title: Option<String>,
}

impl VerticalNavBarComponent {
    pub fn new() -> Self {
        Self {
            title: Some("Views".to_string()),
        }
    }
}

impl Component for VerticalNavBarComponent {
    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let VerticalNavBarState {
            last_area, per_item_areas, ..
        } = &app.nav_bar;
        let Some(idx) = find_target_index_by_mouse_position(last_area, per_item_areas, mouse.column, mouse.row) else {
            return Vec::new();
        };
        match app.nav_bar.route_at(idx) {
            Some(route) if route != app.current_route => vec![Effect::SwitchTo(route)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(th::block(theme, self.title.as_deref(), false), area);
        if app.nav_bar.items.is_empty() {
            return;
        }

        let item_rects = self.get_preferred_layout(app, area);
        for (index, item) in app.nav_bar.items.iter().enumerate() {
            let is_selected = index == app.nav_bar.selected_index;
            if let Some(row_area) = item_rects.get(index).copied() {
                let borders = if is_selected { Borders::ALL } else { Borders::NONE };
                render_button(
                    frame,
                    row_area,
                    &item.icon,
                    theme,
                    ButtonRenderOptions::new(true, is_selected, is_selected, borders),
                );
            }
        }
        app.nav_bar.last_area = area;
        app.nav_bar.per_item_areas = item_rects;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" F1-F3", " Switch view ")])
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let row_count = app.nav_bar.items.len();
        let mut constraints = vec![Constraint::Length(3); row_count];
        constraints.push(Constraint::Min(0));
        let mut layout = Layout::vertical(constraints).margin(1).split(area).to_vec();
        layout.truncate(row_count);
        layout
    }
}
