use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use visadesk_engine::{FieldKey, FieldOutcome, MIN_QUERY_CHARS, Panel};
use visadesk_types::{Effect, Notice};

use crate::{
    app::{App, DEFAULT_WORK_SITE},
    ui::{
        components::{Component, common::text_input::display_width, find_target_index_by_mouse_position},
        theme::theme_helpers as th,
    },
};

/// Work site picker backed by the city/state search field.
#[derive(Debug, Default)]
pub struct LocationComponent {
    input_area: Rect,
    panel_area: Rect,
    row_areas: Vec<Rect>,
}

/// Pushes a commit to the owner and reports it.
fn apply_outcome(app: &mut App, outcome: FieldOutcome) -> Vec<Effect> {
    let FieldOutcome::Commit(value) = outcome else {
        return Vec::new();
    };
    let notice = if value.is_empty() {
        Notice::info("Work site cleared")
    } else {
        Notice::success(format!("Work site set to {value}"))
    };
    app.set_work_site(value);
    vec![Effect::Notify(notice)]
}

impl LocationComponent {
    fn reset_to_default(app: &mut App) -> Vec<Effect> {
        app.set_work_site(DEFAULT_WORK_SITE.to_string());
        app.location.external_value_changed(DEFAULT_WORK_SITE);
        vec![Effect::Notify(Notice::info(format!("Work site reset to {DEFAULT_WORK_SITE}")))]
    }

    fn handle_focused_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let field = &mut app.location;
        let outcome = match key.code {
            KeyCode::Up => field.key(FieldKey::Up),
            KeyCode::Down => field.key(FieldKey::Down),
            KeyCode::Enter => field.key(FieldKey::Enter),
            KeyCode::Esc => field.key(FieldKey::Escape),
            KeyCode::Backspace => field.backspace(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => field.clear(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => field.insert_char(c),
            _ => FieldOutcome::None,
        };
        apply_outcome(app, outcome)
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect, app: &App) -> Vec<Rect> {
        let theme = &*app.ctx.theme;
        let message = match app.location.panel() {
            Panel::Closed => return Vec::new(),
            Panel::TypeMore => format!("Type at least {MIN_QUERY_CHARS} characters to search"),
            Panel::NoResults => "No matching cities".to_string(),
            Panel::Results(matches) => {
                let block = th::block(theme, Some("Suggestions"), true);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let mut rows = Vec::with_capacity(matches.len());
                for (index, location) in matches.iter().enumerate().take(inner.height as usize) {
                    let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
                    let style = if app.location.highlight() == Some(index) {
                        th::table_selected_style(theme)
                    } else {
                        Style::default()
                    };
                    let line = Line::from(vec![
                        Span::styled(location.label(), theme.text_primary_style()),
                        Span::styled(format!("  {}", location.state), theme.text_muted_style()),
                    ]);
                    frame.render_widget(Paragraph::new(line).style(style), row);
                    rows.push(row);
                }
                return rows;
            }
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(theme.text_muted_style())
                .block(th::block(theme, Some("Suggestions"), false)),
            area,
        );
        Vec::new()
    }
}

impl Component for LocationComponent {
    fn on_route_enter(&mut self, app: &mut App) -> Vec<Effect> {
        app.location.external_value_changed(app.work_site.clone());
        Vec::new()
    }

    fn on_route_exit(&mut self, app: &mut App) -> Vec<Effect> {
        app.location.click_outside();
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Self::reset_to_default(app);
        }
        if app.location.is_focused() {
            return Self::handle_focused_key(app, key);
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('/') | KeyCode::Char('i') => {
                app.location.focus();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let row_index = find_target_index_by_mouse_position(&self.panel_area, &self.row_areas, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(index) = row_index {
                    app.location.hover(index);
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = row_index {
                    let outcome = app.location.select(index);
                    return apply_outcome(app, outcome);
                }
                if self.input_area.contains(Position::new(mouse.column, mouse.row)) {
                    app.location.focus();
                } else {
                    app.location.click_outside();
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn captures_text(&self, app: &App) -> bool {
        app.location.is_focused()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [intro_area, input_area, panel_area] = self.get_preferred_layout(app, rect)[..] else {
            return;
        };
        let theme = &*app.ctx.theme;
        let focused = app.location.is_focused();

        let committed = if app.work_site.is_empty() { "none" } else { app.work_site.as_str() };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled("Search US cities for the H1B work site.", theme.text_secondary_style())),
                Line::from(vec![
                    Span::styled("Committed: ", th::table_header_style(theme)),
                    Span::styled(committed, theme.accent_primary_style()),
                ]),
            ]),
            intro_area,
        );

        let input_block = th::block(theme, Some("City, State"), focused);
        let text_area = input_block.inner(input_area);
        let query = app.location.query();
        let content = if query.is_empty() && !focused {
            Span::styled("Start typing a city...", theme.text_muted_style())
        } else {
            Span::styled(query, th::input_style(theme, true, focused))
        };
        frame.render_widget(Paragraph::new(Line::from(content)).block(input_block), input_area);
        if focused {
            frame.set_cursor_position((text_area.x + display_width(query), text_area.y));
        }

        self.row_areas = self.render_panel(frame, panel_area, app);
        self.input_area = input_area;
        self.panel_area = panel_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = if app.location.is_focused() {
            &[(" ↑/↓", " Highlight "), ("Enter", " Select "), ("Ctrl+U", " Clear "), ("Esc", " Done ")]
        } else {
            &[(" Enter", " Edit "), ("Ctrl+R", " Reset to default ")]
        };
        th::build_hint_spans(&*app.ctx.theme, hints)
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(2), // Intro
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Suggestions
        ])
        .split(area)
        .to_vec()
    }
}
