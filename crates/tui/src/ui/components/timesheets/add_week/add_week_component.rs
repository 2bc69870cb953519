use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tracing::debug;
use visadesk_types::{Effect, FormField, Notice};
use visadesk_util::format_week_range;

use crate::{
    app::App,
    ui::{components::Component, theme::theme_helpers as th},
};

const PLACEHOLDERS: [&str; 3] = ["YYYY-MM-DD", "YYYY-MM-DD", "40"];

/// Modal form creating a new draft week.
#[derive(Debug, Default)]
pub struct AddWeekComponent {
    input_areas: Vec<Rect>,
}

impl AddWeekComponent {
    fn submit(app: &mut App) -> Vec<Effect> {
        let form = app.add_week.form();
        match app.manager.book.add_week(&form) {
            Ok(week_id) => {
                debug!(week = %week_id, "week added from form");
                let label = app
                    .manager
                    .book
                    .week(week_id)
                    .map(|week| format_week_range(week.week_start, week.week_end))
                    .unwrap_or_default();
                app.add_week.reset();
                app.timesheets.select_week(0);
                vec![Effect::CloseModal, Effect::Notify(Notice::success(format!("Added week {label}")))]
            }
            Err(error) => {
                let message = error.to_string();
                app.add_week.error = Some(message.clone());
                vec![Effect::Notify(Notice::error(message))]
            }
        }
    }
}

impl Component for AddWeekComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                app.add_week.reset();
                vec![Effect::CloseModal]
            }
            KeyCode::Enter => Self::submit(app),
            KeyCode::Tab | KeyCode::Down => {
                app.add_week.focus_next();
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.add_week.focus_prev();
                Vec::new()
            }
            _ => {
                if app.add_week.focused_input().handle_edit_key(key) {
                    app.add_week.error = None;
                }
                Vec::new()
            }
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);
        if let Some(index) = self.input_areas.iter().position(|area| area.contains(position)) {
            app.add_week.focused = index;
        }
        Vec::new()
    }

    fn captures_text(&self, _app: &App) -> bool {
        true
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Add Week"), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let layout = self.get_preferred_layout(app, inner);
        let mut input_areas = Vec::with_capacity(FormField::ALL.len());
        for (index, field) in FormField::ALL.iter().enumerate() {
            let Some(area) = layout.get(index).copied() else {
                continue;
            };
            let focused = index == app.add_week.focused;
            let input = &app.add_week.inputs[index];
            let missing = app.add_week.error.is_some() && input.is_empty();
            let field_block = th::block(theme, Some(field.label()), focused);
            let text_area = field_block.inner(area);
            let content = if input.is_empty() && !focused {
                Span::styled(PLACEHOLDERS[index], theme.text_muted_style())
            } else {
                Span::styled(input.input().to_string(), th::input_style(theme, !missing, focused))
            };
            frame.render_widget(Paragraph::new(Line::from(content)).block(field_block), area);
            if focused {
                frame.set_cursor_position((text_area.x + input.cursor_columns(), text_area.y));
            }
            input_areas.push(area);
        }
        self.input_areas = input_areas;

        if let (Some(error), Some(area)) = (app.add_week.error.as_deref(), layout.get(3).copied()) {
            frame.render_widget(
                Paragraph::new(error).style(theme.status_error()).wrap(Wrap { trim: true }),
                area,
            );
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(
            &*app.ctx.theme,
            &[("Tab", " Next field "), ("Enter", " Add "), ("Esc", " Cancel")],
        )
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Week start
            Constraint::Length(3), // Week end
            Constraint::Length(3), // Total hours
            Constraint::Min(1),    // Error
        ])
        .split(area)
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use visadesk_engine::{FixedClock, TimesheetManager};
    use visadesk_registry::LocationRegistry;
    use visadesk_types::{Severity, TimesheetStatus};
    use visadesk_util::UserPreferences;

    use super::*;
    use crate::app::SharedCtx;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
        App::new(SharedCtx::new(Arc::new(UserPreferences::ephemeral())), registry, manager)
    }

    fn type_text(component: &mut AddWeekComponent, app: &mut App, text: &str) {
        for c in text.chars() {
            component.handle_key_events(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press(component: &mut AddWeekComponent, app: &mut App, code: KeyCode) -> Vec<Effect> {
        component.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn valid_form_prepends_draft_week() {
        let mut app = app();
        let mut component = AddWeekComponent::default();
        type_text(&mut component, &mut app, "2024-01-22");
        press(&mut component, &mut app, KeyCode::Tab);
        type_text(&mut component, &mut app, "2024-01-28");
        press(&mut component, &mut app, KeyCode::Tab);
        type_text(&mut component, &mut app, "40");
        let effects = press(&mut component, &mut app, KeyCode::Enter);

        assert_eq!(effects.first(), Some(&Effect::CloseModal));
        let newest = &app.manager.book.weeks()[0];
        assert_eq!(newest.status, TimesheetStatus::Draft);
        assert_eq!(newest.total_hours, 40);
        assert!(newest.documents.is_empty());
        assert_eq!(app.manager.book.weeks().len(), 4);
    }

    #[test]
    fn missing_field_keeps_modal_open() {
        let mut app = app();
        let mut component = AddWeekComponent::default();
        type_text(&mut component, &mut app, "2024-01-22");
        let effects = press(&mut component, &mut app, KeyCode::Enter);

        assert!(matches!(&effects[..], [Effect::Notify(notice)] if notice.severity == Severity::Error));
        assert!(app.add_week.error.as_deref().is_some_and(|error| error.starts_with("Please fill in all fields")));
        assert_eq!(app.manager.book.weeks().len(), 3);
    }
}
