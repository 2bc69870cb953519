use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Clear, Paragraph},
};
use visadesk_types::{Effect, Modal, Msg, Route};

use super::{
    components::{
        AddWeekComponent, Component, DashboardComponent, DocumentDetailsComponent, LocationComponent, TimesheetsComponent,
        UploadComponent, VerticalNavBarComponent, common::ConfirmationModal,
    },
    theme::theme_helpers as th,
    utils::{centered_min_max, centered_rect},
};
use crate::app::App;

pub struct ModalLayout(Box<dyn Fn(Rect) -> Rect>);

impl std::fmt::Debug for ModalLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalLayout")
    }
}

type ModalView = (Box<dyn Component>, ModalLayout);

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Component")
    }
}

#[derive(Default, Debug)]
pub struct MainView {
    /// Current main view component
    pub content_view: Option<Box<dyn Component>>,
    /// Main view for the nav bar
    pub nav_bar_view: VerticalNavBarComponent,
    /// Currently open modal component
    pub modal_view: Option<ModalView>,
}

impl MainView {
    pub fn new(content_view: Option<Box<dyn Component>>) -> Self {
        Self {
            content_view,
            modal_view: None,
            nav_bar_view: VerticalNavBarComponent::new(),
        }
    }

    /// Replaces the content view with the component for `route`.
    ///
    /// Not intended to be called directly; return `Effect::SwitchTo` instead
    /// so the runtime runs the exit and enter hooks around the swap.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) {
        let view: Box<dyn Component> = match route {
            Route::Dashboard => Box::new(DashboardComponent),
            Route::Timesheets => Box::new(TimesheetsComponent),
            Route::Location => Box::new(LocationComponent::default()),
        };
        app.current_route = app.nav_bar.set_route(route);
        self.content_view = Some(view);
    }

    /// Update the open modal kind (use None to clear).
    pub fn set_open_modal_kind(&mut self, app: &mut App, modal: Option<Modal>) {
        self.modal_view = modal.map(|modal_kind| -> ModalView {
            match modal_kind {
                Modal::AddWeek => (
                    Box::new(AddWeekComponent::default()),
                    ModalLayout(Box::new(|rect| {
                        centered_min_max(45, 60, Rect::new(0, 0, 50, 17), Rect::new(0, 0, 80, 20), rect)
                    })),
                ),
                Modal::Upload => (
                    Box::new(UploadComponent),
                    ModalLayout(Box::new(|rect| {
                        centered_min_max(70, 50, Rect::new(0, 0, 60, 13), Rect::new(0, 0, 120, 16), rect)
                    })),
                ),
                Modal::ConfirmDelete => (
                    Box::new(ConfirmationModal::default()),
                    ModalLayout(Box::new(|rect| {
                        centered_min_max(45, 35, Rect::new(0, 0, 50, 10), Rect::new(0, 0, 90, 12), rect)
                    })),
                ),
                Modal::DocumentDetails => (
                    Box::new(DocumentDetailsComponent),
                    ModalLayout(Box::new(|rect| centered_rect(60, 50, rect))),
                ),
            }
        });
        app.open_modal_kind = modal;
    }

    fn is_capturing_text(&self, app: &App) -> bool {
        match self.modal_view.as_ref() {
            Some((modal, _)) => modal.captures_text(app),
            None => self.content_view.as_ref().is_some_and(|content| content.captures_text(app)),
        }
    }

    fn switch_to(app: &App, route: Route) -> Vec<Effect> {
        if route == app.current_route {
            return Vec::new();
        }
        vec![Effect::SwitchTo(route)]
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        let mut effects = app.update(&msg);
        let target = match self.modal_view.as_mut() {
            Some((modal, _)) => Some(modal),
            None => self.content_view.as_mut(),
        };
        if let Some(target) = target {
            effects.extend(target.handle_message(app, msg));
        }
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(target) = self.modal_view.as_mut() {
            return target.0.handle_key_events(app, key);
        }

        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Notify(app.cycle_theme())];
        }

        match key.code {
            KeyCode::F(n @ 1..=3) => return Self::switch_to(app, Route::ALL[usize::from(n) - 1]),
            KeyCode::Tab | KeyCode::BackTab if !self.is_capturing_text(app) => {
                let forward = key.code == KeyCode::Tab;
                return app
                    .nav_bar
                    .cycle(forward)
                    .map(|route| Self::switch_to(app, route))
                    .unwrap_or_default();
            }
            KeyCode::Char('q') if key.modifiers.is_empty() && !self.is_capturing_text(app) => return vec![Effect::Quit],
            _ => {}
        }

        if let Some(content) = self.content_view.as_mut() {
            return content.handle_key_events(app, key);
        }

        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some(target) = self.modal_view.as_mut() {
            return target.0.handle_mouse_events(app, mouse);
        }

        let mut effects = self.nav_bar_view.handle_mouse_events(app, mouse);
        effects.extend(
            self.content_view
                .as_mut()
                .map(|c| c.handle_mouse_events(app, mouse))
                .unwrap_or_default(),
        );
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = self.get_preferred_layout(app, area);
        self.nav_bar_view.render(frame, layout[0], app);
        if let Some(current) = self.content_view.as_mut() {
            current.render(frame, layout[1], app);
        }

        if let Some(notice) = app.notice.as_ref() {
            let theme = &*app.ctx.theme;
            let line = Line::from(vec![
                Span::styled(format!(" {} ", app.current_route.title()), theme.text_muted_style()),
                Span::styled(notice.message.as_str(), theme.severity_style(notice.severity)),
            ]);
            frame.render_widget(Paragraph::new(line), layout[2]);
        }

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans)).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints_widget, layout[3]);

        if let Some((modal, position)) = self.modal_view.as_mut() {
            render_overlay(frame, app);
            let modal_area = position.0(area);
            frame.render_widget(Clear, modal_area);

            let modal_hints = modal.get_hint_spans(app);
            if !modal_hints.is_empty() {
                let splits = Layout::vertical([
                    Constraint::Percentage(100), // Modal body
                    Constraint::Length(1),       // Modal hints bar
                ])
                .split(modal_area);
                let hints_widget = Paragraph::new(Line::from(modal_hints))
                    .style(app.ctx.theme.text_muted_style())
                    .bg(app.ctx.theme.roles().background);
                frame.render_widget(hints_widget, splits[1]);
                modal.render(frame, splits[0], app);
            } else {
                modal.render(frame, modal_area, app);
            }
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hint_spans: Vec<Span> = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        if let Some(content) = self.content_view.as_ref() {
            hint_spans.extend(content.get_hint_spans(app));
        }
        hint_spans.extend(self.nav_bar_view.get_hint_spans(app));
        let global: &[(&str, &str)] = if self.is_capturing_text(app) {
            &[("Ctrl+T", " Theme ")]
        } else {
            &[("Ctrl+T", " Theme "), ("q", " Quit ")]
        };
        hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, global));
        hint_spans
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        let outer_areas = Layout::horizontal([
            Constraint::Length(10), // Nav bar width
            Constraint::Min(1),     // Wrapper
        ])
        .split(area);
        let content_areas = Layout::vertical([
            Constraint::Min(1),    // Main view
            Constraint::Length(1), // Notice line
            Constraint::Length(1), // Hints
        ])
        .split(outer_areas[1]);

        vec![
            outer_areas[0],   // navigation
            content_areas[0], // main view
            content_areas[1], // notice
            content_areas[2], // hints
        ]
    }
}

/// Dims everything behind an open modal.
fn render_overlay(frame: &mut Frame, app: &mut App) {
    frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), frame.area());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use visadesk_engine::{FixedClock, TimesheetManager};
    use visadesk_registry::LocationRegistry;
    use visadesk_util::UserPreferences;

    use super::*;
    use crate::app::SharedCtx;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
        App::new(SharedCtx::new(Arc::new(UserPreferences::ephemeral())), registry, manager)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn function_keys_switch_routes() {
        let mut app = app();
        let mut view = MainView::new(None);
        view.set_current_route(&mut app, Route::Dashboard);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::F(2))), vec![Effect::SwitchTo(Route::Timesheets)]);
        assert!(view.handle_key_events(&mut app, key(KeyCode::F(1))).is_empty());
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Tab)), vec![Effect::SwitchTo(Route::Timesheets)]);
    }

    #[test]
    fn q_is_typed_into_focused_location_field() {
        let mut app = app();
        let mut view = MainView::new(None);
        view.set_current_route(&mut app, Route::Location);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);

        view.handle_key_events(&mut app, key(KeyCode::Enter));
        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))).is_empty());
        assert!(app.location.query().ends_with('q'));
    }

    #[test]
    fn modal_receives_keys_first() {
        let mut app = app();
        let mut view = MainView::new(None);
        view.set_current_route(&mut app, Route::Timesheets);
        view.set_open_modal_kind(&mut app, Some(Modal::AddWeek));
        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))).is_empty());
        assert_eq!(app.add_week.form().week_start, "q");
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Esc)), vec![Effect::CloseModal]);
    }
}
