use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};
use visadesk_types::{Effect, Modal, Notice, TimesheetError, WeekId};
use visadesk_util::format_week_range;

use super::TimesheetsPane;
use crate::{
    app::App,
    ui::{
        components::{Component, find_target_index_by_mouse_position},
        theme::{Theme, theme_helpers as th},
    },
};

/// Week list, documents of the selected week and its upload progress.
#[derive(Debug, Default)]
pub struct TimesheetsComponent;

impl TimesheetsComponent {
    fn open_upload(app: &mut App) -> Vec<Effect> {
        let Some(week) = app.timesheets.selected_week(&app.manager.book) else {
            return vec![Effect::Notify(Notice::warning("Add a week before uploading documents"))];
        };
        let (id, label) = (week.id, format_week_range(week.week_start, week.week_end));
        app.upload.open_for(id, label);
        vec![Effect::ShowModal(Modal::Upload)]
    }

    fn open_delete(app: &mut App) -> Vec<Effect> {
        let pending = app
            .timesheets
            .selected_document_id(&app.manager.book)
            .and_then(|(week_id, document_id)| app.manager.book.request_delete(week_id, document_id));
        match pending {
            Some(pending) => {
                app.confirmation.ask_delete(pending);
                vec![Effect::ShowModal(Modal::ConfirmDelete)]
            }
            None => vec![Effect::Notify(Notice::warning("Select a document to delete"))],
        }
    }

    fn open_details(app: &mut App) -> Vec<Effect> {
        let details = app
            .timesheets
            .selected_document_id(&app.manager.book)
            .and_then(|(week_id, document_id)| app.manager.book.document_details(week_id, document_id));
        match details {
            Some(details) => {
                app.document_details = Some(details);
                vec![Effect::ShowModal(Modal::DocumentDetails)]
            }
            None => vec![Effect::Notify(Notice::warning("Select a document to view"))],
        }
    }

    fn review(app: &mut App, apply: fn(&mut App, WeekId) -> Result<(), TimesheetError>, done: &str) -> Vec<Effect> {
        let Some(week_id) = app.timesheets.selected_week_id(&app.manager.book) else {
            return Vec::new();
        };
        let notice = match apply(app, week_id) {
            Ok(()) => Notice::success(format!("Timesheet {done}")),
            Err(error) => Notice::error(error.to_string()),
        };
        vec![Effect::Notify(notice)]
    }

    fn cancel_uploads(app: &mut App) -> Vec<Effect> {
        let Some(week_id) = app.timesheets.selected_week_id(&app.manager.book) else {
            return Vec::new();
        };
        let notice = match app.manager.cancel_week_uploads(week_id) {
            0 => Notice::info("No uploads in progress for this week"),
            count => Notice::info(format!("Cancelled {count} upload(s)")),
        };
        vec![Effect::Notify(notice)]
    }

    fn render_weeks(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.timesheets.pane == TimesheetsPane::Weeks;
        let block = th::block(theme, Some("Weekly Timesheets"), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let weeks = app.manager.book.weeks();
        if weeks.is_empty() {
            frame.render_widget(
                Paragraph::new("No timesheets yet. Press 'a' to add a week.").style(theme.text_muted_style()),
                inner,
            );
        }

        let mut rows = Vec::with_capacity(weeks.len());
        for (index, week) in weeks.iter().enumerate().take(inner.height as usize) {
            let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
            let selected = index == app.timesheets.selected_week;
            let line = Line::from(vec![
                th::status_badge_span(theme, week.status.badge()),
                Span::raw("  "),
                Span::styled(format_week_range(week.week_start, week.week_end), theme.text_primary_style()),
                Span::styled(format!("  {} h", week.total_hours), theme.text_secondary_style()),
                Span::styled(format!("  {} doc(s)", week.documents.len()), theme.text_muted_style()),
            ]);
            let style = row_style(theme, selected, focused);
            frame.render_widget(Paragraph::new(line).style(style), row);
            rows.push(row);
        }
        app.timesheets.week_list_area = inner;
        app.timesheets.week_rows = rows;
    }

    fn render_documents(&self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.timesheets.pane == TimesheetsPane::Documents;
        let block = th::block(theme, Some("Documents"), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let documents = app
            .timesheets
            .selected_week(&app.manager.book)
            .map(|week| week.documents.as_slice())
            .unwrap_or_default();
        if documents.is_empty() {
            frame.render_widget(
                Paragraph::new("No documents. Press 'u' to upload.").style(theme.text_muted_style()),
                inner,
            );
        }

        let mut rows = Vec::with_capacity(documents.len());
        for (index, document) in documents.iter().enumerate().take(inner.height as usize) {
            let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
            let selected = index == app.timesheets.selected_document;
            let line = Line::from(vec![
                Span::styled(document.name.clone(), theme.text_primary_style()),
                Span::styled(format!("  {}", document.size_label), theme.text_muted_style()),
            ]);
            frame.render_widget(Paragraph::new(line).style(row_style(theme, selected, focused)), row);
            rows.push(row);
        }
        app.timesheets.document_list_area = inner;
        app.timesheets.document_rows = rows;
    }

    fn render_uploads(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Uploads"), false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let progress = app
            .timesheets
            .selected_week_id(&app.manager.book)
            .map(|week_id| app.manager.uploads.progress_for_week(week_id))
            .unwrap_or_default();
        if progress.is_empty() {
            frame.render_widget(Paragraph::new("Idle").style(theme.text_muted_style()), inner);
            return;
        }

        let roles = theme.roles();
        for (index, upload) in progress.iter().enumerate().take(inner.height as usize) {
            let row = Rect::new(inner.x, inner.y + index as u16, inner.width, 1);
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(roles.accent_primary).bg(roles.gauge_track))
                .percent(u16::from(upload.percent))
                .label(format!("{} {}%", upload.file_name, upload.percent));
            frame.render_widget(gauge, row);
        }
    }
}

fn row_style(theme: &dyn Theme, selected: bool, focused: bool) -> Style {
    match (selected, focused) {
        (true, true) => th::table_selected_style(theme),
        (true, false) => theme.selection_style(),
        _ => Style::default(),
    }
}

impl Component for TimesheetsComponent {
    fn on_route_enter(&mut self, app: &mut App) -> Vec<Effect> {
        app.timesheets.clamp(&app.manager.book);
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.timesheets.move_selection(&app.manager.book, -1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.timesheets.move_selection(&app.manager.book, 1);
                Vec::new()
            }
            KeyCode::Left | KeyCode::Char('h') => {
                app.timesheets.pane = TimesheetsPane::Weeks;
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.timesheets.pane = TimesheetsPane::Documents;
                app.timesheets.clamp(&app.manager.book);
                Vec::new()
            }
            KeyCode::Char('a') => {
                app.add_week.reset();
                vec![Effect::ShowModal(Modal::AddWeek)]
            }
            KeyCode::Char('u') => Self::open_upload(app),
            KeyCode::Char('d') | KeyCode::Delete => Self::open_delete(app),
            KeyCode::Char('v') => Self::open_details(app),
            KeyCode::Enter if app.timesheets.pane == TimesheetsPane::Documents => Self::open_details(app),
            KeyCode::Enter => {
                app.timesheets.pane = TimesheetsPane::Documents;
                app.timesheets.clamp(&app.manager.book);
                Vec::new()
            }
            KeyCode::Char('s') => Self::review(app, |app, id| app.manager.book.submit(id), "submitted"),
            KeyCode::Char('p') => Self::review(app, |app, id| app.manager.book.approve(id), "approved"),
            KeyCode::Char('r') => Self::review(app, |app, id| app.manager.book.reject(id), "rejected"),
            KeyCode::Char('c') => Self::cancel_uploads(app),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let state = &app.timesheets;
        if let Some(index) = find_target_index_by_mouse_position(&state.week_list_area, &state.week_rows, mouse.column, mouse.row) {
            app.timesheets.select_week(index);
        } else if let Some(index) =
            find_target_index_by_mouse_position(&state.document_list_area, &state.document_rows, mouse.column, mouse.row)
        {
            app.timesheets.select_document(index);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [weeks_area, bottom] = self.get_preferred_layout(app, rect)[..] else {
            return;
        };
        let [documents_area, uploads_area] = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(bottom);
        self.render_weeks(frame, weeks_area, app);
        self.render_documents(frame, documents_area, app);
        self.render_uploads(frame, uploads_area, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let hints: &[(&str, &str)] = match app.timesheets.pane {
            TimesheetsPane::Weeks => &[
                (" ↑/↓", " Select "),
                ("→", " Documents "),
                ("a", " Add week "),
                ("u", " Upload "),
                ("s/p/r", " Submit/Approve/Reject "),
                ("c", " Cancel uploads "),
            ],
            TimesheetsPane::Documents => &[
                (" ↑/↓", " Select "),
                ("←", " Weeks "),
                ("Enter/v", " View "),
                ("d", " Delete "),
                ("u", " Upload "),
            ],
        };
        th::build_hint_spans(&*app.ctx.theme, hints)
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Percentage(50), // Weeks
            Constraint::Percentage(50), // Documents and uploads
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
    use visadesk_types::TimesheetStatus;
    use visadesk_util::UserPreferences;

    use super::*;
    use crate::app::SharedCtx;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
        App::new(SharedCtx::new(Arc::new(UserPreferences::ephemeral())), registry, manager)
    }

    fn press(component: &mut TimesheetsComponent, app: &mut App, code: KeyCode) -> Vec<Effect> {
        component.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn delete_asks_for_confirmation_first() {
        let mut app = app();
        let mut component = TimesheetsComponent;
        press(&mut component, &mut app, KeyCode::Down);
        press(&mut component, &mut app, KeyCode::Down);
        press(&mut component, &mut app, KeyCode::Right);
        let effects = press(&mut component, &mut app, KeyCode::Char('d'));
        assert_eq!(effects, vec![Effect::ShowModal(Modal::ConfirmDelete)]);
        assert_eq!(app.manager.book.weeks()[2].documents.len(), 2);
    }

    #[test]
    fn submit_moves_draft_week_forward() {
        let mut app = app();
        let mut component = TimesheetsComponent;
        let effects = press(&mut component, &mut app, KeyCode::Char('s'));
        assert!(matches!(&effects[..], [Effect::Notify(notice)] if notice.message == "Timesheet submitted"));
        assert_eq!(app.manager.book.weeks()[0].status, TimesheetStatus::Submitted);
    }

    #[test]
    fn approving_a_draft_is_reported_as_error() {
        let mut app = app();
        let mut component = TimesheetsComponent;
        let effects = press(&mut component, &mut app, KeyCode::Char('p'));
        assert!(
            matches!(&effects[..], [Effect::Notify(notice)] if notice.severity == visadesk_types::Severity::Error)
        );
    }

    #[test]
    fn upload_prompt_targets_selected_week() {
        let mut app = app();
        let mut component = TimesheetsComponent;
        press(&mut component, &mut app, KeyCode::Down);
        let effects = press(&mut component, &mut app, KeyCode::Char('u'));
        assert_eq!(effects, vec![Effect::ShowModal(Modal::Upload)]);
        assert_eq!(app.upload.week_id, Some(app.manager.book.weeks()[1].id));
    }
}
