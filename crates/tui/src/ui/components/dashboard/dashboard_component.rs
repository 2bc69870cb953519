use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use visadesk_types::{Effect, Route, TimesheetStatus};
use visadesk_util::format_week_range;

use crate::{
    app::App,
    ui::{components::Component, theme::theme_helpers as th},
};

const RECENT_WEEKS: usize = 5;
const STATUSES: [TimesheetStatus; 4] = [
    TimesheetStatus::Draft,
    TimesheetStatus::Submitted,
    TimesheetStatus::Approved,
    TimesheetStatus::Rejected,
];

/// Landing view: work site, status counts and the most recent weeks.
#[derive(Debug, Default)]
pub struct DashboardComponent;

impl DashboardComponent {
    fn render_work_site(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let value = if app.work_site.is_empty() {
            Span::styled("Not set", theme.text_muted_style())
        } else {
            Span::styled(app.work_site.as_str(), theme.accent_emphasis_style())
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled("Work site  ", th::table_header_style(theme)), value]))
                .block(th::block(theme, Some("H1B Employment"), false)),
            area,
        );
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let summary = app.manager.summary();
        let mut lines: Vec<Line> = STATUSES
            .iter()
            .map(|status| {
                Line::from(vec![
                    th::status_badge_span(theme, status.badge()),
                    Span::styled(format!("  {}", summary.count_for(*status)), theme.text_primary_style()),
                ])
            })
            .collect();
        lines.push(Line::default());
        for (label, value) in [
            ("Weeks", summary.weeks.to_string()),
            ("Total hours", summary.total_hours.to_string()),
            ("Documents", summary.documents.to_string()),
            ("Uploading", summary.active_uploads.to_string()),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<12}"), th::table_header_style(theme)),
                Span::styled(value, theme.text_primary_style()),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).block(th::block(theme, Some("Summary"), false)), area);
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let weeks = app.manager.book.weeks();
        let lines: Vec<Line> = if weeks.is_empty() {
            vec![Line::from(Span::styled("No timesheets yet", theme.text_muted_style()))]
        } else {
            weeks
                .iter()
                .take(RECENT_WEEKS)
                .map(|week| {
                    Line::from(vec![
                        th::status_badge_span(theme, week.status.badge()),
                        Span::raw("  "),
                        Span::styled(format_week_range(week.week_start, week.week_end), theme.text_primary_style()),
                        Span::styled(format!("  {} h", week.total_hours), theme.text_secondary_style()),
                    ])
                })
                .collect()
        };
        frame.render_widget(Paragraph::new(lines).block(th::block(theme, Some("Recent Weeks"), false)), area);
    }
}

impl Component for DashboardComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('t') | KeyCode::Enter => vec![Effect::SwitchTo(Route::Timesheets)],
            KeyCode::Char('w') => vec![Effect::SwitchTo(Route::Location)],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let [site_area, body] = self.get_preferred_layout(app, rect)[..] else {
            return;
        };
        let [summary_area, recent_area] = Layout::horizontal([Constraint::Length(32), Constraint::Min(20)]).areas(body);
        self.render_work_site(frame, site_area, app);
        self.render_summary(frame, summary_area, app);
        self.render_recent(frame, recent_area, app);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" t/Enter", " Timesheets "), ("w", " Work site ")])
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Work site
            Constraint::Min(10),   // Summary and recent weeks
        ])
        .split(area)
        .to_vec()
    }
}
