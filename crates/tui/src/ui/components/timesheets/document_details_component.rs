use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use visadesk_types::Effect;
use visadesk_util::{format_date_mmddyyyy, format_week_range};

use crate::{
    app::App,
    ui::{components::Component, theme::theme_helpers as th},
};

/// Read-only metadata of one document. File content is never available.
#[derive(Debug, Default)]
pub struct DocumentDetailsComponent;

impl Component for DocumentDetailsComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('v') => {
                app.document_details = None;
                vec![Effect::CloseModal]
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Document"), true);
        let Some(details) = app.document_details.as_ref() else {
            frame.render_widget(Paragraph::new("Document no longer exists").block(block), rect);
            return;
        };

        let week = app
            .manager
            .book
            .week(details.week_id)
            .map(|week| format_week_range(week.week_start, week.week_end))
            .unwrap_or_default();
        let rows = [
            ("Name", details.name.clone()),
            ("Type", details.mime_type.clone()),
            ("Size", details.size_label.clone()),
            ("Uploaded", format_date_mmddyyyy(details.upload_date)),
            ("Week", week),
        ];
        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<10}"), th::table_header_style(theme)),
                    Span::styled(value, theme.text_primary_style()),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Preview is not available.", theme.text_muted_style())));

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), rect);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Esc", " Close")])
    }
}
