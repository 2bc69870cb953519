use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tracing::warn;
use visadesk_types::{ALLOWED_MIME_TYPES, BatchReport, Effect, FileMeta, MAX_UPLOAD_BYTES, Notice};
use visadesk_util::{file_meta_from_path, format_size, split_path_list};

use crate::{
    app::App,
    ui::{components::Component, theme::theme_helpers as th},
};

/// Modal prompting for the files to attach to a week.
#[derive(Debug, Default)]
pub struct UploadComponent;

/// Reads metadata for every path, collecting unreadable paths as messages.
fn read_files(paths: Vec<PathBuf>) -> (Vec<FileMeta>, Vec<String>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match file_meta_from_path(&path) {
            Ok(meta) => files.push(meta),
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot read file for upload");
                failures.push(format!("Cannot read {}: {error}", path.display()));
            }
        }
    }
    (files, failures)
}

/// One notice describing the whole batch.
fn summarize(report: &BatchReport, read_failures: &[String]) -> Notice {
    let mut parts = Vec::new();
    if !report.accepted.is_empty() {
        parts.push(format!("Uploading {} file(s)", report.accepted.len()));
    }
    parts.extend(report.rejected.iter().map(ToString::to_string));
    parts.extend(read_failures.iter().cloned());
    let message = parts.join("; ");

    let has_problems = !report.rejected.is_empty() || !read_failures.is_empty();
    match (report.accepted.is_empty(), has_problems) {
        (false, false) => Notice::success(message),
        (false, true) => Notice::warning(message),
        (true, _) => Notice::error(message),
    }
}

impl UploadComponent {
    fn submit(app: &mut App) -> Vec<Effect> {
        let Some(week_id) = app.upload.week_id else {
            return vec![Effect::CloseModal];
        };
        let paths = split_path_list(app.upload.input.input());
        if paths.is_empty() {
            app.upload.error = Some("Enter one or more file paths separated by ';'".to_string());
            return Vec::new();
        }

        let (files, read_failures) = read_files(paths);
        let report = if files.is_empty() {
            BatchReport::default()
        } else {
            match app.manager.upload_files(week_id, files) {
                Ok(report) => report,
                Err(error) => return vec![Effect::CloseModal, Effect::Notify(Notice::error(error.to_string()))],
            }
        };

        let notice = summarize(&report, &read_failures);
        if report.accepted.is_empty() {
            app.upload.error = Some(notice.message.clone());
            return vec![Effect::Notify(notice)];
        }
        app.upload.input.clear();
        vec![Effect::CloseModal, Effect::Notify(notice)]
    }
}

impl Component for UploadComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => vec![Effect::CloseModal],
            KeyCode::Enter => Self::submit(app),
            _ => {
                if app.upload.input.handle_edit_key(key) {
                    app.upload.error = None;
                }
                Vec::new()
            }
        }
    }

    fn captures_text(&self, _app: &App) -> bool {
        true
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let title = format!("Upload to {}", app.upload.week_label);
        let block = th::block(theme, Some(title.as_str()), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [help_area, input_area, error_area] = self.get_preferred_layout(app, inner)[..] else {
            return;
        };

        let help = vec![
            Line::from(Span::styled("Paths separated by ';' (~ expands to your home directory)", theme.text_secondary_style())),
            Line::from(Span::styled(
                format!("Max {} per file. Allowed: {}", format_size(MAX_UPLOAD_BYTES), ALLOWED_MIME_TYPES.join(", ")),
                theme.text_muted_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(help).wrap(Wrap { trim: true }), help_area);

        let input_block = th::block(theme, Some("Files"), true);
        let text_area = input_block.inner(input_area);
        let input = &app.upload.input;
        frame.render_widget(
            Paragraph::new(input.input().to_string())
                .style(th::input_style(theme, app.upload.error.is_none(), true))
                .block(input_block),
            input_area,
        );
        frame.set_cursor_position((text_area.x + input.cursor_columns(), text_area.y));

        if let Some(error) = app.upload.error.as_deref() {
            frame.render_widget(
                Paragraph::new(error).style(theme.status_error()).wrap(Wrap { trim: true }),
                error_area,
            );
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[("Enter", " Upload "), ("Esc", " Cancel")])
    }

    fn get_preferred_layout(&self, _app: &App, area: Rect) -> Vec<Rect> {
        Layout::vertical([
            Constraint::Length(3), // Help
            Constraint::Length(3), // Input
            Constraint::Min(1),    // Error
        ])
        .split(area)
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc};

    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use visadesk_engine::{FixedClock, TimesheetManager};
    use visadesk_registry::LocationRegistry;
    use visadesk_types::{Severity, UploadId, UploadRejection, WeekId};
    use visadesk_util::UserPreferences;

    use super::*;
    use crate::app::SharedCtx;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
        App::new(SharedCtx::new(Arc::new(UserPreferences::ephemeral())), registry, manager)
    }

    #[test]
    fn mixed_batch_is_a_warning() {
        let report = BatchReport {
            accepted: vec![UploadId(1)],
            rejected: vec![UploadRejection::UnsupportedType {
                name: "a.zip".into(),
                mime_type: "application/zip".into(),
            }],
        };
        let notice = summarize(&report, &[]);
        assert_eq!(notice.severity, Severity::Warning);
        assert!(notice.message.starts_with("Uploading 1 file(s); File \"a.zip\""));
    }

    #[test]
    fn fully_rejected_batch_is_an_error() {
        let notice = summarize(&BatchReport::default(), &["Cannot read /nope: missing".to_string()]);
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn empty_prompt_shows_inline_error() {
        let mut app = app();
        app.upload.open_for(WeekId(3), "01/15/2024 - 01/21/2024".into());
        let effects = UploadComponent.handle_key_events(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(effects.is_empty());
        assert!(app.upload.error.is_some());
    }

    #[test]
    fn real_files_are_queued_for_the_week() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hours.pdf");
        fs::write(&path, b"%PDF-1.4").expect("write file");

        let mut app = app();
        app.upload.open_for(WeekId(3), "01/15/2024 - 01/21/2024".into());
        app.upload.input.set_input(path.display().to_string());
        let effects = UploadComponent.handle_key_events(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(effects.first(), Some(&Effect::CloseModal));
        assert_eq!(app.manager.uploads.progress_for_week(WeekId(3)).len(), 1);
    }
}
