use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
};
use visadesk_types::{Confirmation, Effect, Msg};

use super::ConfirmationModalState;
use crate::{
    app::App,
    ui::{
        components::Component,
        theme::theme_helpers::{ButtonRenderOptions, block_with_severity, build_hint_spans, render_button},
    },
};

#[derive(Default, Debug, Clone)]
pub struct ConfirmationModal {
    button_areas: Vec<Rect>,
}

fn resolve(answer: Confirmation) -> Vec<Effect> {
    vec![Effect::CloseModal, Effect::SendMsg(Msg::ConfirmationResolved(answer))]
}

impl Component for ConfirmationModal {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                app.confirmation.cycle_focus();
                Vec::new()
            }
            KeyCode::Enter => resolve(app.confirmation.focused_answer()),
            KeyCode::Char('y') => resolve(Confirmation::Confirmed),
            KeyCode::Char('n') | KeyCode::Esc => resolve(Confirmation::Declined),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, _app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let MouseEvent { kind, column, row, .. } = mouse;
        if kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let position = Position::new(column, row);
        match self.button_areas.iter().position(|area| area.contains(position)) {
            Some(index) => resolve(ConfirmationModalState::answer_for(index)),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let state = &app.confirmation;
        let block = block_with_severity(theme, state.severity(), state.title());
        let inner = block.inner(rect);
        frame.render_widget(&block, rect);

        let [message_rect, _, button_rect, ..] = self.get_preferred_layout(app, inner)[..] else {
            return;
        };

        if let Some(message) = state.message() {
            let lines: Vec<Line> = message.lines().map(|line| Line::from(Span::from(line.to_string()))).collect();
            frame.render_widget(
                Paragraph::new(lines).style(theme.text_primary_style()).wrap(Wrap { trim: false }),
                message_rect,
            );
        }

        let width: u16 = 12;
        let spacer: u16 = 2;
        let mut button_areas = Vec::with_capacity(state.buttons().len());
        for (i, label) in state.buttons().iter().enumerate() {
            let offset = i as u16 * (width + spacer);
            let area = Rect::new(button_rect.x + offset, button_rect.y, width, button_rect.height).intersection(button_rect);
            render_button(
                frame,
                area,
                label,
                theme,
                ButtonRenderOptions::new(true, state.is_button_focused(i), false, Borders::ALL),
            );
            button_areas.push(area);
        }
        self.button_areas = button_areas;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        build_hint_spans(
            &*app.ctx.theme,
            &[("Tab", " Switch "), ("Enter", " Choose "), ("y/n", " Yes/No "), ("Esc", " Cancel")],
        )
    }

    fn get_preferred_layout(&self, app: &App, area: Rect) -> Vec<Rect> {
        let has_message = app.confirmation.message().is_some();
        Layout::vertical([
            Constraint::Min(if has_message { 1 } else { 0 }), // Message
            Constraint::Length(1),                            // Spacer
            Constraint::Length(3),                            // Buttons
        ])
        .split(area)
        .to_vec()
    }
}
