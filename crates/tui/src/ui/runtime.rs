//! Runtime: unified event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop that handles input and upload ticks.
//! - Route keys to the main view and execute returned `Effect`s.
//!
//! Unified Event Loop Strategy
//! - A dedicated input thread polls `crossterm` and forwards events over a
//!   channel; it exits once the receiving side is dropped.
//! - Smart ticking: the upload interval only while uploads are queued; a long
//!   interval (5 s) when idle.
//! - Effects returned by input or ticks are processed immediately so modal and
//!   route changes show up on the next frame.
use std::{
    io::Stdout,
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{error, info, warn};
use visadesk_engine::UPLOAD_TICK;
use visadesk_types::{Effect, Msg, Severity};

use crate::{
    app::App,
    ui::{
        components::{Component, DashboardComponent},
        main_component::MainView,
    },
};

const IDLE_TICK: Duration = Duration::from_millis(5000);
const INPUT_POLL: Duration = Duration::from_millis(16);

/// Spawn a dedicated input thread that polls terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// Keeping `poll()` and `read()` on the same OS thread avoids lost or delayed
/// events in some terminals.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    thread::spawn(move || {
        let mut last_mouse_move = Instant::now();
        loop {
            if sender.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!("Failed to poll events: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    // Throttle mouse move events to once per poll interval.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < INPUT_POLL {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Whether the loop should keep running after processing effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Executes effects until none are left. Effects produced while handling one
/// effect (route hooks, re-dispatched messages) are appended to the queue.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) -> Flow {
    let mut queue = effects;
    while !queue.is_empty() {
        let mut follow_up = Vec::new();
        for effect in queue {
            match effect {
                Effect::SwitchTo(route) => {
                    if let Some(mut view) = main_view.content_view.take() {
                        follow_up.extend(view.on_route_exit(app));
                    }
                    main_view.set_current_route(app, route);
                    if let Some(view) = main_view.content_view.as_mut() {
                        follow_up.extend(view.on_route_enter(app));
                    }
                }
                Effect::ShowModal(modal) => {
                    main_view.set_open_modal_kind(app, Some(modal));
                    if let Some((view, _)) = main_view.modal_view.as_mut() {
                        follow_up.extend(view.on_route_enter(app));
                    }
                }
                Effect::CloseModal => {
                    if let Some((mut view, _)) = main_view.modal_view.take() {
                        follow_up.extend(view.on_route_exit(app));
                    }
                    main_view.set_open_modal_kind(app, None);
                }
                Effect::Notify(notice) => {
                    match notice.severity {
                        Severity::Error => error!(message = %notice.message, "notice"),
                        Severity::Warning => warn!(message = %notice.message, "notice"),
                        Severity::Info | Severity::Success => info!(message = %notice.message, "notice"),
                    }
                    app.notice = Some(notice);
                }
                Effect::SendMsg(msg) => follow_up.extend(main_view.handle_message(app, msg)),
                Effect::Quit => return Flow::Exit,
            }
        }
        queue = follow_up;
    }
    Flow::Continue
}

/// Entry point for the TUI runtime: sets up the terminal, spawns the event
/// producer, runs the async event loop, and performs cleanup on exit.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new(Some(Box::new(DashboardComponent)));

    let mut terminal = setup_terminal()?;

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app, &mut main_view)?;

    loop {
        let uploading = !app.manager.uploads.is_idle();
        let target_interval = if uploading { UPLOAD_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval_at(time::Instant::now() + current_interval, current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = &event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                handle_input_event(&mut app, &mut main_view, event)
            }
            _ = ticker.tick() => {
                if !uploading {
                    continue;
                }
                main_view.handle_message(&mut app, Msg::Tick)
            }
            _ = signal::ctrl_c() => { break; }
        };

        if process_effects(&mut app, &mut main_view, effects) == Flow::Exit {
            break;
        }
        render(&mut terminal, &mut app, &mut main_view)?;
    }

    let cancelled = app.manager.cancel_all_uploads();
    if cancelled > 0 {
        info!(cancelled, "pending uploads dropped on exit");
    }
    drop(input_receiver);
    cleanup_terminal(&mut terminal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use visadesk_engine::{FixedClock, TimesheetManager};
    use visadesk_registry::LocationRegistry;
    use visadesk_types::{Confirmation, DocumentId, Modal, Notice, Route, WeekId};
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
    fn switching_routes_runs_enter_hooks() {
        let mut app = app();
        let mut view = MainView::new(None);
        app.work_site = "Denver, CO".into();
        let flow = process_effects(&mut app, &mut view, vec![Effect::SwitchTo(Route::Location)]);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(app.current_route, Route::Location);
        assert_eq!(app.location.query(), "Denver, CO");
    }

    #[test]
    fn confirmed_deletion_flows_through_send_msg() {
        let mut app = app();
        let mut view = MainView::new(None);
        let pending = app.manager.book.request_delete(WeekId(1), DocumentId(11)).expect("document");
        app.confirmation.ask_delete(pending);
        process_effects(&mut app, &mut view, vec![Effect::ShowModal(Modal::ConfirmDelete)]);
        assert_eq!(app.open_modal_kind, Some(Modal::ConfirmDelete));

        process_effects(
            &mut app,
            &mut view,
            vec![Effect::CloseModal, Effect::SendMsg(Msg::ConfirmationResolved(Confirmation::Confirmed))],
        );
        assert_eq!(app.open_modal_kind, None);
        assert_eq!(app.manager.book.week(WeekId(1)).map(|week| week.documents.len()), Some(1));
        assert_eq!(app.notice, Some(Notice::success("Deleted manager-approval.eml")));
    }

    #[test]
    fn quit_stops_processing() {
        let mut app = app();
        let mut view = MainView::new(None);
        let flow = process_effects(&mut app, &mut view, vec![Effect::Quit, Effect::SwitchTo(Route::Location)]);
        assert_eq!(flow, Flow::Exit);
        assert_eq!(app.current_route, Route::Dashboard);
    }
}
