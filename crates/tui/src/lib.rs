//! # Visadesk TUI Library
//!
//! Terminal user interface for the Visadesk H1B dashboard, built on Ratatui.
//!
//! ## Key Features
//!
//! - Dashboard with status counts and the committed work site
//! - City/state work site picker with keyboard and mouse selection
//! - Weekly timesheets with simulated uploads, review actions and deletion
//!   behind a confirmation prompt
//! - Persisted theme choice (Ctrl+T)
//!
//! ## Architecture
//!
//! Each view (dashboard, work site, timesheets) and each modal is a component
//! that handles its own events and renders itself. Components return
//! `Effect`s and the runtime executes them.

mod app;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use visadesk_engine::{SystemClock, TimesheetManager};
use visadesk_registry::LocationRegistry;
use visadesk_util::UserPreferences;

/// Runs the main TUI application loop.
///
/// Loads the embedded location table and the sample timesheets, then runs
/// the event loop until the user quits.
///
/// # Errors
///
/// This function can return errors for:
/// - An unreadable embedded location table
/// - Terminal setup failures (raw mode, alternate screen)
/// - Event loop runtime errors
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use visadesk_util::UserPreferences;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     visadesk_tui::run(Arc::new(UserPreferences::load_or_ephemeral())).await
/// }
/// ```
pub async fn run(preferences: Arc<UserPreferences>) -> Result<()> {
    let registry = LocationRegistry::from_embedded().context("loading location reference table")?;
    let manager = TimesheetManager::with_sample_data(Arc::new(SystemClock));
    let app = app::App::new(app::SharedCtx::new(preferences), registry, manager);
    ui::runtime::run_app(app).await
}
