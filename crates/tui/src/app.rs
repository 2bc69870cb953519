//! Application state for the Visadesk TUI.
//!
//! `App` owns every piece of state the components read and mutate: the
//! timesheet manager, the location field, per-view selection and the modal
//! form states. Components receive `&mut App` and answer with [`Effect`]s.

use std::sync::Arc;

use tracing::{debug, warn};
use visadesk_engine::{LocationFieldState, TimesheetManager};
use visadesk_registry::LocationRegistry;
use visadesk_types::{DocumentDetails, Effect, Modal, Msg, Notice, Route};
use visadesk_util::UserPreferences;

use crate::ui::{
    components::{
        VerticalNavBarState,
        common::ConfirmationModalState,
        timesheets::{AddWeekState, TimesheetsState, UploadState},
    },
    theme::{self, Theme, catalog},
};

/// Work site preselected for the sponsoring employer.
pub const DEFAULT_WORK_SITE: &str = "Austin, TX";

/// Cross-cutting context shared by every component.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
    /// Catalog id of the active theme
    pub active_theme_id: &'static str,
    /// Persisted user preferences
    pub preferences: Arc<UserPreferences>,
}

impl SharedCtx {
    pub fn new(preferences: Arc<UserPreferences>) -> Self {
        let loaded = theme::load(preferences.preferred_theme().as_deref());
        Self {
            theme: loaded.theme,
            active_theme_id: loaded.definition.id,
            preferences,
        }
    }
}

/// The main application state.
#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    /// Current primary route
    pub current_route: Route,
    /// Modal currently on screen, if any
    pub open_modal_kind: Option<Modal>,
    pub nav_bar: VerticalNavBarState,
    pub manager: TimesheetManager,
    /// Committed work site label shared by the dashboard and the location view
    pub work_site: String,
    pub location: LocationFieldState,
    pub timesheets: TimesheetsState,
    pub add_week: AddWeekState,
    pub upload: UploadState,
    pub confirmation: ConfirmationModalState,
    pub document_details: Option<DocumentDetails>,
    /// Most recent user-facing notice shown in the status line
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(ctx: SharedCtx, registry: LocationRegistry, manager: TimesheetManager) -> Self {
        let work_site = DEFAULT_WORK_SITE.to_string();
        let mut location = LocationFieldState::new(registry, work_site.clone());
        if let Some(limit) = ctx.preferences.location_result_limit() {
            location = location.with_result_limit(limit);
        }
        Self {
            ctx,
            current_route: Route::Dashboard,
            open_modal_kind: None,
            nav_bar: VerticalNavBarState::defaults_for_views(),
            manager,
            work_site,
            location,
            timesheets: TimesheetsState::default(),
            add_week: AddWeekState::default(),
            upload: UploadState::default(),
            confirmation: ConfirmationModalState::default(),
            document_details: None,
            notice: None,
        }
    }

    /// Applies an application-level message and returns follow-up effects.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                let Some(document_id) = self.manager.tick() else {
                    return Vec::new();
                };
                let name = self
                    .manager
                    .book
                    .weeks()
                    .iter()
                    .find_map(|week| week.document(document_id))
                    .map(|document| document.name.clone())
                    .unwrap_or_default();
                self.timesheets.clamp(&self.manager.book);
                vec![Effect::Notify(Notice::success(format!("Uploaded {name}")))]
            }
            Msg::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                Vec::new()
            }
            Msg::ConfirmationResolved(answer) => {
                let Some(pending) = self.confirmation.take_pending() else {
                    return Vec::new();
                };
                let removed = self.manager.book.resolve_delete(&pending, *answer);
                self.timesheets.clamp(&self.manager.book);
                if removed {
                    vec![Effect::Notify(Notice::success(format!("Deleted {}", pending.document_name)))]
                } else {
                    vec![Effect::Notify(Notice::info("Deletion cancelled"))]
                }
            }
        }
    }

    /// Switches to the next theme in the catalog and persists the choice.
    pub fn cycle_theme(&mut self) -> Notice {
        let definition = catalog::next_after(self.ctx.active_theme_id);
        let loaded = theme::LoadedTheme::from_definition(definition);
        self.ctx.theme = loaded.theme;
        self.ctx.active_theme_id = definition.id;
        if let Err(error) = self.ctx.preferences.set_preferred_theme(Some(definition.id.to_string())) {
            warn!(%error, "failed to persist theme preference");
            return Notice::warning(format!("Theme set to {} (not saved: {error})", definition.label));
        }
        Notice::info(format!("Theme set to {}", definition.label))
    }

    /// Records a committed work site; an empty value clears it.
    pub fn set_work_site(&mut self, value: String) {
        debug!(work_site = %value, "work site committed");
        self.work_site = value;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use visadesk_engine::FixedClock;
    use visadesk_types::{Confirmation, FileMeta, WeekId};

    use super::*;

    fn app() -> App {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let manager = TimesheetManager::with_sample_data(Arc::new(FixedClock(today)));
        App::new(SharedCtx::new(Arc::new(UserPreferences::ephemeral())), registry, manager)
    }

    #[test]
    fn ticks_report_completed_uploads() {
        let mut app = app();
        app.manager
            .upload_files(WeekId(3), vec![FileMeta::new("hours.pdf", "application/pdf", 10)])
            .expect("known week");
        let mut effects = Vec::new();
        for _ in 0..20 {
            effects.extend(app.update(&Msg::Tick));
        }
        assert_eq!(effects, vec![Effect::Notify(Notice::success("Uploaded hours.pdf"))]);
    }

    #[test]
    fn declined_confirmation_keeps_document() {
        let mut app = app();
        let pending = app.manager.book.request_delete(WeekId(1), visadesk_types::DocumentId(10)).expect("document");
        app.confirmation.ask_delete(pending);
        app.update(&Msg::ConfirmationResolved(Confirmation::Declined));
        assert_eq!(app.manager.book.week(WeekId(1)).map(|week| week.documents.len()), Some(2));
        assert!(app.confirmation.take_pending().is_none());
    }

    #[test]
    fn theme_cycles_through_catalog() {
        let mut app = app();
        let first = app.ctx.active_theme_id;
        app.cycle_theme();
        assert_ne!(app.ctx.active_theme_id, first);
        for _ in 1..catalog::THEME_DEFINITIONS.len() {
            app.cycle_theme();
        }
        assert_eq!(app.ctx.active_theme_id, first);
    }
}
