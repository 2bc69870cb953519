use ratatui::layout::Rect;
use visadesk_engine::TimesheetBook;
use visadesk_types::{DocumentId, WeekId, WeeklyTimesheet};

/// Which list on the timesheets view receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimesheetsPane {
    #[default]
    Weeks,
    Documents,
}

/// Selection and hit-test areas of the timesheets view.
#[derive(Debug, Default, Clone)]
pub struct TimesheetsState {
    pub selected_week: usize,
    pub selected_document: usize,
    pub pane: TimesheetsPane,
    pub week_list_area: Rect,
    pub week_rows: Vec<Rect>,
    pub document_list_area: Rect,
    pub document_rows: Vec<Rect>,
}

impl TimesheetsState {
    pub fn selected_week<'a>(&self, book: &'a TimesheetBook) -> Option<&'a WeeklyTimesheet> {
        book.weeks().get(self.selected_week)
    }

    pub fn selected_week_id(&self, book: &TimesheetBook) -> Option<WeekId> {
        self.selected_week(book).map(|week| week.id)
    }

    pub fn selected_document_id(&self, book: &TimesheetBook) -> Option<(WeekId, DocumentId)> {
        let week = self.selected_week(book)?;
        let document = week.documents.get(self.selected_document)?;
        Some((week.id, document.id))
    }

    /// Keeps both indices inside the current list lengths.
    pub fn clamp(&mut self, book: &TimesheetBook) {
        let weeks = book.weeks().len();
        self.selected_week = self.selected_week.min(weeks.saturating_sub(1));
        let documents = self.selected_week(book).map(|week| week.documents.len()).unwrap_or_default();
        self.selected_document = self.selected_document.min(documents.saturating_sub(1));
    }

    pub fn move_selection(&mut self, book: &TimesheetBook, delta: isize) {
        match self.pane {
            TimesheetsPane::Weeks => {
                self.selected_week = step(self.selected_week, delta, book.weeks().len());
                self.selected_document = 0;
            }
            TimesheetsPane::Documents => {
                let len = self.selected_week(book).map(|week| week.documents.len()).unwrap_or_default();
                self.selected_document = step(self.selected_document, delta, len);
            }
        }
    }

    pub fn select_week(&mut self, index: usize) {
        if self.selected_week != index {
            self.selected_document = 0;
        }
        self.selected_week = index;
        self.pane = TimesheetsPane::Weeks;
    }

    pub fn select_document(&mut self, index: usize) {
        self.selected_document = index;
        self.pane = TimesheetsPane::Documents;
    }
}

/// Moves an index by `delta`, clamped to `0..len`.
fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use visadesk_engine::{FixedClock, TimesheetManager};

    use super::*;

    fn manager() -> TimesheetManager {
        let today = NaiveDate::from_ymd_opt(2024, 1, 22).expect("valid date");
        TimesheetManager::with_sample_data(Arc::new(FixedClock(today)))
    }

    #[test]
    fn selection_stays_in_bounds() {
        let manager = manager();
        let mut state = TimesheetsState::default();
        state.move_selection(&manager.book, -1);
        assert_eq!(state.selected_week, 0);
        state.move_selection(&manager.book, 10);
        assert_eq!(state.selected_week, manager.book.weeks().len() - 1);
    }

    #[test]
    fn document_pane_targets_selected_week() {
        let manager = manager();
        let mut state = TimesheetsState::default();
        state.select_week(2);
        state.select_document(1);
        let (week, _) = state.selected_document_id(&manager.book).expect("document selected");
        assert_eq!(Some(week), state.selected_week_id(&manager.book));
        state.move_selection(&manager.book, 5);
        state.clamp(&manager.book);
        assert!(state.selected_document_id(&manager.book).is_some());
    }
}
