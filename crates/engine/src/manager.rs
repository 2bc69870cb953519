//! Timesheet book and upload queue wired together.

use std::sync::Arc;

use visadesk_types::{BatchReport, DashboardSummary, DocumentId, FileMeta, TimesheetError, UploadId, WeekId, WeeklyTimesheet};

use crate::{
    clock::{Clock, SystemClock},
    ids::IdGenerator,
    seed::{SAMPLE_NEXT_ID, sample_weeks},
    timesheets::TimesheetBook,
    uploads::UploadQueue,
};

/// Everything the timesheet views operate on.
///
/// Both halves draw ids from one shared generator.
#[derive(Debug)]
pub struct TimesheetManager {
    pub book: TimesheetBook,
    pub uploads: UploadQueue,
}

impl TimesheetManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_generator(Arc::new(IdGenerator::default()), clock, Vec::new())
    }

    /// Manager preloaded with the January 2024 sample weeks.
    pub fn with_sample_data(clock: Arc<dyn Clock>) -> Self {
        Self::with_generator(Arc::new(IdGenerator::starting_at(SAMPLE_NEXT_ID)), clock, sample_weeks())
    }

    fn with_generator(ids: Arc<IdGenerator>, clock: Arc<dyn Clock>, weeks: Vec<WeeklyTimesheet>) -> Self {
        Self {
            book: TimesheetBook::with_weeks(Arc::clone(&ids), clock, weeks),
            uploads: UploadQueue::new(ids),
        }
    }

    /// Queues a batch of files for an existing week.
    pub fn upload_files(
        &mut self,
        week_id: WeekId,
        files: impl IntoIterator<Item = FileMeta>,
    ) -> Result<BatchReport, TimesheetError> {
        if self.book.week(week_id).is_none() {
            return Err(TimesheetError::UnknownWeek(week_id));
        }
        Ok(self.uploads.enqueue_batch(week_id, files))
    }

    /// One upload tick. Returns the document created when an upload finished.
    pub fn tick(&mut self) -> Option<DocumentId> {
        let completed = self.uploads.tick()?;
        self.book.attach_document(completed)
    }

    pub fn cancel_upload(&mut self, upload_id: UploadId) -> bool {
        self.uploads.cancel(upload_id)
    }

    pub fn cancel_week_uploads(&mut self, week_id: WeekId) -> usize {
        self.uploads.cancel_week(week_id)
    }

    pub fn cancel_all_uploads(&mut self) -> usize {
        self.uploads.cancel_all()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            active_uploads: self.uploads.len(),
            ..self.book.summary()
        }
    }
}

impl Default for TimesheetManager {
    fn default() -> Self {
        Self::with_sample_data(Arc::new(SystemClock))
    }
}
