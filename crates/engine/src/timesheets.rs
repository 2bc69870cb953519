//! The in-memory list of weekly timesheets and every operation on it.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use visadesk_types::{
    AddWeekError, AddWeekForm, CompletedUpload, Confirmation, DashboardSummary, Document, DocumentDetails, DocumentId, FormField,
    PendingDeletion, StatusAction, TimesheetError, TimesheetStatus, WeekId, WeeklyTimesheet,
};
use visadesk_util::{format_size, parse_input_date};

use crate::{clock::Clock, ids::IdGenerator};

/// Owner of all weeks and, through them, all documents. Newest week first.
#[derive(Debug)]
pub struct TimesheetBook {
    weeks: Vec<WeeklyTimesheet>,
    ids: Arc<IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl TimesheetBook {
    pub fn new(ids: Arc<IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            weeks: Vec::new(),
            ids,
            clock,
        }
    }

    /// Book pre-populated with the given weeks, kept in the given order.
    pub fn with_weeks(ids: Arc<IdGenerator>, clock: Arc<dyn Clock>, weeks: Vec<WeeklyTimesheet>) -> Self {
        Self { weeks, ids, clock }
    }

    pub fn weeks(&self) -> &[WeeklyTimesheet] {
        &self.weeks
    }

    pub fn week(&self, week_id: WeekId) -> Option<&WeeklyTimesheet> {
        self.weeks.iter().find(|week| week.id == week_id)
    }

    fn week_mut(&mut self, week_id: WeekId) -> Result<&mut WeeklyTimesheet, TimesheetError> {
        self.weeks
            .iter_mut()
            .find(|week| week.id == week_id)
            .ok_or(TimesheetError::UnknownWeek(week_id))
    }

    /// Validates the form and prepends a new draft week.
    ///
    /// The list is unchanged whenever an error is returned.
    pub fn add_week(&mut self, form: &AddWeekForm) -> Result<WeekId, AddWeekError> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| field_value(form, *field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(AddWeekError::MissingFields(missing));
        }

        let week_start = parse_field_date(form, FormField::WeekStart)?;
        let week_end = parse_field_date(form, FormField::WeekEnd)?;
        let total_hours: u32 = form
            .total_hours
            .trim()
            .parse()
            .map_err(|_| AddWeekError::InvalidHours(form.total_hours.trim().to_string()))?;
        if week_end < week_start {
            return Err(AddWeekError::EndBeforeStart {
                start: week_start,
                end: week_end,
            });
        }

        let id = self.ids.next_week_id();
        self.weeks.insert(
            0,
            WeeklyTimesheet {
                id,
                week_start,
                week_end,
                total_hours,
                status: TimesheetStatus::Draft,
                documents: Vec::new(),
                submitted_date: None,
                approved_date: None,
            },
        );
        info!(week = %id, %week_start, %week_end, total_hours, "week added");
        Ok(id)
    }

    /// Appends the document produced by a finished upload to its week.
    ///
    /// Returns `None` and logs a warning when the week no longer exists.
    pub fn attach_document(&mut self, completed: CompletedUpload) -> Option<DocumentId> {
        if self.week(completed.week_id).is_none() {
            warn!(
                upload = %completed.upload_id,
                week = %completed.week_id,
                "dropping finished upload for missing week"
            );
            return None;
        }
        let document_id = self.ids.next_document_id();
        let upload_date = self.clock.today();
        let week = self.week_mut(completed.week_id).ok()?;
        week.documents.push(Document {
            id: document_id,
            name: completed.file.name,
            mime_type: completed.file.mime_type,
            size_label: format_size(completed.file.size_bytes),
            upload_date,
        });
        info!(week = %completed.week_id, document = %document_id, "document attached");
        Some(document_id)
    }

    /// First phase of deletion: describes what would be removed.
    pub fn request_delete(&self, week_id: WeekId, document_id: DocumentId) -> Option<PendingDeletion> {
        let document = self.week(week_id)?.document(document_id)?;
        Some(PendingDeletion {
            week_id,
            document_id,
            document_name: document.name.clone(),
        })
    }

    /// Second phase of deletion. Returns `true` when a document was removed.
    pub fn resolve_delete(&mut self, pending: &PendingDeletion, confirmation: Confirmation) -> bool {
        if confirmation != Confirmation::Confirmed {
            debug!(document = %pending.document_id, "deletion declined");
            return false;
        }
        let Ok(week) = self.week_mut(pending.week_id) else {
            return false;
        };
        let before = week.documents.len();
        week.documents.retain(|document| document.id != pending.document_id);
        let removed = week.documents.len() != before;
        if removed {
            info!(week = %pending.week_id, document = %pending.document_id, "document deleted");
        }
        removed
    }

    pub fn document_details(&self, week_id: WeekId, document_id: DocumentId) -> Option<DocumentDetails> {
        let document = self.week(week_id)?.document(document_id)?;
        Some(DocumentDetails::from((week_id, document)))
    }

    pub fn submit(&mut self, week_id: WeekId) -> Result<(), TimesheetError> {
        let today = self.clock.today();
        self.transition(week_id, StatusAction::Submit, |week| match week.status {
            TimesheetStatus::Draft | TimesheetStatus::Rejected => {
                week.status = TimesheetStatus::Submitted;
                week.submitted_date = Some(today);
                week.approved_date = None;
                true
            }
            _ => false,
        })
    }

    pub fn approve(&mut self, week_id: WeekId) -> Result<(), TimesheetError> {
        let today = self.clock.today();
        self.transition(week_id, StatusAction::Approve, |week| match week.status {
            TimesheetStatus::Submitted => {
                week.status = TimesheetStatus::Approved;
                week.approved_date = Some(today);
                true
            }
            _ => false,
        })
    }

    pub fn reject(&mut self, week_id: WeekId) -> Result<(), TimesheetError> {
        self.transition(week_id, StatusAction::Reject, |week| match week.status {
            TimesheetStatus::Submitted => {
                week.status = TimesheetStatus::Rejected;
                true
            }
            _ => false,
        })
    }

    fn transition(
        &mut self,
        week_id: WeekId,
        action: StatusAction,
        apply: impl FnOnce(&mut WeeklyTimesheet) -> bool,
    ) -> Result<(), TimesheetError> {
        let week = self.week_mut(week_id)?;
        let from = week.status;
        if !apply(week) {
            return Err(TimesheetError::IllegalTransition { from, action });
        }
        info!(week = %week_id, %from, to = %week.status, "status changed");
        Ok(())
    }

    /// Aggregate counts; `active_uploads` is left at zero for the caller to fill.
    pub fn summary(&self) -> DashboardSummary {
        let mut summary = DashboardSummary {
            weeks: self.weeks.len(),
            ..DashboardSummary::default()
        };
        for week in &self.weeks {
            match week.status {
                TimesheetStatus::Draft => summary.draft += 1,
                TimesheetStatus::Submitted => summary.submitted += 1,
                TimesheetStatus::Approved => summary.approved += 1,
                TimesheetStatus::Rejected => summary.rejected += 1,
            }
            summary.total_hours += u64::from(week.total_hours);
            summary.documents += week.documents.len();
        }
        summary
    }
}

fn field_value(form: &AddWeekForm, field: FormField) -> &str {
    match field {
        FormField::WeekStart => &form.week_start,
        FormField::WeekEnd => &form.week_end,
        FormField::TotalHours => &form.total_hours,
    }
}

fn parse_field_date(form: &AddWeekForm, field: FormField) -> Result<NaiveDate, AddWeekError> {
    let value = field_value(form, field);
    parse_input_date(value).ok_or_else(|| AddWeekError::InvalidDate {
        field,
        value: value.trim().to_string(),
    })
}
