//! Weekly timesheet records and the outcomes of operations on them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a weekly timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekId(pub u64);

/// Identifier of a document attached to a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a weekly timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TimesheetStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl TimesheetStatus {
    pub const ALL: [TimesheetStatus; 4] = [Self::Draft, Self::Submitted, Self::Approved, Self::Rejected];

    /// Parses a status name, falling back to `Draft` for anything unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "submitted" => Self::Submitted,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Draft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Fixed tone/icon pair rendered for the status.
    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Draft => StatusBadge::new("Draft", "✎", BadgeTone::Muted),
            Self::Submitted => StatusBadge::new("Submitted", "◷", BadgeTone::Info),
            Self::Approved => StatusBadge::new("Approved", "✔", BadgeTone::Success),
            Self::Rejected => StatusBadge::new("Rejected", "✘", BadgeTone::Error),
        }
    }
}

impl From<&str> for TimesheetStatus {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl From<String> for TimesheetStatus {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic color family of a status badge; the UI maps it onto theme roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Muted,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub icon: &'static str,
    pub tone: BadgeTone,
}

impl StatusBadge {
    const fn new(label: &'static str, icon: &'static str, tone: BadgeTone) -> Self {
        Self { label, icon, tone }
    }
}

/// A document attached to a week. Documents only exist inside their week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub mime_type: String,
    pub size_label: String,
    pub upload_date: NaiveDate,
}

/// Metadata surfaced by the document view. No file content is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDetails {
    pub week_id: WeekId,
    pub name: String,
    pub mime_type: String,
    pub size_label: String,
    pub upload_date: NaiveDate,
}

impl From<(WeekId, &Document)> for DocumentDetails {
    fn from((week_id, document): (WeekId, &Document)) -> Self {
        Self {
            week_id,
            name: document.name.clone(),
            mime_type: document.mime_type.clone(),
            size_label: document.size_label.clone(),
            upload_date: document.upload_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTimesheet {
    pub id: WeekId,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_hours: u32,
    pub status: TimesheetStatus,
    pub documents: Vec<Document>,
    #[serde(default)]
    pub submitted_date: Option<NaiveDate>,
    #[serde(default)]
    pub approved_date: Option<NaiveDate>,
}

impl WeeklyTimesheet {
    pub fn document(&self, document_id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|document| document.id == document_id)
    }
}

/// Raw text captured by the add-week form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddWeekForm {
    pub week_start: String,
    pub week_end: String,
    pub total_hours: String,
}

/// Field of the add-week form, used to name what failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    WeekStart,
    WeekEnd,
    TotalHours,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::WeekStart, Self::WeekEnd, Self::TotalHours];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WeekStart => "week start",
            Self::WeekEnd => "week end",
            Self::TotalHours => "total hours",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejection of the add-week form. The week list is untouched when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddWeekError {
    #[error("Please fill in all fields (missing: {})", join_fields(.0))]
    MissingFields(Vec<FormField>),
    #[error("Invalid {field} '{value}': expected a date like 2024-01-15")]
    InvalidDate { field: FormField, value: String },
    #[error("Invalid total hours '{0}': expected a whole number")]
    InvalidHours(String),
    #[error("Week end {end} is before week start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

fn join_fields(fields: &[FormField]) -> String {
    fields.iter().map(FormField::label).collect::<Vec<_>>().join(", ")
}

/// Review actions applied to a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Submit,
    Approve,
    Reject,
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject => "reject",
        })
    }
}

/// Failure of an operation addressed to a specific week.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimesheetError {
    #[error("No timesheet with id {0}")]
    UnknownWeek(WeekId),
    #[error("Cannot {action} a {from} timesheet")]
    IllegalTransition { from: TimesheetStatus, action: StatusAction },
}

/// Answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// A deletion awaiting the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub week_id: WeekId,
    pub document_id: DocumentId,
    pub document_name: String,
}

impl PendingDeletion {
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.document_name)
    }
}

/// Aggregate figures rendered on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub weeks: usize,
    pub draft: usize,
    pub submitted: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_hours: u64,
    pub documents: usize,
    pub active_uploads: usize,
}

impl DashboardSummary {
    pub fn count_for(&self, status: TimesheetStatus) -> usize {
        match status {
            TimesheetStatus::Draft => self.draft,
            TimesheetStatus::Submitted => self.submitted,
            TimesheetStatus::Approved => self.approved,
            TimesheetStatus::Rejected => self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_falls_back_to_draft() {
        assert_eq!(TimesheetStatus::parse_lenient("approved"), TimesheetStatus::Approved);
        assert_eq!(TimesheetStatus::parse_lenient(" Submitted "), TimesheetStatus::Submitted);
        assert_eq!(TimesheetStatus::from("archived"), TimesheetStatus::Draft);
        assert_eq!(TimesheetStatus::from(""), TimesheetStatus::Draft);
    }

    #[test]
    fn badges_are_distinct_per_status() {
        let badges: Vec<StatusBadge> = TimesheetStatus::ALL.iter().map(TimesheetStatus::badge).collect();
        for (i, left) in badges.iter().enumerate() {
            for right in &badges[i + 1..] {
                assert_ne!(left.tone, right.tone);
                assert_ne!(left.icon, right.icon);
            }
        }
        assert_eq!(TimesheetStatus::from("bogus").badge(), TimesheetStatus::Draft.badge());
    }

    #[test]
    fn missing_fields_message_names_fields() {
        let error = AddWeekError::MissingFields(vec![FormField::WeekEnd, FormField::TotalHours]);
        assert_eq!(error.to_string(), "Please fill in all fields (missing: week end, total hours)");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TimesheetStatus::Rejected).expect("serialize status");
        assert_eq!(json, "\"rejected\"");
    }

    #[test]
    fn unknown_status_deserializes_as_draft() {
        let status: TimesheetStatus = serde_json::from_str("\"on-hold\"").expect("lenient status");
        assert_eq!(status, TimesheetStatus::Draft);
        let status: TimesheetStatus = serde_json::from_str("\"Approved\"").expect("lenient status");
        assert_eq!(status, TimesheetStatus::Approved);
    }
}
