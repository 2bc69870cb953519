//! Shared type definitions for the Visadesk workspace: domain records, the
//! typed outcomes of validation, and the message/effect vocabulary the
//! terminal UI uses between components and its runtime.

use std::fmt;

pub mod location;
pub mod timesheet;
pub mod upload;

pub use location::Location;
pub use timesheet::{
    AddWeekError, AddWeekForm, BadgeTone, Confirmation, DashboardSummary, Document, DocumentDetails, DocumentId,
    FormField, PendingDeletion, StatusAction, StatusBadge, TimesheetError, TimesheetStatus, WeekId, WeeklyTimesheet,
};
pub use upload::{
    ALLOWED_MIME_TYPES, BatchReport, CompletedUpload, FileMeta, MAX_UPLOAD_BYTES, UploadId, UploadRejection,
    is_allowed_mime_type,
};

/// Severity attached to user-facing notices and modal chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification produced by a validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic tick driving simulated upload progress
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// The confirmation modal was answered
    ConfirmationResolved(Confirmation),
}

/// Side effects requested by components and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    // Change the main view
    SwitchTo(Route),
    // Display a modal view
    ShowModal(Modal),
    // Hide any open modals
    CloseModal,
    /// Surface a notice in the status line
    Notify(Notice),
    /// Re-dispatch a message through the main view
    SendMsg(Msg),
    /// Leave the application
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Timesheets,
    Location,
}

impl Route {
    pub const ALL: [Route; 3] = [Self::Dashboard, Self::Timesheets, Self::Location];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Timesheets => "Timesheets",
            Self::Location => "Work Site",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    AddWeek,
    Upload,
    ConfirmDelete,
    DocumentDetails,
}
