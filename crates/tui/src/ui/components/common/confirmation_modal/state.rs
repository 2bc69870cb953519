use visadesk_types::{Confirmation, PendingDeletion, Severity};

/// Labels of the two buttons; index 0 confirms.
pub const BUTTON_LABELS: [&str; 2] = ["Delete", "Cancel"];

/// What the confirmation modal is asking about, plus which button has focus.
#[derive(Debug, Default, Clone)]
pub struct ConfirmationModalState {
    title: Option<String>,
    message: Option<String>,
    severity: Severity,
    pending: Option<PendingDeletion>,
    focused_button: usize,
}

impl ConfirmationModalState {
    /// Prepares the modal for a deletion prompt. Focus starts on "Cancel".
    pub fn ask_delete(&mut self, pending: PendingDeletion) {
        self.title = Some("Delete document".to_string());
        self.message = Some(pending.prompt());
        self.severity = Severity::Warning;
        self.pending = Some(pending);
        self.focused_button = 1;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn take_pending(&mut self) -> Option<PendingDeletion> {
        self.pending.take()
    }

    pub fn buttons(&self) -> &[&'static str] {
        &BUTTON_LABELS
    }

    pub fn is_button_focused(&self, idx: usize) -> bool {
        self.focused_button == idx
    }

    pub fn cycle_focus(&mut self) {
        self.focused_button = (self.focused_button + 1) % BUTTON_LABELS.len();
    }

    /// Answer represented by button `idx`.
    pub fn answer_for(idx: usize) -> Confirmation {
        if idx == 0 { Confirmation::Confirmed } else { Confirmation::Declined }
    }

    pub fn focused_answer(&self) -> Confirmation {
        Self::answer_for(self.focused_button)
    }
}

#[cfg(test)]
mod tests {
    use visadesk_types::{DocumentId, WeekId};

    use super::*;

    #[test]
    fn defaults_to_declining() {
        let mut state = ConfirmationModalState::default();
        state.ask_delete(PendingDeletion {
            week_id: WeekId(1),
            document_id: DocumentId(2),
            document_name: "a.pdf".into(),
        });
        assert_eq!(state.focused_answer(), Confirmation::Declined);
        state.cycle_focus();
        assert_eq!(state.focused_answer(), Confirmation::Confirmed);
        assert!(state.take_pending().is_some());
        assert!(state.take_pending().is_none());
    }
}
