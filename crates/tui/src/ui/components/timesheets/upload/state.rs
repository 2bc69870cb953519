use visadesk_types::WeekId;

use crate::ui::components::common::TextInputState;

/// Path prompt of the upload modal.
#[derive(Debug, Default, Clone)]
pub struct UploadState {
    pub week_id: Option<WeekId>,
    pub week_label: String,
    pub input: TextInputState,
    pub error: Option<String>,
}

impl UploadState {
    pub fn open_for(&mut self, week_id: WeekId, week_label: String) {
        *self = Self {
            week_id: Some(week_id),
            week_label,
            ..Self::default()
        };
    }
}
